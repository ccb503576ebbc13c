use catalog_dal::{AuthorRecord, filter::FieldFilterMap};
use catalog_types::config::BackendConfig;
use clap::Parser;

use crate::commands::{Executor, create_author_store};

#[derive(Parser, Debug)]
pub struct CountAuthorsCmd {
    #[command(flatten)]
    backend: BackendConfig,
    #[arg(
        long,
        help = r#"Filter as JSON object, e.g. {"first_name": "John", "date_of_death": {"$exists": true}}"#
    )]
    filter: Option<FieldFilterMap>,
    #[arg(long, help = "Count only authors with this first name, overrides same field in --filter")]
    first_name: Option<String>,
    #[arg(long, help = "Count only authors with this family name, overrides same field in --filter")]
    family_name: Option<String>,
}

impl CountAuthorsCmd {
    fn build_filter(&self) -> Option<FieldFilterMap> {
        let mut filter = self.filter.clone();
        if let Some(first_name) = &self.first_name {
            filter = Some(filter.unwrap_or_default().equals("first_name", first_name.as_str()));
        }
        if let Some(family_name) = &self.family_name {
            filter = Some(filter.unwrap_or_default().equals("family_name", family_name.as_str()));
        }
        filter
    }

    pub async fn count(&self) -> anyhow::Result<u64> {
        let store = create_author_store(&self.backend).await?;
        let count = AuthorRecord::get_author_count(&store, self.build_filter()).await?;
        Ok(count)
    }
}

impl Executor for CountAuthorsCmd {
    async fn run(self) -> anyhow::Result<()> {
        println!("{}", self.count().await?);
        Ok(())
    }
}
