use catalog_dal::sqlite::Author;
use catalog_types::config::BackendConfig;
use clap::Parser;

use crate::commands::{Executor, create_author_store};

#[derive(Parser, Debug)]
pub struct ListAuthorsCmd {
    #[command(flatten)]
    backend: BackendConfig,
    #[arg(short, long, default_value_t = 100, help = "Maximum number of authors to list")]
    limit: usize,
    #[arg(long, help = "Print authors as JSON")]
    json: bool,
}

fn format_author(author: &Author) -> String {
    format!(
        "{}\t{}\t({})",
        author.id,
        author.record.name(),
        author.record.lifespan()
    )
}

impl ListAuthorsCmd {
    /// Listing as printed, one author per line or JSON array
    pub async fn render(&self) -> anyhow::Result<String> {
        let store = create_author_store(&self.backend).await?;
        let limit = self.limit.min(catalog_dal::MAX_LIMIT);
        let authors = store.list(limit).await?;
        if self.json {
            Ok(serde_json::to_string_pretty(&authors)?)
        } else {
            Ok(authors
                .iter()
                .map(format_author)
                .collect::<Vec<_>>()
                .join("\n"))
        }
    }
}

impl Executor for ListAuthorsCmd {
    async fn run(self) -> anyhow::Result<()> {
        let output = self.render().await?;
        if !output.is_empty() {
            println!("{output}");
        }
        Ok(())
    }
}
