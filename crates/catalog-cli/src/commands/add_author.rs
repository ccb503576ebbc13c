use catalog_dal::{AuthorRecord, Error};
use catalog_types::{CalendarDate, config::BackendConfig};
use clap::Parser;
use tracing::debug;

use crate::commands::{Executor, create_author_store};

#[derive(Parser, Debug)]
pub struct AddAuthorCmd {
    #[command(flatten)]
    backend: BackendConfig,
    #[arg(long, help = "First name of the author, required, max. 100 characters")]
    first_name: Option<String>,
    #[arg(long, help = "Family name of the author, required, max. 100 characters")]
    family_name: Option<String>,
    #[arg(long, help = "Date of birth in form YYYY-MM-DD")]
    born: Option<CalendarDate>,
    #[arg(long, help = "Date of death in form YYYY-MM-DD")]
    died: Option<CalendarDate>,
}

impl Executor for AddAuthorCmd {
    async fn run(self) -> anyhow::Result<()> {
        let record = AuthorRecord {
            first_name: self.first_name,
            family_name: self.family_name,
            date_of_birth: self.born,
            date_of_death: self.died,
        };
        let store = create_author_store(&self.backend).await?;
        match store.insert(&record).await {
            Ok(author) => {
                debug!("Stored author {:?}", author);
                println!("{}", author.id);
                Ok(())
            }
            Err(Error::Validation(errors)) => {
                for (field, error) in errors.iter() {
                    eprintln!("{field}: {error}");
                }
                anyhow::bail!("Invalid author, {} field(s) failed validation", errors.len())
            }
            Err(e) => Err(e.into()),
        }
    }
}
