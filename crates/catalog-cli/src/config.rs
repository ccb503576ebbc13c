use clap::{Parser, Subcommand};

use crate::commands::{
    add_author::AddAuthorCmd, count_authors::CountAuthorsCmd, list_authors::ListAuthorsCmd,
};

#[derive(Parser)]
#[command(
    version,
    about,
    long_about = "CLI for library catalogue - manages authors stored in catalogue database."
)]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    AddAuthor(AddAuthorCmd),
    CountAuthors(CountAuthorsCmd),
    ListAuthors(ListAuthorsCmd),
}

impl crate::commands::Executor for Command {
    async fn run(self) -> anyhow::Result<()> {
        match self {
            Command::AddAuthor(cmd) => cmd.run().await,
            Command::CountAuthors(cmd) => cmd.run().await,
            Command::ListAuthors(cmd) => cmd.run().await,
        }
    }
}
