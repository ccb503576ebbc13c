#![allow(async_fn_in_trait)]
pub mod author;
pub mod error;
pub mod filter;
pub mod sqlite;
pub mod store;
pub mod validation;

pub use author::AuthorRecord;
pub use error::{Error, StoreError};
pub use sqlx::Error as SqlxError;
pub use store::DocumentStore;

use sqlx::sqlite::SqlitePoolOptions;

use crate::error::StoreResult;

pub type ChosenDB = sqlx::Sqlite;
pub type Pool = sqlx::Pool<ChosenDB>;

pub const MAX_LIMIT: usize = 10_000;

pub async fn new_pool(database_url: &str) -> StoreResult<Pool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(50)
        .connect(database_url)
        .await?;
    Ok(pool)
}
