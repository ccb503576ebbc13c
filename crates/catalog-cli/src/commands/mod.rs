pub mod add_author;
pub mod count_authors;
pub mod list_authors;

use catalog_dal::sqlite::AuthorStore;
use catalog_types::config::BackendConfig;

#[allow(async_fn_in_trait)]
pub trait Executor {
    async fn run(self) -> anyhow::Result<()>;
}

pub(crate) async fn create_author_store(backend: &BackendConfig) -> anyhow::Result<AuthorStore> {
    backend.prepare_data_dir()?;
    let pool = catalog_dal::new_pool(&backend.database_url()).await?;
    let store = AuthorStore::new(pool);
    store.ensure_table().await?;
    Ok(store)
}
