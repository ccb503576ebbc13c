use crate::{error::StoreResult, filter::FieldFilterMap};

/// Storage backend able to count records matching a filter.
///
/// Filter interpretation belongs fully to the store, callers just pass it through.
pub trait DocumentStore {
    /// Empty filter counts all records
    async fn count_documents(&self, filter: FieldFilterMap) -> StoreResult<u64>;
}
