pub mod models;
pub mod schema;
pub mod sqlite;

use crate::errors::Result;
use models::PhotoRecord;

/// Storage seam for the local photo index. Records are append-only: there is
/// no update or delete, and listing always returns the full set newest first.
pub trait PhotoStore {
    /// Inserts a record for `url` stamped with the current wall clock and
    /// returns it with its assigned id.
    fn add_photo(&self, url: &str) -> Result<PhotoRecord>;

    /// Returns every record, sorted by descending timestamp. An empty store
    /// yields an empty vec.
    fn list_photos(&self) -> Result<Vec<PhotoRecord>>;
}
