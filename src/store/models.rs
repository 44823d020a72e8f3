use serde::Serialize;

/// A single uploaded photo as recorded in the local index.
///
/// `added_at` is milliseconds since the Unix epoch, assigned at insert time.
/// Neither field changes after insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhotoRecord {
    pub id: i64,
    pub url: String,
    pub added_at: i64,
}

#[derive(Debug, Clone)]
pub struct NewPhoto {
    pub url: String,
    pub added_at: i64,
}
