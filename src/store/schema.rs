// Schema version 1. Creation is idempotent; there is no migration logic.

pub const CREATE_PHOTOS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS photos (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        url TEXT NOT NULL,
        added_at INTEGER NOT NULL
    )
";

pub const CREATE_INDEX_ADDED_AT: &str =
    "CREATE INDEX IF NOT EXISTS idx_photos_added_at ON photos(added_at)";
