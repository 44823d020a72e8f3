use std::path::Path;

use chrono::Utc;
use rusqlite::{Connection, Row, params};

use super::PhotoStore;
use super::models::{NewPhoto, PhotoRecord};
use super::schema;
use crate::errors::{AlbumError, Result};

pub struct SqlitePhotoIndex {
    conn: Connection,
}

fn row_to_record(row: &Row) -> rusqlite::Result<PhotoRecord> {
    Ok(PhotoRecord {
        id: row.get(0)?,
        url: row.get(1)?,
        added_at: row.get(2)?,
    })
}

impl SqlitePhotoIndex {
    /// Wraps an open connection, creating the schema if absent. Safe to call
    /// on an already-initialized database.
    pub fn new(conn: Connection) -> Result<Self> {
        conn.execute(schema::CREATE_PHOTOS_TABLE, [])
            .map_err(|e| AlbumError::StorageUnavailable(e.to_string()))?;
        conn.execute(schema::CREATE_INDEX_ADDED_AT, [])
            .map_err(|e| AlbumError::StorageUnavailable(e.to_string()))?;
        Ok(Self { conn })
    }

    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .map_err(|e| AlbumError::StorageUnavailable(e.to_string()))?;
        Self::new(conn)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| AlbumError::StorageUnavailable(e.to_string()))?;
        Self::new(conn)
    }

    /// Inserts a record with an explicit timestamp. `add_photo` stamps the
    /// current wall clock; this is the layer underneath it.
    pub fn insert(&self, photo: NewPhoto) -> Result<PhotoRecord> {
        self.conn
            .execute(
                "INSERT INTO photos (url, added_at) VALUES (?, ?)",
                params![photo.url, photo.added_at],
            )
            .map_err(AlbumError::WriteFailed)?;
        Ok(PhotoRecord {
            id: self.conn.last_insert_rowid(),
            url: photo.url,
            added_at: photo.added_at,
        })
    }

    #[cfg(test)]
    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}

impl PhotoStore for SqlitePhotoIndex {
    fn add_photo(&self, url: &str) -> Result<PhotoRecord> {
        self.insert(NewPhoto {
            url: url.to_string(),
            added_at: Utc::now().timestamp_millis(),
        })
    }

    fn list_photos(&self) -> Result<Vec<PhotoRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, url, added_at FROM photos ORDER BY added_at DESC")
            .map_err(AlbumError::ReadFailed)?;
        let records = stmt
            .query_map([], row_to_record)
            .map_err(AlbumError::ReadFailed)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(AlbumError::ReadFailed)?;
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_index() -> SqlitePhotoIndex {
        SqlitePhotoIndex::in_memory().unwrap()
    }

    fn photo_at(url: &str, added_at: i64) -> NewPhoto {
        NewPhoto {
            url: url.to_string(),
            added_at,
        }
    }

    // --- Schema ---

    #[test]
    fn test_in_memory_creates_table() {
        let index = test_index();
        let count: i64 = index
            .conn()
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='photos'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_open_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("album.db");
        {
            let index = SqlitePhotoIndex::open(&db).unwrap();
            index.add_photo("https://x/a.jpg").unwrap();
        }
        // Reopening an initialized store must not disturb existing records.
        let index = SqlitePhotoIndex::open(&db).unwrap();
        let photos = index.list_photos().unwrap();
        assert_eq!(photos.len(), 1);
        assert_eq!(photos[0].url, "https://x/a.jpg");
    }

    // --- Insert ---

    #[test]
    fn test_add_photo_stamps_current_time() {
        let index = test_index();
        let before = Utc::now().timestamp_millis();
        let record = index.add_photo("https://x/now.jpg").unwrap();
        let after = Utc::now().timestamp_millis();
        assert!(record.added_at >= before && record.added_at <= after);
    }

    #[test]
    fn test_add_photo_assigns_distinct_ids() {
        let index = test_index();
        let ids: Vec<i64> = (0..5)
            .map(|i| index.add_photo(&format!("https://x/{}.jpg", i)).unwrap().id)
            .collect();
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_insert_returns_incrementing_ids() {
        let index = test_index();
        let r1 = index.insert(photo_at("https://x/a.jpg", 1000)).unwrap();
        let r2 = index.insert(photo_at("https://x/b.jpg", 2000)).unwrap();
        let r3 = index.insert(photo_at("https://x/c.jpg", 3000)).unwrap();
        assert_eq!(r1.id, 1);
        assert_eq!(r2.id, 2);
        assert_eq!(r3.id, 3);
    }

    #[test]
    fn test_add_photo_is_append_only() {
        let index = test_index();
        let first = index.add_photo("https://x/a.jpg").unwrap();
        index.add_photo("https://x/b.jpg").unwrap();
        let photos = index.list_photos().unwrap();
        assert_eq!(photos.len(), 2);
        let kept = photos.iter().find(|p| p.id == first.id).unwrap();
        assert_eq!(*kept, first);
    }

    // --- List ---

    #[test]
    fn test_list_empty_store() {
        let index = test_index();
        let photos = index.list_photos().unwrap();
        assert!(photos.is_empty());
    }

    #[test]
    fn test_list_orders_newest_first() {
        let index = test_index();
        index.insert(photo_at("https://x/a.jpg", 1000)).unwrap();
        index.insert(photo_at("https://x/c.jpg", 3000)).unwrap();
        index.insert(photo_at("https://x/b.jpg", 2000)).unwrap();
        let photos = index.list_photos().unwrap();
        let urls: Vec<&str> = photos.iter().map(|p| p.url.as_str()).collect();
        assert_eq!(urls, vec!["https://x/c.jpg", "https://x/b.jpg", "https://x/a.jpg"]);
    }

    #[test]
    fn test_list_orders_by_timestamp_not_id() {
        let index = test_index();
        // Inserted later but stamped earlier: must sort below the first one.
        index.insert(photo_at("https://x/new.jpg", 2000)).unwrap();
        index.insert(photo_at("https://x/old.jpg", 1000)).unwrap();
        let photos = index.list_photos().unwrap();
        assert_eq!(photos[0].url, "https://x/new.jpg");
        assert_eq!(photos[1].url, "https://x/old.jpg");
    }

    #[test]
    fn test_two_uploads_ten_ms_apart() {
        let index = test_index();
        let a = index.add_photo("https://x/a.jpg").unwrap();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let b = index.add_photo("https://x/b.jpg").unwrap();
        assert!(b.added_at > a.added_at);
        let photos = index.list_photos().unwrap();
        assert_eq!(photos[0].url, "https://x/b.jpg");
        assert_eq!(photos[1].url, "https://x/a.jpg");
    }
}
