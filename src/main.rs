use std::path::PathBuf;
use std::process;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;

use album::config::{self, AppPaths};
use album::device;
use album::errors::{AlbumError, Result};
use album::store::PhotoStore;
use album::store::models::PhotoRecord;
use album::store::sqlite::SqlitePhotoIndex;
use album::upload::Uploader;

#[derive(Parser)]
#[command(name = "album", version, about = "A small photo album client")]
struct Cli {
    /// Output results as JSON
    #[arg(short = 'j', long = "json", global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List uploaded photos, newest first
    List,

    /// Upload a photo and record it in the local index
    Upload {
        /// Image file to upload
        file: PathBuf,

        /// Upload endpoint URL (falls back to ALBUM_ENDPOINT)
        #[arg(short, long)]
        endpoint: Option<String>,
    },

    /// Show index statistics
    Stats,
}

#[derive(Serialize)]
struct StatusResponse {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    record: Option<PhotoRecord>,
}

fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    if let Err(e) = run(cli) {
        if json {
            eprintln!("{}", serde_json::json!({"error": e.to_string()}));
        } else {
            eprintln!("error: {}", e);
        }
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let paths = AppPaths::new();
    let json = cli.json;

    match cli.command {
        None | Some(Commands::List) => cmd_list(&paths, json),
        Some(Commands::Upload { file, endpoint }) => cmd_upload(&paths, &file, endpoint, json),
        Some(Commands::Stats) => cmd_stats(&paths, json),
    }
}

fn open_index(paths: &AppPaths) -> Result<SqlitePhotoIndex> {
    std::fs::create_dir_all(&paths.base_dir)
        .map_err(|e| AlbumError::StorageUnavailable(e.to_string()))?;
    SqlitePhotoIndex::open(&paths.db_path)
}

fn cmd_list(paths: &AppPaths, json: bool) -> Result<()> {
    let index = open_index(paths)?;
    let photos = index.list_photos()?;

    if json {
        println!("{}", serde_json::to_string(&photos).unwrap());
        return Ok(());
    }

    if photos.is_empty() {
        println!("No photos yet.");
        return Ok(());
    }

    for photo in &photos {
        print_photo_row(photo);
    }
    Ok(())
}

fn cmd_upload(
    paths: &AppPaths,
    file: &std::path::Path,
    endpoint: Option<String>,
    json: bool,
) -> Result<()> {
    let endpoint = config::resolve_endpoint(endpoint)?;
    let bytes = std::fs::read(file)
        .map_err(|e| AlbumError::InvalidInput(format!("cannot read {}: {}", file.display(), e)))?;
    let filename = file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("photo.jpg")
        .to_string();

    let index = open_index(paths)?;
    let user_key = device::load_or_create_user_key(paths)?;
    let uploader = Uploader::new(endpoint, user_key)?;

    let record = uploader.upload_and_record(&index, bytes, &filename)?;

    if json {
        println!(
            "{}",
            serde_json::to_string(&StatusResponse {
                success: true,
                message: format!("Uploaded {} as photo #{}.", filename, record.id),
                record: Some(record),
            })
            .unwrap()
        );
    } else {
        println!("Uploaded {} -> {}", filename, record.url);
    }
    Ok(())
}

fn cmd_stats(paths: &AppPaths, json: bool) -> Result<()> {
    let index = open_index(paths)?;
    let photos = index.list_photos()?;

    let newest = photos.first().map(|p| p.added_at);
    let oldest = photos.last().map(|p| p.added_at);

    if json {
        println!(
            "{}",
            serde_json::json!({
                "total_photos": photos.len(),
                "oldest": oldest,
                "newest": newest,
            })
        );
        return Ok(());
    }

    println!("Album Statistics");
    println!("────────────────");
    println!("Total photos: {}", photos.len());
    if let Some(ms) = oldest {
        println!("Oldest:       {}", format_timestamp(ms));
    }
    if let Some(ms) = newest {
        println!("Newest:       {}", format_timestamp(ms));
    }
    Ok(())
}

fn print_photo_row(photo: &PhotoRecord) {
    let age = match DateTime::<Utc>::from_timestamp_millis(photo.added_at) {
        Some(dt) => format_age(dt),
        None => "?".to_string(),
    };
    println!("{:>4} {:>6}  {}", photo.id, age, photo.url);
}

fn format_timestamp(ms: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(ms) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => "?".to_string(),
    }
}

fn format_age(dt: DateTime<Utc>) -> String {
    let dur = Utc::now() - dt;
    if dur.num_seconds() < 60 {
        "now".to_string()
    } else if dur.num_minutes() < 60 {
        format!("{}m", dur.num_minutes())
    } else if dur.num_hours() < 24 {
        format!("{}h", dur.num_hours())
    } else {
        format!("{}d", dur.num_days())
    }
}
