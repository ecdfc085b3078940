use crate::error::CatalogError;
use crate::ItemId;
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;

pub const SPOTIFY_TRACK_BASE: &str = "https://open.spotify.com/track/";

/// One canonical catalog row. Immutable after load; `item_id` equals the
/// row's position after deduplication and is the vector-space row id.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogItem {
    pub item_id: ItemId,
    pub track_name: String,
    pub artist_name: String,
    pub album: String,
    pub duration_ms: u64,
    pub spotify_uri: String,
    pub spotify_link: String,
    pub formatted_duration: String,
    /// `track_name + " " + artist_name + " " + album`, used only for indexing.
    pub combined_text: String,
}

/// One source row after header resolution, before normalization.
#[derive(Debug, Clone, Default)]
pub struct RawRecord {
    pub track_name: String,
    pub artist_name: String,
    pub album: String,
    pub spotify_uri: String,
    pub duration_ms: i64,
}

/// The normalized item table, indexed by `item_id`.
#[derive(Debug)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

// Accepted header spellings per canonical field, matched case-insensitively.
const TRACK_ALIASES: &[&str] = &["track name", "track_name", "track", "title"];
const ARTIST_ALIASES: &[&str] = &["artist name", "artist_name", "artist"];
const ALBUM_ALIASES: &[&str] = &["album", "album name", "album_name"];
const URI_ALIASES: &[&str] = &["track uri", "track_uri", "spotify uri", "spotify_uri", "uri"];
const DURATION_ALIASES: &[&str] = &["duration (ms)", "duration_ms", "duration"];

fn find_column(
    headers: &csv::StringRecord,
    aliases: &[&str],
    name: &'static str,
) -> Result<usize, CatalogError> {
    headers
        .iter()
        .position(|h| aliases.contains(&h.trim().to_lowercase().as_str()))
        .ok_or(CatalogError::MissingColumn(name))
}

/// Build the public track URL from a Spotify URI. The track id is the
/// segment after the last `:`; a URI without `:` is treated as a bare id.
pub fn spotify_link(uri: &str) -> String {
    let id = uri.rsplit(':').next().unwrap_or(uri);
    format!("{SPOTIFY_TRACK_BASE}{id}")
}

/// Render a millisecond duration as `m:ss`.
pub fn format_duration(duration_ms: u64) -> String {
    let minutes = duration_ms / 60_000;
    let seconds = (duration_ms % 60_000) / 1_000;
    format!("{minutes}:{seconds:02}")
}

impl Catalog {
    /// Load and normalize a catalog CSV. Missing text cells become empty
    /// strings; a missing, non-numeric, or negative duration is an
    /// `InvalidRecord` and fails the whole load.
    pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let mut reader = csv::Reader::from_path(path)?;
        let headers = reader.headers()?.clone();
        let track = find_column(&headers, TRACK_ALIASES, "track name")?;
        let artist = find_column(&headers, ARTIST_ALIASES, "artist name")?;
        let album = find_column(&headers, ALBUM_ALIASES, "album")?;
        let uri = find_column(&headers, URI_ALIASES, "track uri")?;
        let duration = find_column(&headers, DURATION_ALIASES, "duration (ms)")?;

        let mut records = Vec::new();
        for (row, result) in reader.records().enumerate() {
            let record = result?;
            let cell = |i: usize| record.get(i).unwrap_or("").to_string();
            let raw_duration = record.get(duration).unwrap_or("").trim().to_string();
            let duration_ms: i64 =
                raw_duration
                    .parse()
                    .map_err(|_| CatalogError::InvalidRecord {
                        row,
                        reason: format!("duration {raw_duration:?} is not an integer"),
                    })?;
            records.push(RawRecord {
                track_name: cell(track),
                artist_name: cell(artist),
                album: cell(album),
                spotify_uri: cell(uri),
                duration_ms,
            });
        }
        Self::from_records(records)
    }

    /// Normalize raw rows: validate durations, deduplicate keep-first on
    /// `(track_name, artist_name, album)`, assign dense item ids in the
    /// surviving order, and derive the display fields.
    pub fn from_records<I>(records: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let mut seen: HashSet<(String, String, String)> = HashSet::new();
        let mut items: Vec<CatalogItem> = Vec::new();
        for (row, rec) in records.into_iter().enumerate() {
            if rec.duration_ms < 0 {
                return Err(CatalogError::InvalidRecord {
                    row,
                    reason: format!("negative duration {}", rec.duration_ms),
                });
            }
            let key = (
                rec.track_name.clone(),
                rec.artist_name.clone(),
                rec.album.clone(),
            );
            if !seen.insert(key) {
                continue;
            }
            let duration_ms = rec.duration_ms as u64;
            let combined_text =
                format!("{} {} {}", rec.track_name, rec.artist_name, rec.album);
            items.push(CatalogItem {
                item_id: items.len() as ItemId,
                spotify_link: spotify_link(&rec.spotify_uri),
                formatted_duration: format_duration(duration_ms),
                combined_text,
                track_name: rec.track_name,
                artist_name: rec.artist_name,
                album: rec.album,
                duration_ms,
                spotify_uri: rec.spotify_uri,
            });
        }
        tracing::info!(num_items = items.len(), "catalog normalized");
        Ok(Self { items })
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn get(&self, item_id: ItemId) -> Option<&CatalogItem> {
        self.items.get(item_id as usize)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
