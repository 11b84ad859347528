// JSON file cache for upstream API responses
use anyhow::Result;
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

/// Responses older than this get refetched.
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Get the cache directory, honoring the `SIMSTATS_CACHE_DIR` override.
pub fn cache_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("SIMSTATS_CACHE_DIR") {
        return PathBuf::from(dir);
    }
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("simstats")
        .join("queries")
}

/// Cache keys come straight from query parameters; keep them path-safe.
fn sanitize(key: &str) -> String {
    key.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

fn entry_path(key: &str) -> PathBuf {
    cache_dir().join(format!("{}.json", sanitize(key)))
}

/// Save a response under `key`.
pub fn store<T: Serialize>(key: &str, data: &T) -> Result<()> {
    let dir = cache_dir();
    fs::create_dir_all(&dir)?;
    let bytes = serde_json::to_vec(data)?;
    fs::write(entry_path(key), &bytes)?;
    Ok(())
}

/// Load the response stored under `key` if it is younger than `max_age`.
pub fn load_fresh<T: DeserializeOwned>(key: &str, max_age: Duration) -> Result<Option<T>> {
    let path = entry_path(key);
    if !path.exists() {
        return Ok(None);
    }

    let modified = fs::metadata(&path)?.modified()?;
    let age = SystemTime::now()
        .duration_since(modified)
        .unwrap_or(Duration::MAX);
    if age > max_age {
        return Ok(None);
    }

    let bytes = fs::read(&path)?;
    Ok(Some(serde_json::from_slice(&bytes)?))
}

/// Drop every cached response.
pub fn clear_all() -> Result<()> {
    let dir = cache_dir();
    if dir.exists() {
        fs::remove_dir_all(&dir)?;
    }
    Ok(())
}

#[derive(Debug, Default)]
pub struct CacheStats {
    pub total_size: u64,
    pub file_count: usize,
    pub cache_dir: PathBuf,
}

impl CacheStats {
    pub fn format_size(&self) -> String {
        if self.total_size >= 1024 * 1024 {
            format!("{:.2} MB", self.total_size as f64 / (1024.0 * 1024.0))
        } else if self.total_size >= 1024 {
            format!("{:.2} KB", self.total_size as f64 / 1024.0)
        } else {
            format!("{} B", self.total_size)
        }
    }
}

pub fn stats() -> Result<CacheStats> {
    let dir = cache_dir();
    if !dir.exists() {
        return Ok(CacheStats {
            cache_dir: dir,
            ..CacheStats::default()
        });
    }

    let mut total_size = 0u64;
    let mut file_count = 0usize;
    for entry in fs::read_dir(&dir)? {
        let entry = entry?;
        if entry.path().extension().is_some_and(|e| e == "json") {
            total_size += entry.metadata()?.len();
            file_count += 1;
        }
    }

    Ok(CacheStats {
        total_size,
        file_count,
        cache_dir: dir,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn round_trip_freshness_and_stats() {
        let dir = TempDir::new().unwrap();
        std::env::set_var("SIMSTATS_CACHE_DIR", dir.path());

        let rows = vec![("label".to_string(), "1,234".to_string())];
        store("events-11-aircraft", &rows).unwrap();

        let loaded: Option<Vec<(String, String)>> =
            load_fresh("events-11-aircraft", DEFAULT_TTL).unwrap();
        assert_eq!(loaded, Some(rows));

        // A zero max-age makes everything stale.
        let stale: Option<Vec<(String, String)>> =
            load_fresh("events-11-aircraft", Duration::ZERO).unwrap();
        assert!(stale.is_none());

        let missing: Option<Vec<(String, String)>> =
            load_fresh("never-stored", DEFAULT_TTL).unwrap();
        assert!(missing.is_none());

        let totals = stats().unwrap();
        assert_eq!(totals.file_count, 1);
        assert!(totals.total_size > 0);

        clear_all().unwrap();
        assert!(!cache_dir().exists());

        std::env::remove_var("SIMSTATS_CACHE_DIR");
    }

    #[test]
    fn keys_are_sanitized_for_the_filesystem() {
        assert_eq!(sanitize("events/11 beta:2"), "events_11_beta_2");
        assert_eq!(sanitize("plain-key_1"), "plain-key_1");
    }
}
