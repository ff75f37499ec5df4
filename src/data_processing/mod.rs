mod cf_api;
mod error;

pub use cf_api::{CodeforcesApi, codeforces_human_url};
pub use error::FetchError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::path::{Path, PathBuf};

/// One contestant's line in the standings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub handle: String,
    /// The contestant's rating before the contest; `None` if they are unrated.
    pub rating: Option<i32>,
    pub points: f64,
    /// The place reported by the source, before unrated contestants are removed.
    pub raw_rank: usize,
}

impl Participant {
    pub fn new(handle: impl Into<String>, rating: Option<i32>, points: f64) -> Self {
        Self {
            handle: handle.into(),
            rating,
            points,
            raw_rank: 0,
        }
    }

    pub fn is_rated(&self) -> bool {
        self.rating.is_some()
    }
}

/// The phase label of a contest whose standings are final.
pub const FINISHED_PHASE: &str = "FINISHED";

/// Descriptive information about a contest.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Contest {
    pub id: usize,
    /// A human-readable title for the contest.
    pub name: String,
    /// The source's phase label, e.g. "FINISHED" or "SYSTEM_TEST".
    pub phase: Option<String>,
    /// The number of seconds from the Unix Epoch to the start of the contest.
    pub start_time_seconds: Option<i64>,
}

impl Contest {
    pub fn url(&self) -> String {
        codeforces_human_url(self.id)
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.start_time_seconds?, 0)
    }
}

/// A contest together with its participants, in the order reported by the source.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Standings {
    pub contest: Contest,
    pub participants: Vec<Participant>,
}

impl Standings {
    /// Handles of the first `n` participants as reported, rated or not.
    pub fn preview_handles(&self, n: usize) -> impl Iterator<Item = &str> {
        self.participants.iter().take(n).map(|p| p.handle.as_str())
    }
}

/// Anything capable of producing the standings of a contest by ID.
pub trait StandingsSource {
    fn fetch(&self, contest_id: usize) -> Result<Standings, FetchError>;

    /// Name of the cache entry for a contest; it must change whenever `fetch()`
    /// would return a different row set for the same contest.
    fn cache_key(&self, contest_id: usize) -> String {
        contest_id.to_string()
    }

    /// Modifies the source to check a cache directory before fetching.
    /// If the cache entry is present, it's used instead of the underlying `fetch()`.
    /// If the cache entry is absent, it will be created after calling `fetch()`,
    /// provided the contest has finished.
    fn cached(self, cache_dir: impl Into<PathBuf>) -> CachedSource<Self>
    where
        Self: Sized,
    {
        CachedSource {
            base_source: self,
            cache_dir: cache_dir.into(),
        }
    }
}

impl<S: StandingsSource + ?Sized> StandingsSource for &S {
    fn fetch(&self, contest_id: usize) -> Result<Standings, FetchError> {
        (**self).fetch(contest_id)
    }

    fn cache_key(&self, contest_id: usize) -> String {
        (**self).cache_key(contest_id)
    }
}

impl<S: StandingsSource + ?Sized> StandingsSource for Box<S> {
    fn fetch(&self, contest_id: usize) -> Result<Standings, FetchError> {
        (**self).fetch(contest_id)
    }

    fn cache_key(&self, contest_id: usize) -> String {
        (**self).cache_key(contest_id)
    }
}

/// A `StandingsSource` that uses a disk directory as its cache.
/// Created using `StandingsSource::cached()`.
pub struct CachedSource<S: StandingsSource> {
    base_source: S,
    cache_dir: PathBuf,
}

impl<S: StandingsSource> CachedSource<S> {
    pub fn cache_file(&self, contest_id: usize) -> PathBuf {
        self.cache_dir
            .join(format!("{}.json", self.base_source.cache_key(contest_id)))
    }
}

/// Only final standings are cached; earlier phases keep changing between fetches.
fn is_final(standings: &Standings) -> bool {
    standings.contest.phase.as_deref() == Some(FINISHED_PHASE)
}

impl<S: StandingsSource> StandingsSource for CachedSource<S> {
    fn fetch(&self, contest_id: usize) -> Result<Standings, FetchError> {
        let cache_file = self.cache_file(contest_id);
        if cache_file.exists() {
            tracing::debug!("Reading contest {} from {:?}", contest_id, cache_file);
            return read_json(&cache_file);
        }

        // The contest doesn't appear in our cache, so request it from the base source
        let standings = self.base_source.fetch(contest_id)?;
        if !is_final(&standings) {
            tracing::info!(
                "Not caching contest {} in phase {:?}",
                contest_id,
                standings.contest.phase
            );
            return Ok(standings);
        }

        let write_res = std::fs::create_dir_all(&self.cache_dir)
            .map_err(FetchError::from)
            .and_then(|()| write_json(&standings, &cache_file));
        match write_res {
            Ok(()) => tracing::info!("Contest {} successfully cached at {:?}", contest_id, cache_file),
            Err(e) => tracing::warn!("Failed to cache contest {} at {:?}: {}", contest_id, cache_file, e),
        }
        Ok(standings)
    }

    fn cache_key(&self, contest_id: usize) -> String {
        self.base_source.cache_key(contest_id)
    }
}

pub fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, FetchError> {
    let json_str = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json_str)?)
}

pub fn write_json<T: Serialize + ?Sized>(value: &T, path: impl AsRef<Path>) -> Result<(), FetchError> {
    let json_str = serde_json::to_string_pretty(value)?;
    Ok(std::fs::write(path.as_ref(), json_str)?)
}

fn write_to_csv<T: Serialize>(values: &[T], path: impl AsRef<Path>) -> Result<(), &'static str> {
    let file = std::fs::File::create(path.as_ref()).map_err(|_| "Output file not found")?;
    let mut writer = csv::Writer::from_writer(file);
    values
        .iter()
        .try_for_each(|val| writer.serialize(val))
        .map_err(|_| "Failed to serialize row")?;
    writer.flush().map_err(|_| "Failed to flush rows")
}

/// Writes `values` as JSON or CSV, depending on the extension of `path`.
/// Returns whether the write succeeded; failures are logged rather than propagated.
pub fn try_write_slice_to_file<T: Serialize>(values: &[T], path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    let write_res = match path.extension().and_then(|s| s.to_str()) {
        Some("json") => write_json(values, path).map_err(|_| "Serialization or file writing error"),
        Some("csv") => write_to_csv(values, path),
        _ => Err("Invalid or missing filename extension"),
    };
    match write_res {
        Ok(()) => {
            tracing::info!("Successfully wrote to {:?}", path);
            true
        }
        Err(msg) => {
            tracing::error!("WARNING: failed write to {:?} because {}", path, msg);
            false
        }
    }
}
