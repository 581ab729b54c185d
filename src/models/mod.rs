/// Data model for the trending engine
///
/// Everything here is cycle-local or an immutable published result.
/// Nothing is persisted; a process restart starts from an empty snapshot.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Read-only projection of a post as seen by the trend scan.
///
/// `created_at` is optional so a malformed row (missing timestamp) can be
/// decoded and then skipped by the accumulator instead of aborting the
/// whole cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannedPost {
    pub id: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub hashtags: Vec<String>,
}

/// One page of posts from a `PostSource`, newest first.
#[derive(Debug, Clone, Default)]
pub struct PostPage {
    pub posts: Vec<ScannedPost>,
    pub has_next: bool,
}

/// A single ranked hashtag with its accumulated decay-weighted score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendEntry {
    pub hashtag: String,
    pub score: f64,
}

/// The published top-K result of one recomputation cycle.
///
/// Immutable once published; `computed_at` is the generation marker of the
/// cycle that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendSnapshot {
    pub entries: Vec<TrendEntry>,
    pub computed_at: DateTime<Utc>,
}

impl TrendSnapshot {
    /// The snapshot visible before the first cycle completes.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            computed_at: DateTime::<Utc>::MIN_UTC,
        }
    }

    pub fn hashtags(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.hashtag.clone()).collect()
    }
}
