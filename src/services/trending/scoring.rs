/// Score accumulation and top-K selection
///
/// Pure functions over a window of scanned posts. `now` is always passed
/// in by the caller so cycles are reproducible and testable without
/// touching the system clock.
use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::models::{ScannedPost, TrendEntry};

/// Linear decay weight for a post's age.
///
/// 1.0 at the instant of posting, falling to 0.0 at exactly `window_hours`
/// old, clamped at 0.0 for anything older. The scan cutoff should already
/// exclude older posts, but the cutoff and `now` are sampled at slightly
/// different moments, so the clamp keeps weights non-negative.
pub fn time_weight(created_at: DateTime<Utc>, now: DateTime<Utc>, window_hours: f64) -> f64 {
    let hours_ago = (now - created_at).num_milliseconds() as f64 / 3_600_000.0;
    (1.0 - hours_ago / window_hours).max(0.0)
}

/// Cycle-local scoreboard mapping hashtag to accumulated decayed weight.
///
/// Built fresh at the start of each cycle and discarded at the end; never
/// shared between cycles or observed by readers.
#[derive(Debug, Default)]
pub struct Scoreboard {
    scores: HashMap<String, f64>,
    posts_seen: u64,
    posts_skipped: u64,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one post into the scoreboard.
    ///
    /// A hashtag repeated within a single post contributes once per
    /// occurrence; the accumulator does not deduplicate. Posts without a
    /// timestamp are skipped and counted, never fatal to the cycle.
    pub fn fold_post(&mut self, post: &ScannedPost, now: DateTime<Utc>, window_hours: f64) {
        let Some(created_at) = post.created_at else {
            self.posts_skipped += 1;
            return;
        };

        let weight = time_weight(created_at, now, window_hours);
        for hashtag in &post.hashtags {
            *self.scores.entry(hashtag.clone()).or_insert(0.0) += weight;
        }
        self.posts_seen += 1;
    }

    pub fn posts_seen(&self) -> u64 {
        self.posts_seen
    }

    pub fn posts_skipped(&self) -> u64 {
        self.posts_skipped
    }

    pub fn distinct_hashtags(&self) -> usize {
        self.scores.len()
    }

    pub fn into_scores(self) -> HashMap<String, f64> {
        self.scores
    }
}

/// Reduce a scoreboard to the ordered top-K entries.
///
/// Entries are sorted by score descending; equal scores tie-break on
/// ascending hashtag so the output is deterministic. Hashtags whose score
/// decayed to zero are dropped before selection.
pub fn select_top_k(scores: HashMap<String, f64>, k: usize) -> Vec<TrendEntry> {
    let mut entries: Vec<TrendEntry> = scores
        .into_iter()
        .filter(|(_, score)| *score > 0.0)
        .map(|(hashtag, score)| TrendEntry { hashtag, score })
        .collect();

    entries.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.hashtag.cmp(&b.hashtag))
    });
    entries.truncate(k);
    entries
}
