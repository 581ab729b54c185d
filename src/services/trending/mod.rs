/// Trending Service
///
/// Runs the scan → accumulate → select → publish cycle and serves the
/// read path from the published snapshot.
pub mod scoring;
pub mod source;
pub mod store;

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use crate::config::TrendingConfig;
use crate::error::{AppError, Result};
use crate::models::TrendSnapshot;

pub use source::PostSource;
pub use store::TrendStore;

use scoring::{select_top_k, Scoreboard};

/// Summary of one completed recomputation cycle, for logs and metrics.
#[derive(Debug, Clone, Copy, Default)]
pub struct CycleStats {
    pub pages_fetched: u32,
    pub posts_seen: u64,
    pub posts_skipped: u64,
    pub distinct_hashtags: usize,
    pub published_entries: usize,
}

pub struct TrendingService {
    source: Arc<dyn PostSource>,
    store: Arc<TrendStore>,
    config: TrendingConfig,
}

impl TrendingService {
    pub fn new(source: Arc<dyn PostSource>, store: Arc<TrendStore>, config: TrendingConfig) -> Self {
        Self {
            source,
            store,
            config,
        }
    }

    pub fn store(&self) -> Arc<TrendStore> {
        Arc::clone(&self.store)
    }

    /// The read path: ordered trending hashtags from the latest published
    /// snapshot. O(K), never blocks on recomputation, never fails.
    pub fn trending_hashtags(&self) -> Vec<String> {
        self.store.current_hashtags()
    }

    /// Run one full recomputation cycle against the injected `now`.
    ///
    /// Pages through every post newer than `now - window`, folds them into
    /// a fresh cycle-local scoreboard, selects the top-K and publishes the
    /// result. Any source error aborts the cycle before publishing, so
    /// the previously published snapshot stays visible.
    pub async fn recompute(&self, now: DateTime<Utc>) -> Result<CycleStats> {
        let cutoff = now - Duration::hours(self.config.window_hours);
        let window_hours = self.config.window_hours as f64;

        let mut board = Scoreboard::new();
        let mut page = 0u32;

        loop {
            let page_data = self
                .source
                .page_created_after(cutoff, page, self.config.page_size)
                .await?;

            for post in &page_data.posts {
                board.fold_post(post, now, window_hours);
            }
            page += 1;

            if !page_data.has_next {
                break;
            }
            if page >= self.config.max_pages {
                warn!(
                    pages = page,
                    "Trend scan hit page ceiling, aborting cycle without publishing"
                );
                return Err(AppError::ScanOverrun { pages: page });
            }
        }

        if board.posts_skipped() > 0 {
            warn!(
                skipped = board.posts_skipped(),
                "Skipped posts with missing timestamps during trend scan"
            );
        }

        let stats = CycleStats {
            pages_fetched: page,
            posts_seen: board.posts_seen(),
            posts_skipped: board.posts_skipped(),
            distinct_hashtags: board.distinct_hashtags(),
            published_entries: 0,
        };

        let entries = select_top_k(board.into_scores(), self.config.top_k);
        let snapshot = TrendSnapshot {
            entries,
            computed_at: now,
        };
        let published_entries = snapshot.entries.len();
        self.store.publish(snapshot);

        debug!(
            pages = stats.pages_fetched,
            posts = stats.posts_seen,
            hashtags = stats.distinct_hashtags,
            published = published_entries,
            "Published new trend snapshot"
        );

        Ok(CycleStats {
            published_entries,
            ..stats
        })
    }
}
