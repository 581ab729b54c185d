//! End-to-end tests for the trending recomputation cycle: paginated scan,
//! score accumulation, top-K publish, and failure behavior against a stub
//! post source.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use trend_service::config::TrendingConfig;
use trend_service::error::AppError;
use trend_service::models::{PostPage, ScannedPost};
use trend_service::services::trending::{PostSource, TrendStore, TrendingService};

fn post(id: i64, created_at: DateTime<Utc>, hashtags: &[&str]) -> ScannedPost {
    ScannedPost {
        id,
        created_at: Some(created_at),
        hashtags: hashtags.iter().map(|s| s.to_string()).collect(),
    }
}

/// Stub source serving a fixed page sequence, optionally failing at a
/// given page index.
struct StubSource {
    pages: Vec<Vec<ScannedPost>>,
    fail_at_page: Option<u32>,
    calls: AtomicU32,
}

impl StubSource {
    fn new(pages: Vec<Vec<ScannedPost>>) -> Self {
        Self {
            pages,
            fail_at_page: None,
            calls: AtomicU32::new(0),
        }
    }

    fn failing_at(pages: Vec<Vec<ScannedPost>>, page: u32) -> Self {
        Self {
            pages,
            fail_at_page: Some(page),
            calls: AtomicU32::new(0),
        }
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PostSource for StubSource {
    async fn page_created_after(
        &self,
        _cutoff: DateTime<Utc>,
        page: u32,
        _page_size: u32,
    ) -> trend_service::Result<PostPage> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_at_page == Some(page) {
            return Err(AppError::SourceUnavailable(format!(
                "stub failure on page {}",
                page
            )));
        }

        let idx = page as usize;
        let posts = self.pages.get(idx).cloned().unwrap_or_default();
        let has_next = idx + 1 < self.pages.len();
        Ok(PostPage { posts, has_next })
    }
}

/// Source that always reports another page, for the liveness ceiling.
struct EndlessSource;

#[async_trait]
impl PostSource for EndlessSource {
    async fn page_created_after(
        &self,
        _cutoff: DateTime<Utc>,
        _page: u32,
        _page_size: u32,
    ) -> trend_service::Result<PostPage> {
        Ok(PostPage {
            posts: vec![post(1, Utc::now(), &["#loop"])],
            has_next: true,
        })
    }
}

fn service_with(source: Arc<dyn PostSource>) -> (TrendingService, Arc<TrendStore>) {
    let store = Arc::new(TrendStore::new());
    let config = TrendingConfig {
        max_pages: 10,
        ..TrendingConfig::default()
    };
    (
        TrendingService::new(source, Arc::clone(&store), config),
        store,
    )
}

#[tokio::test]
async fn cycle_scores_duplicate_hashtags_per_occurrence() {
    let now = Utc::now();
    let source = Arc::new(StubSource::new(vec![vec![post(
        1,
        now,
        &["#a", "#a", "#b"],
    )]]));
    let (service, store) = service_with(source);

    let stats = service.recompute(now).await.expect("cycle should succeed");
    assert_eq!(stats.posts_seen, 1);
    assert_eq!(stats.published_entries, 2);

    let snapshot = store.snapshot();
    assert_eq!(snapshot.entries[0].hashtag, "#a");
    assert_eq!(snapshot.entries[0].score, 2.0);
    assert_eq!(snapshot.entries[1].hashtag, "#b");
    assert_eq!(snapshot.entries[1].score, 1.0);
    assert_eq!(snapshot.computed_at, now);
}

#[tokio::test]
async fn empty_window_publishes_empty_snapshot() {
    let now = Utc::now();
    let source = Arc::new(StubSource::new(vec![vec![]]));
    let (service, store) = service_with(source);

    let stats = service.recompute(now).await.expect("cycle should succeed");
    assert_eq!(stats.posts_seen, 0);
    assert_eq!(stats.published_entries, 0);
    assert!(store.current_hashtags().is_empty());
}

#[tokio::test]
async fn scan_accumulates_across_pages() {
    let now = Utc::now();
    let pages = vec![
        vec![
            post(1, now - Duration::hours(1), &["#rust"]),
            post(2, now - Duration::hours(2), &["#rust", "#tokio"]),
        ],
        vec![post(3, now - Duration::hours(3), &["#tokio"])],
        vec![post(4, now - Duration::hours(4), &["#actix"])],
    ];
    let source = Arc::new(StubSource::new(pages));
    let (service, store) = service_with(Arc::clone(&source) as Arc<dyn PostSource>);

    let stats = service.recompute(now).await.expect("cycle should succeed");
    assert_eq!(stats.pages_fetched, 3);
    assert_eq!(source.calls(), 3);
    assert_eq!(stats.posts_seen, 4);
    assert_eq!(stats.distinct_hashtags, 3);

    // #rust: w(1h) + w(2h) > #tokio: w(2h) + w(3h) > #actix: w(4h)
    assert_eq!(store.current_hashtags(), vec!["#rust", "#tokio", "#actix"]);
}

#[tokio::test]
async fn fifteen_hashtags_truncate_to_top_ten() {
    let now = Utc::now();
    // One post per hashtag, staggered ages give distinct scores
    let posts: Vec<ScannedPost> = (0..15)
        .map(|i| {
            post(
                i,
                now - Duration::minutes(i * 30),
                &[format!("#tag{:02}", i).as_str()],
            )
        })
        .collect();
    let source = Arc::new(StubSource::new(vec![posts]));
    let (service, store) = service_with(source);

    service.recompute(now).await.expect("cycle should succeed");

    let snapshot = store.snapshot();
    assert_eq!(snapshot.entries.len(), 10);
    // Newest posts score highest
    assert_eq!(snapshot.entries[0].hashtag, "#tag00");
    for pair in snapshot.entries.windows(2) {
        assert!(pair[0].score > pair[1].score);
    }
}

#[tokio::test]
async fn source_failure_mid_scan_keeps_previous_snapshot() {
    let now = Utc::now();
    let first_pages = vec![vec![post(1, now, &["#stable"])]];
    let good_source = Arc::new(StubSource::new(first_pages));
    let store = Arc::new(TrendStore::new());
    let config = TrendingConfig::default();

    // First cycle publishes a snapshot
    let service = TrendingService::new(good_source, Arc::clone(&store), config.clone());
    service.recompute(now).await.expect("first cycle");
    assert_eq!(store.current_hashtags(), vec!["#stable"]);

    // Second cycle fails on page 1 after a successful page 0
    let later = now + Duration::hours(1);
    let failing = Arc::new(StubSource::failing_at(
        vec![
            vec![post(2, later, &["#new"])],
            vec![post(3, later, &["#new"])],
        ],
        1,
    ));
    let service = TrendingService::new(
        Arc::clone(&failing) as Arc<dyn PostSource>,
        Arc::clone(&store),
        config.clone(),
    );

    let err = service.recompute(later).await.expect_err("cycle must abort");
    assert!(matches!(err, AppError::SourceUnavailable(_)));
    assert_eq!(failing.calls(), 2);

    // Previous snapshot is untouched
    assert_eq!(store.current_hashtags(), vec!["#stable"]);

    // Next tick retries from scratch and succeeds
    let retry = Arc::new(StubSource::new(vec![vec![post(4, later, &["#new"])]]));
    let service = TrendingService::new(retry, Arc::clone(&store), config);
    service.recompute(later).await.expect("retry cycle");
    assert_eq!(store.current_hashtags(), vec!["#new"]);
}

#[tokio::test]
async fn endless_source_trips_page_ceiling_without_publishing() {
    let (service, store) = service_with(Arc::new(EndlessSource));

    let err = service
        .recompute(Utc::now())
        .await
        .expect_err("scan must abort at the page ceiling");
    assert!(matches!(err, AppError::ScanOverrun { pages: 10 }));
    assert!(store.current_hashtags().is_empty());
}

#[tokio::test]
async fn recomputation_is_idempotent_for_fixed_input_and_now() {
    let now = Utc::now();
    let pages = vec![vec![
        post(1, now - Duration::hours(2), &["#a", "#b"]),
        post(2, now - Duration::hours(5), &["#b", "#c", "#b"]),
    ]];

    let run = |pages: Vec<Vec<ScannedPost>>| async move {
        let (service, store) = service_with(Arc::new(StubSource::new(pages)));
        service.recompute(now).await.expect("cycle");
        store.snapshot().entries.clone()
    };

    let first = run(pages.clone()).await;
    let second = run(pages).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn malformed_posts_are_skipped_not_fatal() {
    let now = Utc::now();
    let pages = vec![vec![
        post(1, now, &["#ok"]),
        ScannedPost {
            id: 2,
            created_at: None,
            hashtags: vec!["#broken".to_string()],
        },
        post(3, now, &["#ok"]),
    ]];
    let (service, store) = service_with(Arc::new(StubSource::new(pages)));

    let stats = service.recompute(now).await.expect("cycle should succeed");
    assert_eq!(stats.posts_seen, 2);
    assert_eq!(stats.posts_skipped, 1);
    assert_eq!(store.current_hashtags(), vec!["#ok"]);
}
