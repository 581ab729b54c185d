/// Port to the post storage the trend scan reads from
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::PostPage;

/// Paginated, time-filtered read access to posts.
///
/// Pages are ordered by `created_at` descending with `cutoff` as a lower
/// bound. The scan does not require a consistent read across pages: a
/// post that arrives or disappears mid-scan may or may not be counted
/// this cycle and will be counted correctly by the next one.
#[async_trait]
pub trait PostSource: Send + Sync {
    async fn page_created_after(
        &self,
        cutoff: DateTime<Utc>,
        page: u32,
        page_size: u32,
    ) -> Result<PostPage>;
}
