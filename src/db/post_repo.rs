/// Post Repository
///
/// Postgres-backed `PostSource` for the trend scan. Posts live in the
/// `posts` table with their hashtags in the `post_hashtags` side table
/// written by the posting path; this repository only ever reads.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::error;

use crate::error::{AppError, Result};
use crate::models::{PostPage, ScannedPost};
use crate::services::trending::PostSource;

pub struct PostRepo {
    pool: PgPool,
}

impl PostRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostSource for PostRepo {
    /// One page of posts created after `cutoff`, newest first.
    ///
    /// Fetches `page_size + 1` rows; the extra row only signals that a
    /// further page exists. Zero rows on the first page is the valid
    /// empty-window outcome, not an error.
    async fn page_created_after(
        &self,
        cutoff: DateTime<Utc>,
        page: u32,
        page_size: u32,
    ) -> Result<PostPage> {
        let limit = page_size as i64 + 1;
        let offset = page as i64 * page_size as i64;

        let rows = sqlx::query_as::<_, (i64, Option<DateTime<Utc>>, Vec<String>)>(
            r#"
            SELECT
                p.id,
                p.created_at,
                COALESCE(
                    array_agg(ph.hashtag) FILTER (WHERE ph.hashtag IS NOT NULL),
                    '{}'
                ) AS hashtags
            FROM posts p
            LEFT JOIN post_hashtags ph ON ph.post_id = p.id
            WHERE p.created_at >= $1
            GROUP BY p.id, p.created_at
            ORDER BY p.created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(cutoff)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to fetch posts page {}: {}", page, e);
            AppError::Database(e)
        })?;

        let has_next = rows.len() as i64 > page_size as i64;
        let posts = rows
            .into_iter()
            .take(page_size as usize)
            .map(|(id, created_at, hashtags)| ScannedPost {
                id,
                created_at,
                hashtags,
            })
            .collect();

        Ok(PostPage { posts, has_next })
    }
}
