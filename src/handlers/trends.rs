/// Trending API Handlers
///
/// The only read surface the rest of the system consumes. Serves straight
/// from the published snapshot: O(K), never triggers a recomputation,
/// never fails. An empty store yields `[]` with 200.
use actix_web::{get, web, HttpResponse};
use std::sync::Arc;

use crate::services::trending::TrendStore;

pub struct TrendsHandlerState {
    pub store: Arc<TrendStore>,
}

/// GET /api/trends
#[get("/api/trends")]
pub async fn get_trends(state: web::Data<TrendsHandlerState>) -> HttpResponse {
    HttpResponse::Ok().json(state.store.current_hashtags())
}
