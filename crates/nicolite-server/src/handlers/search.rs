//! Search relay handler.

use axum::Json;
use axum::extract::{Query, State};
use nicolite_core::{SearchPage, SearchQuery};
use tracing::info;

use crate::error::ApiResult;
use crate::handlers::{Envelope, QueryPairs};
use crate::state::AppState;

/// Relay a keyword search to the snapshot API mirrors.
///
/// Reads `q`, `limit`, `offset` and `sort`. Numbers stay strings until
/// [`SearchQuery::from_params`] so malformed values fall back to defaults
/// instead of rejecting the request.
pub async fn search_videos(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> ApiResult<Json<Envelope<SearchPage>>> {
    let params = QueryPairs::from(pairs);
    let query = SearchQuery::from_params(
        params.first("q").unwrap_or_default(),
        params.first("limit"),
        params.first("offset"),
        params.first("sort"),
    )?;

    info!(
        keywords = %query.keywords,
        limit = query.limit,
        offset = query.offset,
        sort = query.sort.upstream_field(),
        "Searching"
    );

    let page = state.relay.search(&query).await?;
    Ok(Json(Envelope::ok(page)))
}
