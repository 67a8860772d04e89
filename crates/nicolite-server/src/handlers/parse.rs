//! Embed link handler.

use axum::Json;
use axum::extract::{Query, State};
use nicolite_core::{EmbedLinks, PlayerSize};

use crate::error::ApiResult;
use crate::handlers::{Envelope, QueryPairs};
use crate::state::AppState;

/// Extract a video id from `q` and return embed links for it.
///
/// Optional `w`/`h` size the iframe player.
pub async fn parse_input(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> ApiResult<Json<Envelope<EmbedLinks>>> {
    let params = QueryPairs::from(pairs);
    let size = PlayerSize::from_params(params.first("w"), params.first("h"));
    let links = state
        .relay
        .embed_links(params.first("q").unwrap_or_default(), size)?;

    Ok(Json(Envelope::ok(links)))
}
