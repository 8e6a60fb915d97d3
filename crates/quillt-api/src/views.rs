//! `GET /identities/:id/view`: the derived view for one viewer.
//!
//! The view is derived on every request from the current plan collection.
//! Responses carry a strong `ETag`; a matching `If-None-Match` yields
//! `304 Not Modified` with no body.

use axum::{
  Json,
  extract::{Path, State},
  http::{HeaderMap, HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use quillt_core::{derive_view, store::TripStore};
use uuid::Uuid;

use crate::{
  AppState,
  error::ApiError,
  etag::{compute_etag, if_none_match_hits},
};

pub async fn handler<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
  headers: HeaderMap,
) -> Result<Response, ApiError>
where
  S: TripStore,
{
  let store_err = |e: S::Error| ApiError::Store(Box::new(e));

  state
    .store
    .get_identity(id)
    .await
    .map_err(store_err)?
    .ok_or_else(|| ApiError::NotFound(format!("identity {id} not found")))?;

  let known = state.store.list_identities().await.map_err(store_err)?;
  let plans = state.store.list_plans().await.map_err(store_err)?;
  let view = derive_view(id, &plans, &known);
  let etag = compute_etag(&view)?;

  let hit = headers
    .get(header::IF_NONE_MATCH)
    .and_then(|v| v.to_str().ok())
    .is_some_and(|v| if_none_match_hits(v, &etag));
  let etag_value = HeaderValue::from_str(&etag)
    .map_err(|e| ApiError::Internal(format!("unencodable etag: {e}")))?;

  if hit {
    return Ok((StatusCode::NOT_MODIFIED, [(header::ETAG, etag_value)]).into_response());
  }
  Ok(([(header::ETAG, etag_value)], Json(view)).into_response())
}
