//! `POST /captions`, body: `{"location":"Lisbon"}`.
//!
//! Always answers 200. The assist falls back to a fixed caption on failure.

use axum::{Json, extract::State};
use quillt_core::store::TripStore;
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct CaptionBody {
  pub location: String,
}

#[derive(Debug, Serialize)]
pub struct CaptionReply {
  pub caption: String,
}

pub async fn handler<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<CaptionBody>,
) -> Result<Json<CaptionReply>, ApiError>
where
  S: TripStore,
{
  let caption = state.captions.caption(body.location.trim()).await;
  Ok(Json(CaptionReply { caption }))
}
