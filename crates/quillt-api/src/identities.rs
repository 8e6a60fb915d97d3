//! Handlers for `/identities` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/identities` | Registration order |
//! | `POST` | `/identities` | Body: `{"display_name":"...","handle":"@...","avatar":null}` |
//! | `GET`  | `/identities/:id` | 404 if not found |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use quillt_core::{Identity, identity::NewIdentity, store::TripStore};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

/// `GET /identities`
pub async fn list<S>(State(state): State<AppState<S>>) -> Result<Json<Vec<Identity>>, ApiError>
where
  S: TripStore,
{
  let identities = state
    .store
    .list_identities()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(identities))
}

/// `POST /identities`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<NewIdentity>,
) -> Result<impl IntoResponse, ApiError>
where
  S: TripStore,
{
  if body.display_name.trim().is_empty() {
    return Err(ApiError::BadRequest("display_name must not be empty".into()));
  }
  let identity = state
    .store
    .add_identity(body)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(identity)))
}

/// `GET /identities/:id`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Identity>, ApiError>
where
  S: TripStore,
{
  let identity = state
    .store
    .get_identity(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("identity {id} not found")))?;
  Ok(Json(identity))
}
