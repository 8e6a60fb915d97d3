//! Handlers for `/plans` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/plans` | Whole collection, by start date |
//! | `POST`   | `/plans` | Body: [`CreateBody`]; 404 if the owner is unknown, 400 if invalid |
//! | `DELETE` | `/plans/:id` | 204, or 404 if not found |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use quillt_core::{
  Plan,
  plan::{NewPlan, PlanDraft},
  store::TripStore,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /plans`
pub async fn list<S>(State(state): State<AppState<S>>) -> Result<Json<Vec<Plan>>, ApiError>
where
  S: TripStore,
{
  let plans = state
    .store
    .list_plans()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(plans))
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub owner_id:    Uuid,
  pub location:    String,
  /// `YYYY-MM-DD`
  pub start_date:  String,
  /// `YYYY-MM-DD`, inclusive.
  pub end_date:    String,
  pub description: Option<String>,
}

/// `POST /plans`
///
/// New plans are always public. The owner's current display fields are
/// echoed onto the stored plan.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: TripStore,
{
  let owner = state
    .store
    .get_identity(body.owner_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("identity {} not found", body.owner_id)))?;

  let input = NewPlan::authored_by(&owner, PlanDraft {
    location:    body.location,
    start_date:  body.start_date,
    end_date:    body.end_date,
    description: body.description,
  });
  input
    .validate()
    .map_err(|e| ApiError::BadRequest(e.to_string()))?;

  let plan = state
    .store
    .create_plan(input)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  info!(plan = %plan.id, owner = %plan.owner_id, location = %plan.location, "created plan");
  Ok((StatusCode::CREATED, Json(plan)))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /plans/:id`
pub async fn delete_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: TripStore,
{
  let removed = state
    .store
    .delete_plan(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if !removed {
    return Err(ApiError::NotFound(format!("plan {id} not found")));
  }
  info!(plan = %id, "deleted plan");
  Ok(StatusCode::NO_CONTENT)
}
