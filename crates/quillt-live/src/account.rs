//! Session lifecycle and the plan creation flow.
//!
//! The signed-in identity id is kept under [`SESSION_KEY`] in an injected
//! [`SessionStore`], so it survives restarts without any process-wide state.

use quillt_core::{
  Identity, Plan,
  plan::{NewPlan, PlanDraft},
  store::{SESSION_KEY, SessionStore, TripStore},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{LiveSession, PublishError, SessionError};

/// Restore the signed-in identity recorded in `sessions`.
///
/// Returns `None` when nobody is signed in. A recorded id that no longer
/// names an identity (e.g. the directory was wiped) is cleared and also
/// yields `None`; the caller routes to sign-in either way.
pub async fn restore_session<S, T>(
  sessions: &S,
  directory: &T,
) -> Result<Option<Identity>, SessionError>
where
  S: SessionStore,
  T: TripStore,
{
  let stored = sessions
    .get(SESSION_KEY)
    .await
    .map_err(|e| SessionError::Session(Box::new(e)))?;
  let Some(raw) = stored else {
    return Ok(None);
  };

  let identity = match Uuid::parse_str(&raw) {
    Ok(id) => directory
      .get_identity(id)
      .await
      .map_err(|e| SessionError::Directory(Box::new(e)))?,
    Err(_) => None,
  };

  match identity {
    Some(identity) => {
      info!(viewer = %identity.id, handle = %identity.handle, "restored session");
      Ok(Some(identity))
    }
    None => {
      warn!(stored = %raw, "stored session names no known identity, clearing it");
      sessions
        .clear(SESSION_KEY)
        .await
        .map_err(|e| SessionError::Session(Box::new(e)))?;
      Ok(None)
    }
  }
}

/// Record `identity` as the signed-in user.
pub async fn sign_in<S: SessionStore>(sessions: &S, identity: &Identity) -> Result<(), SessionError> {
  sessions
    .set(SESSION_KEY, &identity.id.to_string())
    .await
    .map_err(|e| SessionError::Session(Box::new(e)))?;
  info!(viewer = %identity.id, handle = %identity.handle, "signed in");
  Ok(())
}

/// Tear down the live session, if any, then forget the signed-in user.
pub async fn sign_out<S: SessionStore>(
  sessions: &S,
  live: Option<LiveSession>,
) -> Result<(), SessionError> {
  if let Some(live) = live {
    live.shutdown().await;
  }
  sessions
    .clear(SESSION_KEY)
    .await
    .map_err(|e| SessionError::Session(Box::new(e)))?;
  info!("signed out");
  Ok(())
}

/// Publish a new plan for `author`, echoing their display fields onto it.
///
/// Invalid drafts are rejected before the store is touched. The new plan
/// reaches live sessions through the store's feed, not through this call.
pub async fn publish_plan<T: TripStore>(
  store: &T,
  author: &Identity,
  draft: PlanDraft,
) -> Result<Plan, PublishError> {
  let input = NewPlan::authored_by(author, draft);
  input.validate()?;

  let plan = store
    .create_plan(input)
    .await
    .map_err(|e| PublishError::Store(Box::new(e)))?;
  info!(
    plan = %plan.id,
    owner = %plan.owner_id,
    location = %plan.location,
    start = %plan.start_date,
    end = %plan.end_date,
    "published plan"
  );
  Ok(plan)
}
