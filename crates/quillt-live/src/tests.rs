//! Live session tests against an in-memory `SqliteStore`.

use std::time::Duration;

use quillt_core::{
  Identity,
  identity::NewIdentity,
  plan::PlanDraft,
  store::{SESSION_KEY, SessionStore, TripStore},
};
use quillt_store_sqlite::SqliteStore;

use crate::{
  Link, LiveSession, PublishError, publish_plan, restore_session, sign_in, sign_out,
};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

async fn person(s: &SqliteStore, name: &str, handle: &str) -> Identity {
  s.add_identity(NewIdentity {
    display_name: name.into(),
    handle:       handle.into(),
    avatar:       None,
  })
  .await
  .unwrap()
}

fn draft(location: &str, start: &str, end: &str) -> PlanDraft {
  PlanDraft {
    location:    location.into(),
    start_date:  start.into(),
    end_date:    end.into(),
    description: None,
  }
}

// ─── Reconciliation ──────────────────────────────────────────────────────────

#[tokio::test]
async fn initial_view_is_derived_on_start() {
  let s = store().await;
  let diane = person(&s, "Diane Q.", "@diane_q").await;
  let sarah = person(&s, "Sarah M.", "@sarah_mba").await;
  publish_plan(&s, &diane, draft("SF", "2024-07-02", "2024-07-06")).await.unwrap();
  publish_plan(&s, &sarah, draft("San Francisco, CA", "2024-07-01", "2024-07-05"))
    .await
    .unwrap();

  let live = LiveSession::start(s.subscribe(), diane.clone(), vec![]);
  let state = live.current();
  assert_eq!(state.revision, 2);
  assert_eq!(state.link, Link::Connected);
  assert_eq!(state.view.my_plans.len(), 1);
  assert_eq!(state.view.overlaps.len(), 1);
  assert_eq!(state.view.overlaps[0].friend.display_name, "Sarah M.");
  assert_eq!(state.view.overlaps[0].overlap_start, "2024-07-02");
  assert_eq!(state.view.overlaps[0].overlap_end, "2024-07-05");
}

#[tokio::test]
async fn new_friend_plan_appears_within_one_cycle() {
  let s = store().await;
  let diane = person(&s, "Diane Q.", "@diane_q").await;
  let sarah = person(&s, "Sarah M.", "@sarah_mba").await;
  publish_plan(&s, &diane, draft("SF", "2024-07-02", "2024-07-06")).await.unwrap();

  let live = LiveSession::start(s.subscribe(), diane.clone(), vec![]);
  let mut rx = live.watch();
  assert!(live.current().view.overlaps.is_empty());
  assert!(live.current().view.friends.is_empty());

  publish_plan(&s, &sarah, draft("San Francisco, CA", "2024-07-01", "2024-07-05"))
    .await
    .unwrap();
  rx.changed().await.unwrap();

  let state = rx.borrow_and_update().clone();
  assert_eq!(state.revision, 2);
  assert_eq!(state.view.friends, vec![sarah.clone()]);
  assert_eq!(state.view.overlaps.len(), 1);
  assert_eq!(state.view.overlaps[0].city, "SF");
}

#[tokio::test]
async fn deleting_a_plan_removes_its_overlap() {
  let s = store().await;
  let diane = person(&s, "Diane Q.", "@diane_q").await;
  let jack = person(&s, "Jack S.", "@jack_travels").await;
  publish_plan(&s, &diane, draft("New York", "2024-06-14", "2024-06-20")).await.unwrap();
  let jacks = publish_plan(&s, &jack, draft("New York, NY", "2024-06-10", "2024-06-15"))
    .await
    .unwrap();

  let live = LiveSession::start(s.subscribe(), diane.clone(), vec![jack.clone()]);
  let mut rx = live.watch();
  assert_eq!(live.current().view.overlaps.len(), 1);

  s.delete_plan(jacks.id).await.unwrap();
  rx.changed().await.unwrap();
  assert!(rx.borrow_and_update().view.overlaps.is_empty());
}

#[tokio::test]
async fn no_recomputation_after_shutdown() {
  let s = store().await;
  let diane = person(&s, "Diane Q.", "@diane_q").await;
  let live = LiveSession::start(s.subscribe(), diane.clone(), vec![]);
  let mut rx = live.watch();

  live.shutdown().await;
  publish_plan(&s, &diane, draft("Paris", "2024-03-01", "2024-03-05")).await.unwrap();

  assert!(rx.changed().await.is_err());
  assert_eq!(rx.borrow().revision, 0);
  assert!(rx.borrow().view.my_plans.is_empty());
}

#[tokio::test]
async fn dropping_the_session_stops_the_loop() {
  let s = store().await;
  let diane = person(&s, "Diane Q.", "@diane_q").await;
  let live = LiveSession::start(s.subscribe(), diane.clone(), vec![]);
  let mut rx = live.watch();

  drop(live);
  let closed = tokio::time::timeout(Duration::from_secs(1), rx.changed()).await;
  assert!(matches!(closed, Ok(Err(_))));
}

#[tokio::test]
async fn upstream_drop_keeps_last_view() {
  let s = store().await;
  let diane = person(&s, "Diane Q.", "@diane_q").await;
  publish_plan(&s, &diane, draft("Paris", "2024-03-01", "2024-03-05")).await.unwrap();

  let live = LiveSession::start(s.subscribe(), diane.clone(), vec![]);
  let mut rx = live.watch();
  drop(s);

  rx.changed().await.unwrap();
  let state = rx.borrow_and_update().clone();
  assert!(matches!(state.link, Link::Disconnected { .. }));
  assert_eq!(state.revision, 1);
  assert_eq!(state.view.my_plans.len(), 1);
}

// ─── Publishing ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn publish_rejects_invalid_draft_without_writing() {
  let s = store().await;
  let diane = person(&s, "Diane Q.", "@diane_q").await;

  let err = publish_plan(&s, &diane, draft("Paris", "2024-03-05", "2024-03-01"))
    .await
    .unwrap_err();
  assert!(matches!(err, PublishError::Invalid(_)));
  assert!(s.list_plans().await.unwrap().is_empty());
}

#[tokio::test]
async fn published_plan_carries_author_snapshot() {
  let s = store().await;
  let diane = person(&s, "Diane Q.", "@diane_q").await;

  let plan = publish_plan(&s, &diane, draft("Paris", "2024-03-01", "2024-03-05"))
    .await
    .unwrap();
  assert_eq!(plan.owner_id, diane.id);
  assert_eq!(plan.author.handle.as_deref(), Some("@diane_q"));
}

// ─── Sessions ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn restore_without_session_returns_none() {
  let s = store().await;
  assert!(restore_session(&s, &s).await.unwrap().is_none());
}

#[tokio::test]
async fn sign_in_then_restore() {
  let s = store().await;
  let diane = person(&s, "Diane Q.", "@diane_q").await;

  sign_in(&s, &diane).await.unwrap();
  assert_eq!(restore_session(&s, &s).await.unwrap(), Some(diane));
}

#[tokio::test]
async fn dangling_session_is_cleared() {
  let s = store().await;
  s.set(SESSION_KEY, &uuid::Uuid::new_v4().to_string()).await.unwrap();

  assert!(restore_session(&s, &s).await.unwrap().is_none());
  assert_eq!(s.get(SESSION_KEY).await.unwrap(), None);
}

#[tokio::test]
async fn garbage_session_is_cleared() {
  let s = store().await;
  s.set(SESSION_KEY, "not-a-uuid").await.unwrap();

  assert!(restore_session(&s, &s).await.unwrap().is_none());
  assert_eq!(s.get(SESSION_KEY).await.unwrap(), None);
}

#[tokio::test]
async fn sign_out_clears_session_and_stops_live_view() {
  let s = store().await;
  let diane = person(&s, "Diane Q.", "@diane_q").await;
  sign_in(&s, &diane).await.unwrap();

  let live = LiveSession::start(s.subscribe(), diane.clone(), vec![]);
  let mut rx = live.watch();
  sign_out(&s, Some(live)).await.unwrap();

  assert_eq!(s.get(SESSION_KEY).await.unwrap(), None);
  assert!(rx.changed().await.is_err());
}
