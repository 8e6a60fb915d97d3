//! [`LiveSession`]: the reconciliation loop.
//!
//! One background task per signed-in user:
//!
//! 1. Derive the view from the snapshot current at start.
//! 2. Wait for the next change notification.
//! 3. Re-derive from that notification's snapshot and publish.
//!
//! Each notification carries the whole collection, so notifications that
//! arrive while a derivation is running coalesce into the latest one without
//! losing state. Derivation is read-only and never writes to the store.

use std::sync::Arc;

use quillt_core::{DerivedView, Identity, derive_view, store::PlanSnapshot};
use tokio::{
  sync::{oneshot, watch},
  task::JoinHandle,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Health of the upstream plan feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Link {
  Connected,
  /// The feed closed. The view is the last one derived before the drop.
  Disconnected { reason: String },
}

/// What a live session publishes after every recomputation.
#[derive(Debug, Clone)]
pub struct LiveState {
  /// Revision of the snapshot the view was derived from.
  pub revision: u64,
  pub view:     Arc<DerivedView>,
  pub link:     Link,
}

/// A running reconciliation loop for one viewer.
///
/// Dropping the session aborts the loop; [`LiveSession::shutdown`] stops it
/// and waits. Either way no recomputation happens afterwards.
pub struct LiveSession {
  viewer: Identity,
  state:  watch::Receiver<LiveState>,
  stop:   Option<oneshot::Sender<()>>,
  task:   Option<JoinHandle<()>>,
}

impl LiveSession {
  /// Derive the initial view from `feed` and spawn the loop on the current
  /// tokio runtime.
  ///
  /// `known` is the explicit roster. Friends it lacks are resolved from the
  /// author snapshots on their plans, afresh on every cycle.
  pub fn start(
    mut feed: watch::Receiver<PlanSnapshot>,
    viewer: Identity,
    known: Vec<Identity>,
  ) -> Self {
    let snapshot = feed.borrow_and_update().clone();
    let view = derive_view(viewer.id, &snapshot.plans, &known);
    info!(
      viewer = %viewer.id,
      revision = snapshot.revision,
      overlaps = view.overlaps.len(),
      "live session started"
    );

    let (state_tx, state) = watch::channel(LiveState {
      revision: snapshot.revision,
      view:     Arc::new(view),
      link:     Link::Connected,
    });
    let (stop, stop_rx) = oneshot::channel();
    let task = tokio::spawn(reconcile(feed, viewer.id, known, state_tx, stop_rx));

    Self {
      viewer,
      state,
      stop: Some(stop),
      task: Some(task),
    }
  }

  pub fn viewer(&self) -> &Identity { &self.viewer }

  /// The most recently published state.
  pub fn current(&self) -> LiveState { self.state.borrow().clone() }

  /// A receiver that is notified after each recomputation. The channel
  /// closes when the loop ends.
  pub fn watch(&self) -> watch::Receiver<LiveState> { self.state.clone() }

  /// Stop the loop and wait for it to finish.
  pub async fn shutdown(mut self) {
    if let Some(stop) = self.stop.take() {
      let _ = stop.send(());
    }
    if let Some(task) = self.task.take() {
      let _ = task.await;
    }
    info!(viewer = %self.viewer.id, "live session stopped");
  }
}

impl Drop for LiveSession {
  fn drop(&mut self) {
    if let Some(task) = self.task.take() {
      task.abort();
    }
  }
}

async fn reconcile(
  mut feed: watch::Receiver<PlanSnapshot>,
  viewer_id: Uuid,
  known: Vec<Identity>,
  state: watch::Sender<LiveState>,
  mut stop: oneshot::Receiver<()>,
) {
  loop {
    tokio::select! {
      biased;

      _ = &mut stop => return,

      changed = feed.changed() => {
        if changed.is_err() {
          warn!(viewer = %viewer_id, "plan feed closed, keeping last view");
          state.send_modify(|s| {
            s.link = Link::Disconnected { reason: "plan feed closed".to_owned() };
          });
          return;
        }

        let snapshot = feed.borrow_and_update().clone();
        let view = derive_view(viewer_id, &snapshot.plans, &known);
        debug!(
          viewer = %viewer_id,
          revision = snapshot.revision,
          plans = snapshot.plans.len(),
          overlaps = view.overlaps.len(),
          "recomputed view"
        );

        state.send_replace(LiveState {
          revision: snapshot.revision,
          view:     Arc::new(view),
          link:     Link::Connected,
        });
      }
    }
  }
}
