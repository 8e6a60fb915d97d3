//! [`SqliteStore`], the SQLite implementation of [`TripStore`] and
//! [`SessionStore`].

use std::{path::Path, sync::Arc};

use rusqlite::OptionalExtension as _;
use tokio::sync::{Mutex, watch};
use uuid::Uuid;

use quillt_core::{
  identity::{Identity, NewIdentity, placeholder_avatar},
  plan::{NewPlan, Plan},
  store::{PlanSnapshot, SessionStore, TripStore},
};

use crate::{
  Result,
  encode::{PLAN_COLUMNS, RawIdentity, RawPlan, encode_uuid, encode_visibility},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Quillt store backed by a single SQLite file.
///
/// Cloning is cheap; the connection and the notification channel are
/// reference-counted. The channel closes once the last clone is dropped.
#[derive(Clone)]
pub struct SqliteStore {
  conn:   tokio_rusqlite::Connection,
  feed:   Arc<watch::Sender<PlanSnapshot>>,
  /// Serialises write-then-publish so snapshots go out in write order.
  writes: Arc<Mutex<()>>,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    Self::init(conn).await
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    Self::init(conn).await
  }

  async fn init(conn: tokio_rusqlite::Connection) -> Result<Self> {
    conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;

    let plans = fetch_plans(&conn).await?;
    let (feed, _) = watch::channel(PlanSnapshot { revision: 0, plans: Arc::new(plans) });

    Ok(Self {
      conn,
      feed: Arc::new(feed),
      writes: Arc::new(Mutex::new(())),
    })
  }

  /// Run `write` and re-read the collection in one transaction.
  ///
  /// The transaction commits only if every row decodes, so a failed reload
  /// leaves the table as it was.
  async fn write_and_reload<T, F>(&self, write: F) -> Result<(T, Vec<Plan>)>
  where
    T: Send + 'static,
    F: FnOnce(&rusqlite::Connection) -> rusqlite::Result<T> + Send + 'static,
  {
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let value = write(&tx)?;
        let plans = match decode_plans(read_plans(&tx)?) {
          Ok(plans) => plans,
          // Dropping `tx` rolls the write back.
          Err(e) => return Ok(Err(e)),
        };
        tx.commit()?;
        Ok(Ok((value, plans)))
      })
      .await?
  }

  /// Push a new snapshot to subscribers. Callers hold the write lock.
  fn publish(&self, plans: Vec<Plan>) {
    let plans = Arc::new(plans);
    self.feed.send_modify(|snapshot| {
      snapshot.revision += 1;
      snapshot.plans = plans;
    });
  }
}

fn read_plans(conn: &rusqlite::Connection) -> rusqlite::Result<Vec<RawPlan>> {
  let mut stmt = conn.prepare(&format!(
    "SELECT {PLAN_COLUMNS} FROM plans ORDER BY start_date ASC, rowid ASC"
  ))?;
  let rows = stmt
    .query_map([], RawPlan::from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

fn decode_plans(raws: Vec<RawPlan>) -> Result<Vec<Plan>> {
  raws.into_iter().map(RawPlan::into_plan).collect()
}

async fn fetch_plans(conn: &tokio_rusqlite::Connection) -> Result<Vec<Plan>> {
  let raws = conn.call(|conn| Ok(read_plans(conn)?)).await?;
  decode_plans(raws)
}

// ─── TripStore impl ──────────────────────────────────────────────────────────

impl TripStore for SqliteStore {
  type Error = crate::Error;

  // ── Plans ─────────────────────────────────────────────────────────────────

  async fn list_plans(&self) -> Result<Vec<Plan>> { fetch_plans(&self.conn).await }

  async fn create_plan(&self, input: NewPlan) -> Result<Plan> {
    input.validate()?;

    let plan = Plan {
      id:          Uuid::new_v4(),
      owner_id:    input.owner_id,
      location:    input.location,
      start_date:  input.start_date,
      end_date:    input.end_date,
      description: input.description,
      visibility:  input.visibility,
      author:      input.author,
    };

    let id_str         = encode_uuid(plan.id);
    let owner_str      = encode_uuid(plan.owner_id);
    let location       = plan.location.clone();
    let start_date     = plan.start_date.clone();
    let end_date       = plan.end_date.clone();
    let description    = plan.description.clone();
    let visibility_str = encode_visibility(plan.visibility);
    let author         = plan.author.clone();

    let _guard = self.writes.lock().await;
    let ((), plans) = self
      .write_and_reload(move |conn| {
        conn.execute(
          "INSERT INTO plans (
             plan_id, owner_id, location, start_date, end_date, description,
             visibility, author_name, author_avatar, author_handle
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
          rusqlite::params![
            id_str,
            owner_str,
            location,
            start_date,
            end_date,
            description,
            visibility_str,
            author.name,
            author.avatar,
            author.handle,
          ],
        )?;
        Ok(())
      })
      .await?;
    self.publish(plans);

    Ok(plan)
  }

  async fn delete_plan(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);

    let _guard = self.writes.lock().await;
    let (removed, plans) = self
      .write_and_reload(move |conn| {
        let n = conn.execute("DELETE FROM plans WHERE plan_id = ?1", rusqlite::params![id_str])?;
        Ok(n > 0)
      })
      .await?;
    if removed {
      self.publish(plans);
    }

    Ok(removed)
  }

  fn subscribe(&self) -> watch::Receiver<PlanSnapshot> { self.feed.subscribe() }

  // ── Identities ────────────────────────────────────────────────────────────

  async fn add_identity(&self, input: NewIdentity) -> Result<Identity> {
    let id = Uuid::new_v4();
    let identity = Identity {
      id,
      display_name: input.display_name,
      avatar:       input.avatar.unwrap_or_else(|| placeholder_avatar(id)),
      handle:       input.handle,
    };

    let id_str = encode_uuid(identity.id);
    let name   = identity.display_name.clone();
    let avatar = identity.avatar.clone();
    let handle = identity.handle.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO identities (identity_id, display_name, avatar, handle)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![id_str, name, avatar, handle],
        )?;
        Ok(())
      })
      .await?;

    Ok(identity)
  }

  async fn get_identity(&self, id: Uuid) -> Result<Option<Identity>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawIdentity> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT identity_id, display_name, avatar, handle
             FROM identities WHERE identity_id = ?1",
            rusqlite::params![id_str],
            RawIdentity::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawIdentity::into_identity).transpose()
  }

  async fn list_identities(&self) -> Result<Vec<Identity>> {
    let raws: Vec<RawIdentity> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT identity_id, display_name, avatar, handle
           FROM identities ORDER BY rowid ASC",
        )?;
        let rows = stmt
          .query_map([], RawIdentity::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawIdentity::into_identity).collect()
  }
}

// ─── SessionStore impl ───────────────────────────────────────────────────────

impl SessionStore for SqliteStore {
  type Error = crate::Error;

  async fn get(&self, key: &str) -> Result<Option<String>> {
    let key = key.to_owned();
    let value: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT value FROM sessions WHERE key = ?1",
            rusqlite::params![key],
            |row| row.get(0),
          )
          .optional()?)
      })
      .await?;
    Ok(value)
  }

  async fn set(&self, key: &str, value: &str) -> Result<()> {
    let key = key.to_owned();
    let value = value.to_owned();
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO sessions (key, value) VALUES (?1, ?2)
           ON CONFLICT(key) DO UPDATE SET value = excluded.value",
          rusqlite::params![key, value],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn clear(&self, key: &str) -> Result<()> {
    let key = key.to_owned();
    self
      .conn
      .call(move |conn| {
        conn.execute("DELETE FROM sessions WHERE key = ?1", rusqlite::params![key])?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
