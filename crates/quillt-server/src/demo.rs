//! `--seed-demo`: a small crowd of friends with overlapping summer trips.

use quillt_core::{
  Identity,
  identity::NewIdentity,
  plan::PlanDraft,
  store::TripStore,
};
use quillt_live::{publish_plan, sign_in};
use quillt_store_sqlite::SqliteStore;
use tracing::info;

struct Person {
  name:   &'static str,
  handle: &'static str,
  avatar: &'static str,
}

const DIANE: Person = Person {
  name:   "Diane Q.",
  handle: "@diane_q",
  avatar: "https://picsum.photos/seed/diane/200/200",
};

const FRIENDS: [Person; 3] = [
  Person {
    name:   "Jack S.",
    handle: "@jack_travels",
    avatar: "https://picsum.photos/seed/jack/200/200",
  },
  Person {
    name:   "Sarah M.",
    handle: "@sarah_mba",
    avatar: "https://picsum.photos/seed/sarah/200/200",
  },
  Person {
    name:   "Chen L.",
    handle: "@chen_tech",
    avatar: "https://picsum.photos/seed/chen/200/200",
  },
];

/// `(owner handle, location, start, end, description)`
const TRIPS: [(&str, &str, &str, &str, &str); 5] = [
  ("@jack_travels", "New York, NY", "2024-06-10", "2024-06-15", "Work conference + hanging out"),
  ("@sarah_mba", "San Francisco, CA", "2024-07-01", "2024-07-05", "Visiting family"),
  ("@chen_tech", "London, UK", "2024-08-10", "2024-08-20", "Summer break!"),
  ("@sarah_mba", "New York, NY", "2024-06-12", "2024-06-18", "Recruiting event"),
  ("@diane_q", "San Francisco, CA", "2024-05-20", "2024-05-25", "Quick client meeting"),
];

/// Load the demo crowd into an empty store and sign Diane in.
///
/// Returns `None` without touching anything if the store already holds
/// identities or plans.
pub async fn seed(store: &SqliteStore) -> anyhow::Result<Option<Identity>> {
  if !store.list_identities().await?.is_empty() || !store.list_plans().await?.is_empty() {
    info!("store is not empty, skipping demo seed");
    return Ok(None);
  }

  let mut people = Vec::with_capacity(FRIENDS.len() + 1);
  for p in std::iter::once(&DIANE).chain(FRIENDS.iter()) {
    let identity = store
      .add_identity(NewIdentity {
        display_name: p.name.to_owned(),
        handle:       p.handle.to_owned(),
        avatar:       Some(p.avatar.to_owned()),
      })
      .await?;
    people.push(identity);
  }

  for (handle, location, start, end, description) in TRIPS {
    let Some(author) = people.iter().find(|p| p.handle == handle) else {
      anyhow::bail!("demo trip names unknown handle {handle}");
    };
    publish_plan(store, author, PlanDraft {
      location:    location.to_owned(),
      start_date:  start.to_owned(),
      end_date:    end.to_owned(),
      description: Some(description.to_owned()),
    })
    .await?;
  }

  let diane = people.swap_remove(0);
  sign_in(store, &diane).await?;
  info!(identities = FRIENDS.len() + 1, plans = TRIPS.len(), "seeded demo data");
  Ok(Some(diane))
}
