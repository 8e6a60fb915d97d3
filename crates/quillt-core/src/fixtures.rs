//! Shared builders for unit tests.

use uuid::Uuid;

use crate::{
  identity::Identity,
  plan::{AuthorSnapshot, Plan, Visibility},
};

pub fn identity(name: &str, handle: &str) -> Identity {
  let id = Uuid::new_v4();
  Identity {
    id,
    display_name: name.into(),
    avatar: format!("https://picsum.photos/seed/{id}/200/200"),
    handle: handle.into(),
  }
}

/// A plan with no embedded author data.
pub fn plan_for(owner_id: Uuid, location: &str, start: &str, end: &str) -> Plan {
  Plan {
    id: Uuid::new_v4(),
    owner_id,
    location: location.into(),
    start_date: start.into(),
    end_date: end.into(),
    description: None,
    visibility: Visibility::Public,
    author: AuthorSnapshot::default(),
  }
}

/// A plan whose author snapshot carries only a display name.
pub fn authored_plan(owner_id: Uuid, name: &str, location: &str, start: &str, end: &str) -> Plan {
  let mut plan = plan_for(owner_id, location, start, end);
  plan.author.name = Some(name.into());
  plan
}

/// The demo data set: Diane is the viewer, Jack, Sarah and Chen are friends.
pub struct WorkedExample {
  pub diane:   Identity,
  pub jack:    Identity,
  pub sarah:   Identity,
  pub chen:    Identity,
  /// Jack/NY, Sarah/SF, Chen/London, Sarah/NY, Diane/SF, in that order.
  pub plans:   Vec<Plan>,
}

impl WorkedExample {
  pub fn new() -> Self {
    let diane = identity("Diane Q.", "@diane_q");
    let jack = identity("Jack S.", "@jack_travels");
    let sarah = identity("Sarah M.", "@sarah_mba");
    let chen = identity("Chen L.", "@chen_tech");

    let plans = vec![
      plan_for(jack.id, "New York, NY", "2024-06-10", "2024-06-15"),
      plan_for(sarah.id, "San Francisco, CA", "2024-07-01", "2024-07-05"),
      plan_for(chen.id, "London, UK", "2024-08-10", "2024-08-20"),
      plan_for(sarah.id, "New York, NY", "2024-06-12", "2024-06-18"),
      plan_for(diane.id, "SF", "2024-05-20", "2024-05-25"),
    ];

    Self { diane, jack, sarah, chen, plans }
  }

  pub fn friends(&self) -> Vec<Identity> {
    vec![self.jack.clone(), self.sarah.clone(), self.chen.clone()]
  }

  pub fn viewer_plans(&self) -> Vec<Plan> {
    self
      .plans
      .iter()
      .filter(|p| p.owner_id == self.diane.id)
      .cloned()
      .collect()
  }
}
