//! Core types and the overlap engine for Quillt.
//!
//! Everything in here is pure: plans go in, overlaps come out. Storage,
//! transport, and presentation live in the other crates and depend on the
//! traits declared in [`store`] and [`caption`].

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod caption;
pub mod city;
pub mod error;
pub mod identity;
pub mod interval;
pub mod overlap;
pub mod plan;
pub mod roster;
pub mod store;
pub mod view;

pub use error::{Error, Result};
pub use identity::Identity;
pub use overlap::{Overlap, compute_overlaps};
pub use plan::Plan;
pub use view::{DerivedView, derive_view};

#[cfg(test)]
pub(crate) mod fixtures;
