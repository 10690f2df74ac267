//! Metrics registry for Tally programs.
//!
//! Every compiled program declares the metrics it exports. Declarations land
//! here, in a [`MetricStore`] that is shared by all compilations in a process
//! and by whatever runtime later updates the metrics.
//!
//! # Registration policy
//!
//! The first writer of a name wins:
//!
//! - Registering an identical definition again (same kind, same dimension
//!   keys) is a no-op that hands back the existing [`MetricHandle`].
//! - Registering a different kind or different keys under a taken name fails
//!   with [`RegistryError::Conflict`].
//!
//! The check and the insert happen under a single write lock, so the policy
//! holds when several programs are compiled concurrently.

mod kind;
mod store;

pub use kind::MetricKind;
pub use store::{Keys, MetricDef, MetricHandle, MetricStore, RegistryError};
