//! Infrastructure layer: storage adapters for the domain ports.

pub mod store;

pub use store::{InMemoryGoalStore, InMemoryUserStore};
