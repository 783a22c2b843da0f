//! Goals domain module.
//!
//! Business rules for goals: field validation, owner-scoped reads and
//! ownership-checked mutation. No IO beyond the `GoalStore` port.

pub mod error;
pub mod goal;
pub mod service;
pub mod store;

pub use error::GoalError;
pub use goal::{Goal, GoalChanges, NewGoal};
pub use service::GoalService;
pub use store::GoalStore;
