//! `lifegoals-core` — shared domain primitives.
//!
//! Ids, the domain error model, and the time/id capabilities that stores and
//! services receive explicitly instead of reaching for globals.

pub mod clock;
pub mod entity;
pub mod error;
pub mod id;

pub use clock::{Clock, FixedClock, IdGenerator, SystemClock, UuidV7Generator};
pub use entity::Entity;
pub use error::DomainError;
pub use id::{GoalId, UserId};
