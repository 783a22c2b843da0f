//! In-memory implementations of the credential and goal stores.

pub mod goals;
pub mod record_map;
pub mod users;

pub use goals::InMemoryGoalStore;
pub use record_map::RecordMap;
pub use users::InMemoryUserStore;
