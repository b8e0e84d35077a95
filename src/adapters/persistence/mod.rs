//! Plan store adapters. Implement PlanStore.

pub mod json_store;
pub mod sqlite_repo;

pub use json_store::JsonPlanStore;
pub use sqlite_repo::SqliteRepo;
