//! Core domain layer. No external I/O dependencies.
//!
//! Entities, static template catalogs and errors live here. Dependencies flow inward.

pub mod catalog;
pub mod entities;
pub mod errors;

pub use catalog::{DayTemplate, WEEKDAYS, catalog_for};
pub use entities::{
    DegradationReason, FailureKind, GeneratedSchedule, GenerationOutcome, GoalCategory,
    MAX_WEEKLY_DAYS, PlanParameters, PlanRecord, ScheduleSource, ScheduledDay, Session,
};
pub use errors::{DomainError, ModelError};
