//! unifit: workout plan API with Hexagonal Architecture.
//!
//! AI-generated weekly schedules, degrading to deterministic templates when
//! the model is out of quota or replies with something unusable.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
