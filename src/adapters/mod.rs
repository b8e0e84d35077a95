//! Infrastructure adapters. Implement ports.
//!
//! Model clients, plan stores, HTTP surface. Map errors to DomainError / ModelError.

pub mod ai;
pub mod http;
pub mod persistence;
