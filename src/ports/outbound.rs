//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{DomainError, ModelError, PlanRecord};

/// Structured-output hint passed alongside a prompt.
///
/// Clients that support JSON mode embed `schema` in their instructions;
/// others may ignore it.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaHint {
    pub name: &'static str,
    pub schema: serde_json::Value,
}

/// Large-language-model client. Treated as an opaque text completion service.
#[async_trait::async_trait]
pub trait ModelClient: Send + Sync {
    /// Complete `prompt`, returning the raw model text.
    ///
    /// Implementations classify failures: `RateLimited` / `Quota` for
    /// exhausted allowance, `Malformed` for an undecodable reply envelope,
    /// `Transport` for everything else (including timeouts).
    async fn complete(&self, prompt: &str, schema_hint: &SchemaHint) -> Result<String, ModelError>;
}

/// Document store holding workout plans.
#[async_trait::async_trait]
pub trait PlanStore: Send + Sync {
    /// Read one plan by id. `Ok(None)` when it does not exist.
    async fn get_plan(&self, plan_id: &str) -> Result<Option<PlanRecord>, DomainError>;

    /// Insert or replace a plan document.
    async fn save_plan(&self, record: &PlanRecord) -> Result<(), DomainError>;

    /// All plans, oldest first.
    async fn list_plans(&self) -> Result<Vec<PlanRecord>, DomainError>;
}
