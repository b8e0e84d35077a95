//! Inbound port. The HTTP adapter calls into the application through this.

use crate::domain::{DomainError, GeneratedSchedule, GenerationOutcome, PlanRecord, Session};
use serde::Serialize;

/// All stored plans of one owner (diagnostic listing).
#[derive(Debug, Clone, Serialize)]
pub struct OwnerPlans {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub plans: Vec<PlanRecord>,
}

/// Plan use cases exposed to inbound adapters.
///
/// Every call that touches a specific plan takes the caller's [`Session`];
/// ownership is checked before any generation work starts.
#[async_trait::async_trait]
pub trait PlanPort: Send + Sync {
    /// Fetch one plan. `NotFound` if absent, `Forbidden` if owned by someone else.
    async fn get_plan(&self, session: &Session, plan_id: &str) -> Result<PlanRecord, DomainError>;

    /// Generate a schedule, preferring the model and degrading to templates when safe.
    async fn generate_plan(
        &self,
        session: &Session,
        plan_id: &str,
    ) -> Result<GenerationOutcome, DomainError>;

    /// Generate a schedule from templates only. Never calls the model.
    async fn generate_basic_plan(
        &self,
        session: &Session,
        plan_id: &str,
    ) -> Result<GeneratedSchedule, DomainError>;

    /// Store a fixed sample plan for the session owner.
    async fn create_test_plan(&self, session: &Session) -> Result<PlanRecord, DomainError>;

    /// Every stored plan, grouped by owner.
    async fn list_plans_by_owner(&self) -> Result<Vec<OwnerPlans>, DomainError>;
}
