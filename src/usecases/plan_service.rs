//! Plan service. Loads stored plans, enforces ownership, and drives generation.
//!
//! Coordinates between the plan store (data), the orchestrator (AI with
//! fallback) and the template engine (basic plans).

use crate::domain::{
    DomainError, GeneratedSchedule, GenerationOutcome, PlanParameters, PlanRecord, Session,
};
use crate::ports::{OwnerPlans, PlanPort, PlanStore};
use crate::usecases::orchestrator::GenerationOrchestrator;
use crate::usecases::template_engine::PlanTemplateEngine;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};

pub struct PlanService {
    store: Arc<dyn PlanStore>,
    orchestrator: GenerationOrchestrator,
    engine: PlanTemplateEngine,
}

impl PlanService {
    /// Create a new plan service.
    ///
    /// # Arguments
    /// * `store` - Plan store implementation (SQLite, JSON file, ...)
    /// * `orchestrator` - AI generation with template fallback
    /// * `engine` - Template engine for basic plans
    pub fn new(
        store: Arc<dyn PlanStore>,
        orchestrator: GenerationOrchestrator,
        engine: PlanTemplateEngine,
    ) -> Self {
        Self {
            store,
            orchestrator,
            engine,
        }
    }

    async fn load_owned(&self, session: &Session, plan_id: &str) -> Result<PlanRecord, DomainError> {
        if plan_id.trim().is_empty() {
            return Err(DomainError::Validation(
                "missing required parameter: planId".to_string(),
            ));
        }
        let record = self
            .store
            .get_plan(plan_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("no plan found with planId: {plan_id}")))?;

        if record.user_id != session.owner_id() {
            warn!(
                plan_id,
                expected = session.owner_id(),
                found = %record.user_id,
                "plan owner mismatch"
            );
            return Err(DomainError::Forbidden(
                "unauthorized access to workout plan".to_string(),
            ));
        }
        Ok(record)
    }
}

#[async_trait::async_trait]
impl PlanPort for PlanService {
    async fn get_plan(&self, session: &Session, plan_id: &str) -> Result<PlanRecord, DomainError> {
        let record = self.load_owned(session, plan_id).await?;
        info!(plan_id, owner = session.owner_id(), "plan found");
        Ok(record)
    }

    async fn generate_plan(
        &self,
        session: &Session,
        plan_id: &str,
    ) -> Result<GenerationOutcome, DomainError> {
        let record = self.load_owned(session, plan_id).await?;
        let params = PlanParameters::from_record(&record)?;
        let outcome = self.orchestrator.generate_plan(&params).await;
        info!(
            plan_id,
            source = ?outcome.source(),
            degraded = ?outcome.degradation(),
            "generation finished"
        );
        Ok(outcome)
    }

    async fn generate_basic_plan(
        &self,
        session: &Session,
        plan_id: &str,
    ) -> Result<GeneratedSchedule, DomainError> {
        let record = self.load_owned(session, plan_id).await?;
        let params = PlanParameters::from_record(&record)?;
        Ok(self.engine.generate(&params))
    }

    async fn create_test_plan(&self, session: &Session) -> Result<PlanRecord, DomainError> {
        let record = PlanRecord {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: session.owner_id().to_string(),
            name: Some("Test Plan".to_string()),
            goal: Some("build-muscle".to_string()),
            fitness_level: Some("Intermediate".to_string()),
            frequency: Some(serde_json::Value::from(4_u32)),
            equipment: Some("Dumbbells, resistance bands".to_string()),
            workout_time: Some("45 minutes".to_string()),
            duration: Some(8),
            plan_type: None,
            time_period: None,
            goal_weight: None,
            created_at: Utc::now(),
        };
        self.store.save_plan(&record).await?;
        info!(plan_id = %record.id, owner = session.owner_id(), "test plan created");
        Ok(record)
    }

    async fn list_plans_by_owner(&self) -> Result<Vec<OwnerPlans>, DomainError> {
        let mut by_owner: BTreeMap<String, Vec<PlanRecord>> = BTreeMap::new();
        for record in self.store.list_plans().await? {
            by_owner.entry(record.user_id.clone()).or_default().push(record);
        }
        Ok(by_owner
            .into_iter()
            .map(|(user_id, plans)| OwnerPlans { user_id, plans })
            .collect())
    }
}
