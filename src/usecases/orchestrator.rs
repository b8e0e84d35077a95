//! AI generation with template fallback.
//!
//! One invocation makes at most one model call and ends in exactly one of:
//! AI-sourced schedule, degraded template schedule, or hard failure.
//!
//! | Model result                     | Outcome                              |
//! |----------------------------------|--------------------------------------|
//! | valid schedule, right day count  | `AiGenerated`                        |
//! | `RateLimited` / `Quota`          | `Degraded { QuotaExceeded }`         |
//! | `Malformed` or unparseable text  | `Degraded { MalformedResponse }`     |
//! | `Transport` or timeout           | `Failed { UpstreamUnavailable }`     |

use crate::domain::{
    DegradationReason, FailureKind, GenerationOutcome, ModelError, PlanParameters,
};
use crate::ports::ModelClient;
use crate::usecases::response_parser::{build_prompt, parse_schedule, schedule_schema};
use crate::usecases::template_engine::PlanTemplateEngine;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Default bound on a single model call.
pub const DEFAULT_MODEL_TIMEOUT: Duration = Duration::from_secs(30);

pub struct GenerationOrchestrator {
    model: Arc<dyn ModelClient>,
    engine: PlanTemplateEngine,
    timeout: Duration,
}

impl GenerationOrchestrator {
    pub fn new(model: Arc<dyn ModelClient>, engine: PlanTemplateEngine) -> Self {
        Self {
            model,
            engine,
            timeout: DEFAULT_MODEL_TIMEOUT,
        }
    }

    /// Override the model call timeout. Elapsed calls count as transport failures.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn generate_plan(&self, params: &PlanParameters) -> GenerationOutcome {
        let expected_days = params.weekly_days();
        let prompt = build_prompt(params);
        info!(
            goal = %params.goal,
            days = expected_days,
            prompt_len = prompt.len(),
            "requesting AI schedule"
        );

        let schema = schedule_schema();
        let call = self.model.complete(&prompt, &schema);
        let reply = tokio::time::timeout(self.timeout, call)
            .await
            .unwrap_or_else(|_| {
                Err(ModelError::Transport(format!(
                    "model call timed out after {:?}",
                    self.timeout
                )))
            });

        match reply {
            Ok(raw) => match parse_schedule(&raw, expected_days) {
                Ok(schedule) => {
                    info!(days = schedule.len(), "AI schedule accepted");
                    GenerationOutcome::AiGenerated(schedule)
                }
                Err(e) => {
                    warn!(error = %e, raw_len = raw.len(), "AI reply failed validation");
                    self.degrade(params, DegradationReason::MalformedResponse)
                }
            },
            Err(ModelError::RateLimited(msg)) | Err(ModelError::Quota(msg)) => {
                warn!(error = %msg, "model allowance exhausted");
                self.degrade(params, DegradationReason::QuotaExceeded)
            }
            Err(ModelError::Malformed(msg)) => {
                warn!(error = %msg, "model returned malformed envelope");
                self.degrade(params, DegradationReason::MalformedResponse)
            }
            Err(ModelError::Transport(msg)) => {
                warn!(error = %msg, "model unavailable, not degrading");
                GenerationOutcome::Failed {
                    kind: FailureKind::UpstreamUnavailable,
                    detail: msg,
                }
            }
        }
    }

    fn degrade(&self, params: &PlanParameters, reason: DegradationReason) -> GenerationOutcome {
        let schedule = self.engine.generate(params);
        info!(%reason, days = schedule.len(), "serving template schedule");
        GenerationOutcome::Degraded { schedule, reason }
    }
}
