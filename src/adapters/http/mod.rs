//! HTTP adapter. axum router over the inbound `PlanPort`.
//!
//! The caller's identity comes from the request (path or body) and is turned
//! into an explicit `Session` per request.

use crate::domain::{
    DegradationReason, DomainError, GenerationOutcome, PlanRecord, ScheduleSource, ScheduledDay,
    Session,
};
use crate::ports::PlanPort;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

const BASIC_PLAN_SUGGESTION: &str = "Use /api/generate-basic-plan endpoint";

pub type SharedPlanPort = Arc<dyn PlanPort>;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

pub struct AppError {
    status: StatusCode,
    error: String,
    message: String,
    suggestion: Option<&'static str>,
}

impl AppError {
    fn bad_request(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        Self {
            status: StatusCode::BAD_REQUEST,
            error: msg.clone(),
            message: msg,
            suggestion: None,
        }
    }

    fn upstream_unavailable(detail: String) -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            error: "AI workout generator unavailable".to_string(),
            message: format!(
                "Please retry later or try the basic workout plan generator instead ({detail})"
            ),
            suggestion: Some(BASIC_PLAN_SUGGESTION),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        let (status, error) = match &err {
            DomainError::Validation(_) => (StatusCode::BAD_REQUEST, "Invalid request"),
            DomainError::NotFound(_) => (StatusCode::NOT_FOUND, "Workout plan not found"),
            DomainError::Forbidden(_) => {
                (StatusCode::FORBIDDEN, "Unauthorized access to workout plan")
            }
            DomainError::UpstreamUnavailable(detail) => {
                return Self::upstream_unavailable(detail.clone());
            }
            DomainError::Store(_) | DomainError::Config(_) => {
                error!(error = %err, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };
        Self {
            status,
            error: error.to_string(),
            message: err.to_string(),
            suggestion: None,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: "Invalid request body".to_string(),
            message: rejection.body_text(),
            suggestion: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut body = serde_json::json!({ "error": self.error, "message": self.message });
        if let Some(suggestion) = self.suggestion {
            body["suggestion"] = serde_json::Value::String(suggestion.to_string());
        }
        (self.status, Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    pub user_id: Option<String>,
    pub plan_id: Option<String>,
}

impl PlanRequest {
    fn session_and_plan(&self) -> Result<(Session, &str), AppError> {
        match (self.user_id.as_deref(), self.plan_id.as_deref()) {
            (Some(user), Some(plan)) if !user.trim().is_empty() && !plan.trim().is_empty() => {
                Ok((Session::new(user)?, plan))
            }
            _ => Err(AppError::bad_request(
                "Missing required parameters: userId and planId",
            )),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub success: bool,
    pub plan: PlanRecord,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePlanResponse {
    pub success: bool,
    pub plan: Vec<ScheduledDay>,
    pub source: ScheduleSource,
    pub degraded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degradation_reason: Option<DegradationReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl GeneratePlanResponse {
    fn from_outcome(outcome: GenerationOutcome) -> Result<Self, AppError> {
        match outcome {
            GenerationOutcome::AiGenerated(schedule) => Ok(Self {
                success: true,
                plan: schedule.days,
                source: ScheduleSource::Ai,
                degraded: false,
                degradation_reason: None,
                message: None,
            }),
            GenerationOutcome::Degraded { schedule, reason } => Ok(Self {
                success: true,
                plan: schedule.days,
                source: ScheduleSource::Template,
                degraded: true,
                degradation_reason: Some(reason),
                message: Some(match reason {
                    DegradationReason::QuotaExceeded => {
                        "AI generation quota exceeded; basic workout plan generated".to_string()
                    }
                    DegradationReason::MalformedResponse => {
                        "AI response was unusable; basic workout plan generated".to_string()
                    }
                }),
            }),
            GenerationOutcome::Failed { detail, .. } => {
                Err(DomainError::UpstreamUnavailable(detail).into())
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BasicPlanResponse {
    pub success: bool,
    pub plan: Vec<ScheduledDay>,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTestPlanResponse {
    pub success: bool,
    pub message: &'static str,
    pub plan_id: String,
    pub plan: PlanRecord,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredPlan {
    pub plan_id: String,
    pub data: PlanRecord,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPlans {
    pub user_id: String,
    pub plans: Vec<StoredPlan>,
}

#[derive(Debug, Serialize)]
pub struct TestDataResponse {
    pub success: bool,
    pub message: &'static str,
    pub users: Vec<UserPlans>,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn build_router(api: SharedPlanPort) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/plan/{user_id}/{plan_id}", get(get_plan))
        .route("/api/generate-plan", post(generate_plan))
        .route("/api/generate-basic-plan", post(generate_basic_plan))
        .route("/api/create-test-plan", post(create_test_plan))
        .route("/api/test-data", get(test_data))
        .layer(CorsLayer::permissive())
        .with_state(api)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub async fn run_serve(api: SharedPlanPort, bind: &str, port: u16) -> anyhow::Result<()> {
    let app = build_router(api);
    let addr = listen_addr(bind, port)?;
    info!("workout plan API listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("workout plan API shut down");
    Ok(())
}

/// Accepts bare IPv4 or IPv6 addresses (`0.0.0.0`, `::`, `[::1]`).
fn listen_addr(bind: &str, port: u16) -> anyhow::Result<SocketAddr> {
    let host = bind.trim().trim_start_matches('[').trim_end_matches(']');
    let ip: IpAddr = host
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid bind address {bind:?}: {e}"))?;
    Ok(SocketAddr::new(ip, port))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn index() -> &'static str {
    "Workout plan generator backend is running!"
}

async fn get_plan(
    State(api): State<SharedPlanPort>,
    Path((user_id, plan_id)): Path<(String, String)>,
) -> Result<Response, AppError> {
    info!(%user_id, %plan_id, "GET plan");
    let session = Session::new(user_id)?;
    let plan = api.get_plan(&session, &plan_id).await?;
    Ok(Json(PlanResponse {
        success: true,
        plan,
    })
    .into_response())
}

async fn generate_plan(
    State(api): State<SharedPlanPort>,
    body: Result<Json<PlanRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(req) = body?;
    let (session, plan_id) = req.session_and_plan()?;
    let outcome = api.generate_plan(&session, plan_id).await?;
    Ok(Json(GeneratePlanResponse::from_outcome(outcome)?).into_response())
}

async fn generate_basic_plan(
    State(api): State<SharedPlanPort>,
    body: Result<Json<PlanRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(req) = body?;
    let (session, plan_id) = req.session_and_plan()?;
    let schedule = api.generate_basic_plan(&session, plan_id).await?;
    Ok(Json(BasicPlanResponse {
        success: true,
        plan: schedule.days,
        message: "Basic workout plan generated",
    })
    .into_response())
}

async fn create_test_plan(
    State(api): State<SharedPlanPort>,
    body: Result<Json<PlanRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(req) = body?;
    let user_id = req
        .user_id
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| AppError::bad_request("Missing required parameter: userId"))?;
    let plan = api.create_test_plan(&Session::new(user_id)?).await?;
    Ok(Json(CreateTestPlanResponse {
        success: true,
        message: "Test plan created successfully",
        plan_id: plan.id.clone(),
        plan,
    })
    .into_response())
}

async fn test_data(State(api): State<SharedPlanPort>) -> Result<Response, AppError> {
    let users = api
        .list_plans_by_owner()
        .await?
        .into_iter()
        .map(|owner| UserPlans {
            user_id: owner.user_id,
            plans: owner
                .plans
                .into_iter()
                .map(|p| StoredPlan {
                    plan_id: p.id.clone(),
                    data: p,
                })
                .collect(),
        })
        .collect();
    Ok(Json(TestDataResponse {
        success: true,
        message: "Available data in plan store:",
        users,
    })
    .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listen_addr_accepts_ipv4_and_ipv6() {
        assert_eq!(listen_addr("0.0.0.0", 3001).unwrap().to_string(), "0.0.0.0:3001");
        assert_eq!(listen_addr("::", 3001).unwrap().to_string(), "[::]:3001");
        assert_eq!(listen_addr("[::1]", 80).unwrap().to_string(), "[::1]:80");
        assert!(listen_addr("localhost", 80).is_err());
    }
}
