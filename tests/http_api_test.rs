//! End-to-end tests for the HTTP surface: router + plan service + JSON store + mock model.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use unifit::adapters::ai::MockAiAdapter;
use unifit::adapters::http::build_router;
use unifit::adapters::persistence::JsonPlanStore;
use unifit::domain::{ModelError, PlanRecord};
use unifit::ports::{ModelClient, PlanPort, PlanStore};
use unifit::usecases::{GenerationOrchestrator, PlanService, PlanTemplateEngine};

// ===========================================================================
// Test harness
// ===========================================================================

struct TestApp {
    router: axum::Router,
    store: Arc<JsonPlanStore>,
    model: Arc<MockAiAdapter>,
    _dir: tempfile::TempDir,
}

impl TestApp {
    async fn new(model: MockAiAdapter) -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let store = Arc::new(JsonPlanStore::new(dir.path().join("plans.json")));
        store.load().await.expect("load empty store");
        let model = Arc::new(model);

        let engine = PlanTemplateEngine::new();
        let orchestrator =
            GenerationOrchestrator::new(Arc::clone(&model) as Arc<dyn ModelClient>, engine);
        let service: Arc<dyn PlanPort> = Arc::new(PlanService::new(
            Arc::clone(&store) as Arc<dyn PlanStore>,
            orchestrator,
            engine,
        ));

        Self {
            router: build_router(service),
            store,
            model,
            _dir: dir,
        }
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send(req).await
    }

    async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let req = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(req).await
    }

    async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), 1_048_576)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    async fn seed(&self, id: &str, owner: &str, goal: &str, frequency: Value) {
        let record: PlanRecord = serde_json::from_value(json!({
            "id": id,
            "userId": owner,
            "name": "My plan",
            "goal": goal,
            "fitness_level": "Beginner",
            "frequency": frequency,
            "created_at": "2025-01-06T08:00:00Z",
        }))
        .unwrap();
        self.store.save_plan(&record).await.unwrap();
    }
}

fn titles(plan: &Value) -> Vec<&str> {
    plan.as_array()
        .expect("plan should be an array")
        .iter()
        .map(|d| d["title"].as_str().unwrap())
        .collect()
}

// ===========================================================================
// Tests
// ===========================================================================

#[tokio::test]
async fn test_index_is_alive() {
    let app = TestApp::new(MockAiAdapter::with_delay(0)).await;
    let req = Request::builder().uri("/").body(Body::empty()).unwrap();
    let resp = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_get_plan_found_forbidden_missing() {
    let app = TestApp::new(MockAiAdapter::with_delay(0)).await;
    app.seed("plan-1", "alice", "weight-loss", json!(5)).await;

    let (status, json) = app.get("/api/plan/alice/plan-1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["plan"]["goal"], "weight-loss");

    let (status, _) = app.get("/api/plan/bob/plan-1").await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, json) = app.get("/api/plan/alice/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Workout plan not found");
}

#[tokio::test]
async fn test_basic_plan_weight_loss_five_days() {
    let app = TestApp::new(MockAiAdapter::with_delay(0)).await;
    app.seed("plan-1", "alice", "weight-loss", json!(5)).await;

    let (status, json) = app
        .post(
            "/api/generate-basic-plan",
            json!({"userId": "alice", "planId": "plan-1"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        titles(&json["plan"]),
        [
            "High Intensity Cardio",
            "Strength Training",
            "Circuit Training",
            "Endurance Cardio",
            "Full Body Burn"
        ]
    );
    assert_eq!(json["plan"][4]["day"], "Friday");
    assert_eq!(app.model.calls(), 0);
}

#[tokio::test]
async fn test_generate_plan_ai_success() {
    let app = TestApp::new(MockAiAdapter::with_delay(0)).await;
    app.seed("plan-1", "alice", "build-muscle", json!(3)).await;

    let (status, json) = app
        .post("/api/generate-plan", json!({"userId": "alice", "planId": "plan-1"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["source"], "ai");
    assert_eq!(json["degraded"], false);
    assert!(json.get("degradationReason").is_none());
    assert_eq!(json["plan"].as_array().unwrap().len(), 3);
    assert_eq!(app.model.calls(), 1);
}

#[tokio::test]
async fn test_generate_plan_quota_degrades() {
    let app = TestApp::new(MockAiAdapter::failing(ModelError::Quota(
        "insufficient_quota".into(),
    )))
    .await;
    app.seed("plan-1", "alice", "weight-loss", json!(2)).await;

    let (status, json) = app
        .post("/api/generate-plan", json!({"userId": "alice", "planId": "plan-1"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["source"], "template");
    assert_eq!(json["degraded"], true);
    assert_eq!(json["degradationReason"], "quota_exceeded");
    assert_eq!(
        titles(&json["plan"]),
        ["High Intensity Cardio", "Strength Training"]
    );
    assert_eq!(app.model.calls(), 1);
}

#[tokio::test]
async fn test_generate_plan_malformed_degrades() {
    let app = TestApp::new(MockAiAdapter::replying("I'd suggest running more.")).await;
    app.seed("plan-1", "alice", "build-muscle", json!(1)).await;

    let (status, json) = app
        .post("/api/generate-plan", json!({"userId": "alice", "planId": "plan-1"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["degradationReason"], "malformed_response");
    assert_eq!(titles(&json["plan"]), ["Upper Body Strength"]);
}

#[tokio::test]
async fn test_generate_plan_transport_failure_is_503() {
    let app = TestApp::new(MockAiAdapter::failing(ModelError::Transport(
        "connection reset".into(),
    )))
    .await;
    app.seed("plan-1", "alice", "build-muscle", json!(4)).await;

    let (status, json) = app
        .post("/api/generate-plan", json!({"userId": "alice", "planId": "plan-1"}))
        .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["suggestion"], "Use /api/generate-basic-plan endpoint");
    assert_eq!(app.model.calls(), 1);
}

#[tokio::test]
async fn test_generate_plan_validation_errors() {
    let app = TestApp::new(MockAiAdapter::with_delay(0)).await;
    app.seed("bad", "alice", "weight-loss", json!(0)).await;
    app.seed("missing-freq", "alice", "weight-loss", Value::Null).await;

    let (status, json) = app
        .post("/api/generate-plan", json!({"userId": "alice"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Missing required parameters: userId and planId");

    app.seed("words", "alice", "weight-loss", json!("five")).await;
    app.seed("fraction", "alice", "weight-loss", json!(4.5)).await;

    for plan_id in ["bad", "missing-freq", "words", "fraction"] {
        let (status, _) = app
            .post("/api/generate-plan", json!({"userId": "alice", "planId": plan_id}))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{plan_id}");

        let (status, json) = app
            .post(
                "/api/generate-basic-plan",
                json!({"userId": "alice", "planId": plan_id}),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{plan_id}");
        assert_eq!(json["error"], "Invalid request");
    }
    assert_eq!(app.model.calls(), 0);

    // A loosely typed document does not take the listing down.
    let (status, data) = app.get("/api/test-data").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data["users"][0]["plans"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_malformed_request_body_is_json_400() {
    let app = TestApp::new(MockAiAdapter::with_delay(0)).await;

    let bad_json = Request::builder()
        .method("POST")
        .uri("/api/generate-plan")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let no_content_type = Request::builder()
        .method("POST")
        .uri("/api/generate-basic-plan")
        .body(Body::from(r#"{"userId":"alice","planId":"p"}"#))
        .unwrap();
    let wrong_type = Request::builder()
        .method("POST")
        .uri("/api/create-test-plan")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"userId":5}"#))
        .unwrap();

    for req in [bad_json, no_content_type, wrong_type] {
        let (status, json) = app.send(req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Invalid request body");
        assert!(json["message"].is_string());
    }
    assert_eq!(app.model.calls(), 0);
}

#[tokio::test]
async fn test_front_end_shaped_document_is_served() {
    let app = TestApp::new(MockAiAdapter::with_delay(0)).await;
    let record: PlanRecord = serde_json::from_value(json!({
        "id": "fe-1",
        "userId": "dana",
        "name": "Cut",
        "goal": "weight-loss",
        "frequency": 3,
        "type": "Cardio",
        "timePeriod": "4 weeks",
        "goalWeight": "65",
        "createdAt": "2025-02-01T09:30:00Z",
    }))
    .unwrap();
    app.store.save_plan(&record).await.unwrap();

    let (status, json) = app
        .post(
            "/api/generate-basic-plan",
            json!({"userId": "dana", "planId": "fe-1"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["plan"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_create_test_plan_and_list() {
    let app = TestApp::new(MockAiAdapter::with_delay(0)).await;

    let (status, _) = app.post("/api/create-test-plan", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, created) = app
        .post("/api/create-test-plan", json!({"userId": "carol"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    let plan_id = created["planId"].as_str().unwrap().to_string();
    assert_eq!(created["plan"]["frequency"], 4);

    let (status, basic) = app
        .post(
            "/api/generate-basic-plan",
            json!({"userId": "carol", "planId": plan_id}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(basic["plan"].as_array().unwrap().len(), 4);

    let (status, data) = app.get("/api/test-data").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data["users"][0]["userId"], "carol");
    assert_eq!(data["users"][0]["plans"][0]["planId"], plan_id.as_str());
}
