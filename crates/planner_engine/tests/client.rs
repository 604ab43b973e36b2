use std::time::Duration;

use planner_engine::{
    ClientSettings, FailureKind, GeneratePlanResponse, PlanClient, ReqwestPlanClient, StoredPlan,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ReqwestPlanClient {
    ReqwestPlanClient::new(ClientSettings {
        base_url: server.uri(),
        ..ClientSettings::default()
    })
    .expect("client")
}

#[tokio::test]
async fn generate_plan_posts_goal_and_reads_plan() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate-plan"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "goal": "  Learn guitar " })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Plan generated and saved successfully",
            "plan_id": "665f1c2e9b1e8a3d4c5b6a79",
            "plan": "1. Buy a guitar\n2. Practice daily",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .generate_plan("  Learn guitar ")
        .await
        .expect("generate ok");

    assert_eq!(
        response,
        GeneratePlanResponse {
            plan: Some("1. Buy a guitar\n2. Practice daily".to_string()),
            error: None,
            message: Some("Plan generated and saved successfully".to_string()),
            plan_id: Some("665f1c2e9b1e8a3d4c5b6a79".to_string()),
        }
    );
}

#[tokio::test]
async fn service_error_in_success_body_is_a_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate-plan"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "error": "Invalid goal" })))
        .mount(&server)
        .await;

    let response = client_for(&server)
        .generate_plan("Learn guitar")
        .await
        .expect("reply");

    assert_eq!(response.plan, None);
    assert_eq!(response.error.as_deref(), Some("Invalid goal"));
}

#[tokio::test]
async fn error_status_is_transport_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate-plan"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": "Server encountered an error. Please try again later."
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate_plan("Learn guitar")
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(500));
    assert_eq!(err.message, "Request failed with status code 500");
}

#[tokio::test]
async fn non_json_body_is_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate-plan"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate_plan("Learn guitar")
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::Decode);
    assert!(err.message.starts_with("invalid response body"));
}

#[tokio::test]
async fn slow_service_times_out_when_deadline_is_set() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate-plan"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({ "plan": "late" })),
        )
        .mount(&server)
        .await;

    let client = ReqwestPlanClient::new(ClientSettings {
        base_url: server.uri(),
        request_timeout: Some(Duration::from_millis(50)),
        ..ClientSettings::default()
    })
    .expect("client");

    let err = client.generate_plan("Learn guitar").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn unreachable_service_is_network_failure() {
    // Bind then drop a listener so the port is very likely closed.
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr")
    };
    let client = ReqwestPlanClient::new(ClientSettings {
        base_url: format!("http://{addr}"),
        connect_timeout: Duration::from_secs(2),
        ..ClientSettings::default()
    })
    .expect("client");

    let err = client.generate_plan("Learn guitar").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Network);
    assert!(!err.message.is_empty());
}

#[tokio::test]
async fn list_plans_reads_stored_plans() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/plans"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "_id": "a1", "goal": "Learn guitar", "plan": "Practice" },
            { "_id": "b2", "goal": "Run a marathon" }
        ])))
        .mount(&server)
        .await;

    let plans = client_for(&server).list_plans().await.expect("plans");

    assert_eq!(
        plans,
        vec![
            StoredPlan {
                id: "a1".to_string(),
                goal: "Learn guitar".to_string(),
                plan: "Practice".to_string(),
            },
            StoredPlan {
                id: "b2".to_string(),
                goal: "Run a marathon".to_string(),
                plan: String::new(),
            },
        ]
    );
}

#[tokio::test]
async fn get_plan_maps_not_found_to_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/plan/a1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "a1", "goal": "Learn guitar", "plan": "Practice"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/plan/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "Plan not found" })))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let found = client.get_plan("a1").await.expect("lookup");
    assert_eq!(found.map(|plan| plan.plan), Some("Practice".to_string()));

    let missing = client.get_plan("missing").await.expect("lookup");
    assert_eq!(missing, None);
}

#[tokio::test]
async fn base_url_prefix_is_preserved() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate-plan"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "plan": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ReqwestPlanClient::new(ClientSettings {
        base_url: format!("{}/api", server.uri()),
        ..ClientSettings::default()
    })
    .expect("client");

    let response = client.generate_plan("Learn guitar").await.expect("reply");
    assert_eq!(response.plan.as_deref(), Some("ok"));
}
