use std::error::Error as _;
use std::time::Duration;

use planner_logging::{planner_debug, planner_warn};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use crate::{FailureKind, GeneratePlanRequest, GeneratePlanResponse, StoredPlan, TransportError};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const GENERATE_PLAN_PATH: &str = "generate-plan";
pub const PLANS_PATH: &str = "plans";
pub const PLAN_PATH: &str = "plan";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Overall deadline per request. `None` waits for the service indefinitely.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
        }
    }
}

#[async_trait::async_trait]
pub trait PlanClient: Send + Sync {
    async fn generate_plan(&self, goal: &str) -> Result<GeneratePlanResponse, TransportError>;

    async fn list_plans(&self) -> Result<Vec<StoredPlan>, TransportError>;

    /// `Ok(None)` when the service has no plan under `plan_id`.
    async fn get_plan(&self, plan_id: &str) -> Result<Option<StoredPlan>, TransportError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestPlanClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ReqwestPlanClient {
    pub fn new(settings: ClientSettings) -> Result<Self, TransportError> {
        let base_url = parse_base_url(&settings.base_url)?;

        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| TransportError::new(FailureKind::Network, describe(&err)))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, TransportError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                TransportError::new(FailureKind::InvalidEndpoint, "endpoint cannot be a base url")
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, TransportError> {
        request.send().await.map_err(map_reqwest_error)
    }
}

#[async_trait::async_trait]
impl PlanClient for ReqwestPlanClient {
    async fn generate_plan(&self, goal: &str) -> Result<GeneratePlanResponse, TransportError> {
        let url = self.endpoint(&[GENERATE_PLAN_PATH])?;
        planner_debug!("POST {} goal_len={}", url, goal.len());

        let body = GeneratePlanRequest {
            goal: goal.to_string(),
        };
        let response = self.send(self.client.post(url).json(&body)).await?;
        read_json(response).await
    }

    async fn list_plans(&self) -> Result<Vec<StoredPlan>, TransportError> {
        let url = self.endpoint(&[PLANS_PATH])?;
        planner_debug!("GET {}", url);

        let response = self.send(self.client.get(url)).await?;
        read_json(response).await
    }

    async fn get_plan(&self, plan_id: &str) -> Result<Option<StoredPlan>, TransportError> {
        let url = self.endpoint(&[PLAN_PATH, plan_id])?;
        planner_debug!("GET {}", url);

        let response = self.send(self.client.get(url)).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        read_json(response).await.map(Some)
    }
}

/// Accepts `http`/`https` urls only. A trailing slash is implied so that
/// endpoint paths nest under any prefix the base carries.
pub fn parse_base_url(raw: &str) -> Result<Url, TransportError> {
    let url = Url::parse(raw.trim())
        .map_err(|err| TransportError::new(FailureKind::InvalidEndpoint, format!("{raw}: {err}")))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(TransportError::new(
            FailureKind::InvalidEndpoint,
            format!("{raw}: expected an http(s) url"),
        ));
    }
    Ok(url)
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, TransportError> {
    let status = response.status();
    if !status.is_success() {
        planner_warn!("Plan Service answered {} for {}", status, response.url());
        return Err(TransportError::status(status.as_u16()));
    }

    let body = response.bytes().await.map_err(map_reqwest_error)?;
    serde_json::from_slice(&body).map_err(|err| {
        TransportError::new(FailureKind::Decode, format!("invalid response body: {err}"))
    })
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    let message = describe(&err);
    if err.is_timeout() {
        return TransportError::new(FailureKind::Timeout, message);
    }
    if err.is_decode() {
        return TransportError::new(FailureKind::Decode, message);
    }
    TransportError::new(FailureKind::Network, message)
}

// reqwest keeps the useful part ("connection refused") in the source chain.
fn describe(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
