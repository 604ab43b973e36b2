//! Planner engine: Plan Service client and request effect execution.
mod blocking;
mod client;
mod engine;
mod types;

pub use blocking::BlockingPlanClient;
pub use client::{
    parse_base_url, ClientSettings, PlanClient, ReqwestPlanClient, DEFAULT_BASE_URL,
    GENERATE_PLAN_PATH, PLANS_PATH, PLAN_PATH,
};
pub use engine::{EngineHandle, EventSink};
pub use types::{
    EngineError, EngineEvent, FailureKind, GeneratePlanRequest, GeneratePlanResponse, RequestId,
    StoredPlan, TransportError,
};
