//! Planner core: pure request-lifecycle state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, ValidationError};
pub use msg::{Msg, PlanOutcome, PlanReply, TRANSPORT_ERROR_PREFIX};
pub use state::{AppState, RequestId, RequestState};
pub use update::{update, validate_goal};
pub use view_model::{
    AppViewModel, OutputBlock, OutputKind, SUBMIT_LABEL_IDLE, SUBMIT_LABEL_LOADING,
};
