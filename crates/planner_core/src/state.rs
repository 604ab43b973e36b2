use crate::view_model::{AppViewModel, OutputBlock, OutputKind};
use crate::{SUBMIT_LABEL_IDLE, SUBMIT_LABEL_LOADING};

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Loading {
        request_id: RequestId,
    },
    Succeeded(String),
    Failed(String),
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading { .. })
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        match self {
            RequestState::Loading { request_id } => Some(*request_id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    goal: String,
    request: RequestState,
    last_request_id: RequestId,
    plan_id: Option<String>,
    resolved_at: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn goal(&self) -> &str {
        &self.goal
    }

    pub fn request(&self) -> &RequestState {
        &self.request
    }

    pub fn is_loading(&self) -> bool {
        self.request.is_loading()
    }

    pub fn view(&self) -> AppViewModel {
        let loading = self.is_loading();
        let output = match &self.request {
            RequestState::Succeeded(text) if !text.is_empty() => Some(OutputBlock {
                kind: OutputKind::Plan,
                text: text.clone(),
            }),
            RequestState::Failed(message) => Some(OutputBlock {
                kind: OutputKind::Error,
                text: message.clone(),
            }),
            _ => None,
        };

        AppViewModel {
            goal: self.goal.clone(),
            loading,
            submit_enabled: !loading,
            submit_label: if loading {
                SUBMIT_LABEL_LOADING
            } else {
                SUBMIT_LABEL_IDLE
            },
            output,
            plan_id: self.plan_id.clone(),
            resolved_at: self.resolved_at.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything visible changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_goal(&mut self, text: String) {
        if self.goal != text {
            self.goal = text;
            self.dirty = true;
        }
    }

    /// Moves to `Loading` under a fresh id and drops the previous result.
    pub(crate) fn begin_request(&mut self) -> RequestId {
        self.last_request_id += 1;
        let request_id = self.last_request_id;
        self.request = RequestState::Loading { request_id };
        self.plan_id = None;
        self.resolved_at = None;
        self.dirty = true;
        request_id
    }

    /// Leaves `Loading` for `request_id`. Returns false if that request is not the one in flight.
    pub(crate) fn finish_request(
        &mut self,
        request_id: RequestId,
        next: RequestState,
        plan_id: Option<String>,
        resolved_at: Option<String>,
    ) -> bool {
        if self.request.in_flight() != Some(request_id) {
            return false;
        }
        debug_assert!(!next.is_loading());
        self.request = next;
        self.plan_id = plan_id;
        self.resolved_at = resolved_at;
        self.dirty = true;
        true
    }
}
