/// Prefix applied to transport failure descriptions before they are shown.
pub const TRANSPORT_ERROR_PREFIX: &str = "Error: ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the goal text area.
    GoalEdited(String),
    /// User clicked Generate Plan.
    SubmitClicked,
    /// The Plan Service call for `request_id` finished, one way or the other.
    PlanResolved {
        request_id: crate::RequestId,
        outcome: PlanOutcome,
        /// Wall-clock stamp supplied by the platform layer.
        resolved_at: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanOutcome {
    /// The service answered at the transport level.
    Reply(PlanReply),
    /// No usable response: connection error, timeout, bad status or undecodable body.
    TransportFailed(String),
}

/// Transport-neutral view of a `/generate-plan` response body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlanReply {
    pub plan: Option<String>,
    pub error: Option<String>,
    pub message: Option<String>,
    pub plan_id: Option<String>,
}

impl PlanReply {
    /// Reply carrying only a plan. Used to build replies in tests.
    pub fn plan(text: impl Into<String>) -> Self {
        Self {
            plan: Some(text.into()),
            ..Self::default()
        }
    }

    /// Reply carrying only a service error. Used to build replies in tests.
    pub fn service_error(text: impl Into<String>) -> Self {
        Self {
            error: Some(text.into()),
            ..Self::default()
        }
    }

    /// Text shown for this reply: the plan when non-empty, otherwise the
    /// service error, otherwise nothing.
    pub fn display_text(&self) -> &str {
        match self.plan.as_deref() {
            Some(plan) if !plan.is_empty() => plan,
            _ => self.error.as_deref().unwrap_or_default(),
        }
    }

    /// True when the displayed text comes from the service's `error` field.
    pub fn is_service_error(&self) -> bool {
        self.plan.as_deref().map_or(true, str::is_empty) && self.error.is_some()
    }
}
