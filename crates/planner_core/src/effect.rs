use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send the goal to the Plan Service. Exactly one per accepted submit.
    RequestPlan {
        request_id: crate::RequestId,
        goal: String,
    },
    /// Tell the user why a submit was rejected. The presentation layer picks the channel.
    NotifyUser(ValidationError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a goal!")]
    EmptyGoal,
}
