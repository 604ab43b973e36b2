use crate::{
    AppState, Effect, Msg, PlanOutcome, RequestState, ValidationError, TRANSPORT_ERROR_PREFIX,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::GoalEdited(text) => {
            state.set_goal(text);
            Vec::new()
        }
        Msg::SubmitClicked => {
            // Submit is unavailable while a request is in flight, whatever the goal holds.
            if state.is_loading() {
                return (state, Vec::new());
            }
            if let Err(err) = validate_goal(state.goal()) {
                return (state, vec![Effect::NotifyUser(err)]);
            }
            let goal = state.goal().to_owned();
            let request_id = state.begin_request();
            vec![Effect::RequestPlan { request_id, goal }]
        }
        Msg::PlanResolved {
            request_id,
            outcome,
            resolved_at,
        } => {
            let (next, plan_id) = reconcile(outcome);
            // Stale or unexpected completions are dropped without touching state.
            state.finish_request(request_id, next, plan_id, resolved_at);
            Vec::new()
        }
    };

    (state, effects)
}

/// Checks a goal before submission. Only emptiness after trimming is rejected.
pub fn validate_goal(goal: &str) -> Result<(), ValidationError> {
    if goal.trim().is_empty() {
        Err(ValidationError::EmptyGoal)
    } else {
        Ok(())
    }
}

fn reconcile(outcome: PlanOutcome) -> (RequestState, Option<String>) {
    match outcome {
        PlanOutcome::Reply(reply) => {
            let text = reply.display_text().to_owned();
            (RequestState::Succeeded(text), reply.plan_id)
        }
        PlanOutcome::TransportFailed(description) => (
            RequestState::Failed(format!("{TRANSPORT_ERROR_PREFIX}{description}")),
            None,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlanReply;

    #[test]
    fn validate_goal_rejects_blank_input_only() {
        assert_eq!(validate_goal(""), Err(ValidationError::EmptyGoal));
        assert_eq!(validate_goal(" \t\n "), Err(ValidationError::EmptyGoal));
        assert_eq!(validate_goal("  x  "), Ok(()));
    }

    #[test]
    fn reconcile_prefers_plan_then_error() {
        let reply = PlanReply {
            plan: Some(String::new()),
            error: Some("Goal is required".to_string()),
            message: None,
            plan_id: None,
        };
        assert_eq!(
            reconcile(PlanOutcome::Reply(reply)).0,
            RequestState::Succeeded("Goal is required".to_string())
        );
        assert_eq!(
            reconcile(PlanOutcome::Reply(PlanReply::default())).0,
            RequestState::Succeeded(String::new())
        );
    }
}
