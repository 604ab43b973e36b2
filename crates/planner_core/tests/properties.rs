use planner_core::{update, AppState, Effect, Msg, PlanOutcome, PlanReply, ValidationError};
use proptest::prelude::*;

fn blank_goal() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(vec![' ', '\t', '\n', '\r']), 0..16)
        .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #[test]
    fn blank_goals_never_issue_requests(goal in blank_goal()) {
        let (state, _) = update(AppState::new(), Msg::GoalEdited(goal));
        let before = state.request().clone();

        let (state, effects) = update(state, Msg::SubmitClicked);

        prop_assert_eq!(effects, vec![Effect::NotifyUser(ValidationError::EmptyGoal)]);
        prop_assert_eq!(state.request(), &before);
    }

    #[test]
    fn non_blank_goals_issue_exactly_one_request(goal in "[ \t]{0,3}[a-zA-Z0-9][a-zA-Z0-9 ]{0,40}") {
        let (state, _) = update(AppState::new(), Msg::GoalEdited(goal.clone()));
        let (state, effects) = update(state, Msg::SubmitClicked);

        prop_assert!(state.is_loading());
        prop_assert_eq!(effects, vec![Effect::RequestPlan { request_id: 1, goal }]);

        let (state, effects) = update(state, Msg::PlanResolved {
            request_id: 1,
            outcome: PlanOutcome::Reply(PlanReply::plan("ok")),
            resolved_at: None,
        });
        prop_assert!(effects.is_empty());
        prop_assert!(!state.is_loading());
    }
}
