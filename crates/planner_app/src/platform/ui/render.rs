use planner_core::{AppViewModel, OutputKind};
use planner_engine::StoredPlan;

use super::constants::*;

/// Renders the whole controller view as terminal lines.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    let goal = if view.goal.is_empty() {
        format!("({GOAL_PLACEHOLDER})")
    } else {
        view.goal.clone()
    };
    lines.push(format!("Goal: {goal}"));
    lines.push(submit_control(view));

    if let Some(output) = &view.output {
        let heading = match output.kind {
            OutputKind::Plan => "Plan",
            OutputKind::Error => "Request failed",
        };
        lines.push(format!("{RULE} {heading}"));
        lines.extend(output.text.lines().map(ToOwned::to_owned));
        lines.push(RULE.to_string());
        if let Some(footer) = result_footer(view) {
            lines.push(footer);
        }
    }

    lines
}

/// Only the result text, for one-shot use. Empty while loading or when there is nothing to show.
pub fn render_result(view: &AppViewModel) -> Vec<String> {
    if view.loading {
        return Vec::new();
    }
    view.output
        .as_ref()
        .map(|output| output.text.lines().map(ToOwned::to_owned).collect())
        .unwrap_or_default()
}

pub fn render_plan_list(plans: &[StoredPlan]) -> Vec<String> {
    if plans.is_empty() {
        return vec!["No stored plans.".to_string()];
    }
    plans
        .iter()
        .map(|plan| format!("{}  {}", plan.id, single_line(&plan.goal)))
        .collect()
}

pub fn render_stored_plan(plan: &StoredPlan) -> Vec<String> {
    let mut lines = vec![format!("Id:   {}", plan.id), format!("Goal: {}", plan.goal)];
    lines.push(RULE.to_string());
    lines.extend(plan.plan.lines().map(ToOwned::to_owned));
    lines
}

fn submit_control(view: &AppViewModel) -> String {
    if view.submit_enabled {
        format!("[ {} ]", view.submit_label)
    } else {
        format!("[ {} ] (disabled)", view.submit_label)
    }
}

fn result_footer(view: &AppViewModel) -> Option<String> {
    match (&view.plan_id, &view.resolved_at) {
        (Some(id), Some(at)) => Some(format!("Saved as {id} at {at}")),
        (Some(id), None) => Some(format!("Saved as {id}")),
        (None, Some(at)) => Some(format!("Received at {at}")),
        (None, None) => None,
    }
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
