pub const TITLE: &str = "AI Smart Task Planner";
pub const GOAL_PLACEHOLDER: &str = "Enter your goal here...";
pub const RULE: &str = "----------------------------------------";
pub const PLAN_NOT_FOUND: &str = "Plan not found";

pub const HELP_LINES: &[&str] = &[
    "Type a line to set the goal.",
    "  /submit        generate a plan for the current goal",
    "  /ask <goal>    set the goal and generate at once",
    "  /goal          show the current goal and result",
    "  //text         set a goal that starts with '/'",
    "  /help          show this help",
    "  /quit          exit (waits for a running request)",
];
