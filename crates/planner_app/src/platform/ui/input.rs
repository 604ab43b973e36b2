/// One line of user input, decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    EditGoal(String),
    Submit,
    Ask(String),
    ShowGoal,
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_line(line: &str) -> InputCommand {
    let line = line.trim_end_matches(['\r', '\n']);

    if let Some(escaped) = line.strip_prefix("//") {
        return InputCommand::EditGoal(format!("/{escaped}"));
    }
    let Some(command) = line.strip_prefix('/') else {
        return InputCommand::EditGoal(line.to_string());
    };

    let (name, rest) = match command.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest),
        None => (command, ""),
    };
    match name {
        "submit" | "go" => InputCommand::Submit,
        "ask" => InputCommand::Ask(rest.to_string()),
        "goal" => InputCommand::ShowGoal,
        "help" | "?" => InputCommand::Help,
        "quit" | "exit" | "q" => InputCommand::Quit,
        _ => InputCommand::Unknown(name.to_string()),
    }
}
