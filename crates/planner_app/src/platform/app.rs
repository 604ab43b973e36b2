use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::mpsc;
use std::thread;

use anyhow::{Context, Result};
use planner_core::{update, AppState, Effect, Msg, RequestState};
use planner_engine::BlockingPlanClient;
use planner_logging::{planner_debug, planner_info};

use super::config::PlannerConfig;
use super::effects::EffectRunner;
use super::ui;
use super::ui::input::InputCommand;
use super::{EXIT_SUCCESS, EXIT_TRANSPORT_FAILURE, EXIT_VALIDATION};

/// Everything the event loop reacts to, in arrival order.
#[derive(Debug)]
pub enum AppEvent {
    Input(InputCommand),
    InputClosed,
    Core(Msg),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Reprint goal, submit control and output after every visible change.
    Full,
    /// Print only the final result text.
    ResultOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct PlannerApp<W: Write> {
    state: AppState,
    runner: EffectRunner,
    out: W,
    mode: RenderMode,
}

impl<W: Write> PlannerApp<W> {
    pub fn new(runner: EffectRunner, out: W, mode: RenderMode) -> Self {
        Self {
            state: AppState::new(),
            runner,
            out,
            mode,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Stops the engine. Call only once nothing is in flight.
    pub fn shutdown(&mut self) {
        self.runner.shutdown();
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }

    pub fn dispatch(&mut self, msg: Msg) -> io::Result<()> {
        planner_debug!("dispatch {:?}", msg);
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;

        self.run_effects(effects)?;
        if self.state.consume_dirty() {
            self.render()?;
        }
        Ok(())
    }

    pub fn handle_input(&mut self, command: InputCommand) -> io::Result<Flow> {
        match command {
            InputCommand::EditGoal(text) => self.dispatch(Msg::GoalEdited(text))?,
            InputCommand::Submit => self.dispatch(Msg::SubmitClicked)?,
            InputCommand::Ask(text) => {
                self.dispatch(Msg::GoalEdited(text))?;
                self.dispatch(Msg::SubmitClicked)?;
            }
            InputCommand::ShowGoal => self.render()?,
            InputCommand::Help => self.write_lines(ui::constants::HELP_LINES.iter().copied())?,
            InputCommand::Quit => return Ok(Flow::Quit),
            InputCommand::Unknown(name) => {
                writeln!(self.out, "Unknown command /{name}. Type /help for commands.")?;
                self.out.flush()?;
            }
        }
        Ok(Flow::Continue)
    }

    pub fn render(&mut self) -> io::Result<()> {
        let view = self.state.view();
        let lines = match self.mode {
            RenderMode::Full => ui::render::render(&view),
            RenderMode::ResultOnly => ui::render::render_result(&view),
        };
        self.write_lines(lines)
    }

    fn run_effects(&mut self, effects: Vec<Effect>) -> io::Result<()> {
        for effect in effects {
            match effect {
                Effect::RequestPlan { request_id, goal } => {
                    self.runner.request_plan(request_id, goal);
                }
                Effect::NotifyUser(err) => {
                    planner_info!("Submit rejected: {}", err);
                    writeln!(self.out, "{err}")?;
                    self.out.flush()?;
                }
            }
        }
        Ok(())
    }

    fn write_lines<I, S>(&mut self, lines: I) -> io::Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            writeln!(self.out, "{}", line.as_ref())?;
        }
        self.out.flush()
    }
}

/// Runs until the user quits or input ends. A request in flight is always
/// allowed to finish first; there is no way to abort it.
pub fn event_loop<W: Write>(app: &mut PlannerApp<W>, events: &mpsc::Receiver<AppEvent>) -> Result<()> {
    let mut quitting = false;
    let mut announced_wait = false;

    while let Ok(event) = events.recv() {
        match event {
            AppEvent::Input(_) if quitting => {}
            AppEvent::Input(command) => {
                if app.handle_input(command)? == Flow::Quit {
                    quitting = true;
                }
            }
            AppEvent::InputClosed => quitting = true,
            AppEvent::Core(msg) => app.dispatch(msg)?,
        }

        if quitting {
            if !app.state().is_loading() {
                break;
            }
            if !announced_wait {
                announced_wait = true;
                app.write_lines(["Waiting for the current plan to finish..."])?;
            }
        }
    }
    Ok(())
}

pub fn run_interactive(config: &PlannerConfig) -> Result<ExitCode> {
    let (tx, rx) = mpsc::channel();
    let runner = EffectRunner::new(config.client_settings(), tx.clone())
        .context("Failed to start the plan engine")?;
    let mut app = PlannerApp::new(runner, io::stdout(), RenderMode::Full);

    app.write_lines([ui::constants::TITLE, "Type /help for commands."])?;
    app.render()?;
    spawn_input_reader(tx).context("Failed to start the input reader")?;

    event_loop(&mut app, &rx)?;
    app.shutdown();
    planner_info!("Interactive session finished");
    Ok(ExitCode::SUCCESS)
}

/// Submits `goal` once and prints the outcome.
pub fn run_generate(config: &PlannerConfig, goal: String) -> Result<ExitCode> {
    let (tx, rx) = mpsc::channel();
    let runner = EffectRunner::new(config.client_settings(), tx)
        .context("Failed to start the plan engine")?;
    let mut app = PlannerApp::new(runner, io::stdout(), RenderMode::ResultOnly);
    let code = generate_once(&mut app, &rx, goal)?;
    app.shutdown();
    Ok(ExitCode::from(code))
}

pub fn generate_once<W: Write>(
    app: &mut PlannerApp<W>,
    events: &mpsc::Receiver<AppEvent>,
    goal: String,
) -> Result<u8> {
    app.dispatch(Msg::GoalEdited(goal))?;
    app.dispatch(Msg::SubmitClicked)?;
    if !app.state().is_loading() {
        return Ok(EXIT_VALIDATION);
    }

    while app.state().is_loading() {
        match events.recv() {
            Ok(AppEvent::Core(msg)) => app.dispatch(msg)?,
            Ok(_) => {}
            Err(_) => anyhow::bail!("plan engine stopped before the request finished"),
        }
    }

    Ok(match app.state().request() {
        RequestState::Failed(_) => EXIT_TRANSPORT_FAILURE,
        _ => EXIT_SUCCESS,
    })
}

pub fn run_list_plans(config: &PlannerConfig) -> Result<ExitCode> {
    let client = BlockingPlanClient::new(config.client_settings())
        .context("Failed to create the Plan Service client")?;
    let mut out = io::stdout().lock();
    match client.list_plans() {
        Ok(plans) => {
            planner_info!("Listed {} stored plans", plans.len());
            for line in ui::render::render_plan_list(&plans) {
                writeln!(out, "{line}")?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            writeln!(out, "{}{err}", planner_core::TRANSPORT_ERROR_PREFIX)?;
            Ok(ExitCode::from(EXIT_TRANSPORT_FAILURE))
        }
    }
}

pub fn run_show_plan(config: &PlannerConfig, plan_id: &str) -> Result<ExitCode> {
    let client = BlockingPlanClient::new(config.client_settings())
        .context("Failed to create the Plan Service client")?;
    let mut out = io::stdout().lock();
    match client.get_plan(plan_id) {
        Ok(Some(plan)) => {
            for line in ui::render::render_stored_plan(&plan) {
                writeln!(out, "{line}")?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Ok(None) => {
            writeln!(out, "{}", ui::constants::PLAN_NOT_FOUND)?;
            Ok(ExitCode::from(EXIT_TRANSPORT_FAILURE))
        }
        Err(err) => {
            writeln!(out, "{}{err}", planner_core::TRANSPORT_ERROR_PREFIX)?;
            Ok(ExitCode::from(EXIT_TRANSPORT_FAILURE))
        }
    }
}

fn spawn_input_reader(tx: mpsc::Sender<AppEvent>) -> io::Result<()> {
    thread::Builder::new()
        .name("planner-input".to_string())
        .spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                let command = ui::input::parse_line(&line);
                if tx.send(AppEvent::Input(command)).is_err() {
                    return;
                }
            }
            let _ = tx.send(AppEvent::InputClosed);
        })?;
    Ok(())
}
