use std::sync::{mpsc, Arc};

use chrono::Utc;
use planner_core::{Msg, PlanOutcome, PlanReply, RequestId};
use planner_engine::{
    ClientSettings, EngineError, EngineEvent, EngineHandle, EventSink, GeneratePlanResponse,
    PlanClient,
};
use planner_logging::{planner_error, planner_info, planner_warn};

use super::app::AppEvent;

/// Source of the `resolved_at` stamp.
pub type Clock = Arc<dyn Fn() -> String + Send + Sync>;

pub fn utc_clock() -> Clock {
    Arc::new(|| Utc::now().to_rfc3339())
}

/// Executes request effects on the engine and feeds completions back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
    events: mpsc::Sender<AppEvent>,
    clock: Clock,
}

impl EffectRunner {
    pub fn new(settings: ClientSettings, events: mpsc::Sender<AppEvent>) -> Result<Self, EngineError> {
        let clock = utc_clock();
        let engine = EngineHandle::new(settings, msg_sink(&events, &clock))?;
        Ok(Self {
            engine,
            events,
            clock,
        })
    }

    pub fn with_client(
        client: Arc<dyn PlanClient>,
        events: mpsc::Sender<AppEvent>,
        clock: Clock,
    ) -> Result<Self, EngineError> {
        let engine = EngineHandle::with_client(client, msg_sink(&events, &clock))?;
        Ok(Self {
            engine,
            events,
            clock,
        })
    }

    /// Stops the engine once nothing is in flight.
    pub fn shutdown(&mut self) {
        self.engine.shutdown();
    }

    pub fn request_plan(&self, request_id: RequestId, goal: String) {
        planner_info!(
            "RequestPlan request_id={} goal_len={}",
            request_id,
            goal.len()
        );
        if let Err(err) = self.engine.generate_plan(request_id, goal) {
            // Loading must still end; report the failure as this request's completion.
            planner_error!("RequestPlan request_id={} not queued: {}", request_id, err);
            let _ = self.events.send(AppEvent::Core(resolved(
                request_id,
                PlanOutcome::TransportFailed(err.to_string()),
                &self.clock,
            )));
        }
    }
}

struct MsgSink {
    events: mpsc::Sender<AppEvent>,
    clock: Clock,
}

fn msg_sink(events: &mpsc::Sender<AppEvent>, clock: &Clock) -> Arc<MsgSink> {
    Arc::new(MsgSink {
        events: events.clone(),
        clock: clock.clone(),
    })
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.events.send(AppEvent::Core(map_event(event, &self.clock)));
    }
}

pub fn map_event(event: EngineEvent, clock: &Clock) -> Msg {
    match event {
        EngineEvent::PlanCompleted { request_id, result } => {
            let outcome = match result {
                Ok(response) => {
                    let reply = map_reply(response);
                    if reply.is_service_error() {
                        planner_warn!(
                            "request_id={} service reported: {}",
                            request_id,
                            reply.display_text()
                        );
                    } else {
                        planner_info!("request_id={} plan received", request_id);
                    }
                    PlanOutcome::Reply(reply)
                }
                Err(err) => {
                    planner_warn!("request_id={} failed ({}): {}", request_id, err.kind, err);
                    PlanOutcome::TransportFailed(err.message)
                }
            };
            resolved(request_id, outcome, clock)
        }
    }
}

fn map_reply(response: GeneratePlanResponse) -> PlanReply {
    PlanReply {
        plan: response.plan,
        error: response.error,
        message: response.message,
        plan_id: response.plan_id,
    }
}

fn resolved(request_id: RequestId, outcome: PlanOutcome, clock: &Clock) -> Msg {
    Msg::PlanResolved {
        request_id,
        outcome,
        resolved_at: Some(clock()),
    }
}
