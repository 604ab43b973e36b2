use std::sync::{mpsc, Arc};
use std::thread;

use planner_logging::{planner_debug, planner_error, planner_info};

use crate::client::{ClientSettings, PlanClient, ReqwestPlanClient};
use crate::{EngineError, EngineEvent, FailureKind, RequestId, TransportError};

/// Receives engine events on whichever thread finished the work.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

enum EngineCommand {
    GeneratePlan { request_id: RequestId, goal: String },
    Shutdown,
}

/// Owns a background thread driving a tokio runtime. Each command becomes one task.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    worker: Option<thread::JoinHandle<()>>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings, sink: Arc<dyn EventSink>) -> Result<Self, EngineError> {
        let client = ReqwestPlanClient::new(settings)?;
        planner_info!("Plan Service at {}", client.base_url());
        Self::with_client(Arc::new(client), sink)
    }

    pub fn with_client(
        client: Arc<dyn PlanClient>,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("planner-io")
            .enable_all()
            .build()
            .map_err(EngineError::Runtime)?;
        let (cmd_tx, cmd_rx) = mpsc::channel();

        let worker = thread::Builder::new()
            .name("planner-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    match command {
                        EngineCommand::GeneratePlan { request_id, goal } => {
                            let client = client.clone();
                            let sink = sink.clone();
                            runtime.spawn(generate_plan(client, sink, request_id, goal));
                        }
                        EngineCommand::Shutdown => break,
                    }
                }
                planner_debug!("Engine command loop finished");
            })
            .map_err(EngineError::Spawn)?;

        Ok(Self {
            cmd_tx,
            worker: Some(worker),
        })
    }

    /// Queues one `/generate-plan` call. Completion arrives through the sink.
    pub fn generate_plan(
        &self,
        request_id: RequestId,
        goal: impl Into<String>,
    ) -> Result<(), EngineError> {
        self.cmd_tx
            .send(EngineCommand::GeneratePlan {
                request_id,
                goal: goal.into(),
            })
            .map_err(|_| EngineError::Stopped)
    }

    /// Stops the worker thread and waits for it. Requests still running are
    /// dropped without a completion; later `generate_plan` calls fail with
    /// `EngineError::Stopped`.
    pub fn shutdown(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };
        let _ = self.cmd_tx.send(EngineCommand::Shutdown);
        if worker.join().is_err() {
            planner_error!("Engine worker thread panicked");
        }
    }
}

/// Runs the call in its own task so a panicking client still yields a completion.
async fn generate_plan(
    client: Arc<dyn PlanClient>,
    sink: Arc<dyn EventSink>,
    request_id: RequestId,
    goal: String,
) {
    let call = tokio::spawn(async move { client.generate_plan(&goal).await });
    let result = match call.await {
        Ok(result) => result,
        Err(err) => {
            planner_error!("request_id={} task failed: {}", request_id, err);
            Err(TransportError::new(FailureKind::Network, "request task failed"))
        }
    };
    planner_debug!(
        "request_id={} finished ok={}",
        request_id,
        result.is_ok()
    );
    sink.emit(EngineEvent::PlanCompleted { request_id, result });
}
