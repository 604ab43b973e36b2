use crate::client::{ClientSettings, PlanClient, ReqwestPlanClient};
use crate::{EngineError, StoredPlan, TransportError};

/// Synchronous wrapper for one-off calls from the command line.
pub struct BlockingPlanClient {
    runtime: tokio::runtime::Runtime,
    inner: ReqwestPlanClient,
}

impl BlockingPlanClient {
    pub fn new(settings: ClientSettings) -> Result<Self, EngineError> {
        let inner = ReqwestPlanClient::new(settings)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(EngineError::Runtime)?;
        Ok(Self { runtime, inner })
    }

    pub fn list_plans(&self) -> Result<Vec<StoredPlan>, TransportError> {
        self.runtime.block_on(self.inner.list_plans())
    }

    pub fn get_plan(&self, plan_id: &str) -> Result<Option<StoredPlan>, TransportError> {
        self.runtime.block_on(self.inner.get_plan(plan_id))
    }
}
