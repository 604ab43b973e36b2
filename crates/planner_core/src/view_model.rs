pub const SUBMIT_LABEL_IDLE: &str = "Generate Plan";
pub const SUBMIT_LABEL_LOADING: &str = "Generating...";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub goal: String,
    pub loading: bool,
    pub submit_enabled: bool,
    pub submit_label: &'static str,
    /// Nothing to show while idle, loading, or after an empty reply.
    pub output: Option<OutputBlock>,
    pub plan_id: Option<String>,
    pub resolved_at: Option<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputBlock {
    pub kind: OutputKind,
    pub text: String,
}

/// Service-reported errors render as `Plan`; only transport failures are `Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Plan,
    Error,
}
