use serde::Deserialize;

fn default_apply_transition() -> bool {
    true
}

#[derive(Deserialize)]
pub struct JoinSessionRequest {
    pub identity: String,
    /// Whether a privileged join may move a waiting booking into progress.
    #[serde(default = "default_apply_transition")]
    pub apply_transition: bool,
}
