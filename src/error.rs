use itm::ItmError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("reading scenario: {0}")]
    Io(#[from] std::io::Error),

    #[error("parsing scenario: {0}")]
    Json(#[from] serde_json::Error),

    #[error("model rejected scenario: {0} (code {code})", code = .0.code())]
    Model(#[from] ItmError),

    #[error("scenario has no distances to predict")]
    NoDistances,
}

pub type ScenarioResult<T> = Result<T, ScenarioError>;
