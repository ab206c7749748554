use crate::keycodes::Keycode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("failed to parse profile: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{0} is not a tap-hold key and cannot resolve instantly")]
    NotTapHold(Keycode),

    #[error("default tap-hold timeout must be greater than zero")]
    ZeroDefaultTimeout,
}
