use crate::session::SessionState;

/// Reasons a session may not perform a gated action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GateError {
    #[error("wallet not connected")]
    NotConnected,
    #[error("wallet does not hold the campus token")]
    TokenMissing,
}

pub fn require_connected(state: &SessionState) -> Result<(), GateError> {
    if state.is_connected {
        Ok(())
    } else {
        Err(GateError::NotConnected)
    }
}

pub fn require_token(state: &SessionState) -> Result<(), GateError> {
    require_connected(state)?;
    if state.has_token {
        Ok(())
    } else {
        Err(GateError::TokenMissing)
    }
}
