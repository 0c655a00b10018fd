use cosmwasm_schema::cw_serde;
use thiserror::Error;

/// Returns `PauseError::Paused` if the pause flag is raised.
pub fn ensure_unpaused(paused: bool) -> Result<(), PauseError> {
    if paused {
        return Err(PauseError::Paused {});
    }

    Ok(())
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PauseError {
    #[error("System is paused.")]
    Paused {},
}

/// Information about if the contract is currently paused.
#[cw_serde]
pub enum PauseInfoResponse {
    Paused {},
    Unpaused {},
}

impl From<bool> for PauseInfoResponse {
    fn from(paused: bool) -> Self {
        if paused {
            PauseInfoResponse::Paused {}
        } else {
            PauseInfoResponse::Unpaused {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_unpaused() {
        assert_eq!(ensure_unpaused(false), Ok(()));
        assert_eq!(ensure_unpaused(true), Err(PauseError::Paused {}));
    }

    #[test]
    fn test_pause_info_from_flag() {
        assert_eq!(PauseInfoResponse::from(true), PauseInfoResponse::Paused {});
        assert_eq!(
            PauseInfoResponse::from(false),
            PauseInfoResponse::Unpaused {}
        );
    }
}
