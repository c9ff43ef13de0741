//! Voting session errors.

use chainvote_types::Address;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("cannot {action} while in step {step}")]
    InvalidTransition {
        step: &'static str,
        action: &'static str,
    },

    #[error("candidate {0} is not enrolled in this election")]
    NotEnrolled(Address),

    #[error("a vote is already being submitted")]
    Busy,
}
