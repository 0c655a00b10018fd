use cosmwasm_std::{Coin, OverflowError, StdError, Uint128};
use cw_utils::PaymentError;
use exec_control::pause::PauseError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error(transparent)]
    Std(#[from] StdError),

    #[error(transparent)]
    PauseError(#[from] PauseError),

    #[error("{0}")]
    PaymentError(#[from] PaymentError),

    #[error("Overflow")]
    OverflowError(#[from] OverflowError),

    // Configuration
    #[error("Governance config is already initialized")]
    AlreadyInitialized {},

    #[error("Voting duration bounds are invalid: min {min} must be positive and not greater than max {max}")]
    InvalidVotingDurationBounds { min: u64, max: u64 },

    #[error("max_proposals must be greater than zero")]
    InvalidMaxProposals {},

    #[error("Vote deposit must have a non-empty denom and a non-zero amount")]
    InvalidVoteDeposit {},

    #[error("Gating asset is invalid: {reason}")]
    InvalidGatingAsset { reason: String },

    // Authorization
    #[error("Unauthorized")]
    Unauthorized {},

    // Validation
    #[error("Title is too long: {len} bytes, max {max}")]
    InvalidTitle { len: u64, max: u64 },

    #[error("Description is too long: {len} bytes, max {max}")]
    InvalidDescription { len: u64, max: u64 },

    #[error("Voting duration {duration}s is out of range [{min}; {max}]")]
    InvalidDuration { duration: u64, min: u64, max: u64 },

    // State
    #[error("Maximum number of open proposals reached ({max})")]
    MaxProposalsReached { max: u32 },

    #[error("No such proposal ({proposal_id})")]
    ProposalNotFound { proposal_id: u64 },

    #[error("Proposal {proposal_id} already exists")]
    ProposalAlreadyExists { proposal_id: u64 },

    #[error("Voting period of proposal {proposal_id} has ended")]
    VotingPeriodEnded { proposal_id: u64 },

    #[error("Voting period of proposal {proposal_id} has not ended yet")]
    VotingPeriodNotEnded { proposal_id: u64 },

    #[error("No vote of {voter} on proposal {proposal_id}")]
    VoteNotFound { proposal_id: u64, voter: String },

    // Eligibility
    #[error("Insufficient gating asset balance: {balance}, required {required}")]
    InsufficientBalance { balance: Uint128, required: Uint128 },

    #[error("Already voted on proposal {proposal_id}")]
    AlreadyVoted { proposal_id: u64 },

    #[error("Vote deposit mismatch: expected {expected}, got {paid}")]
    VoteDepositMismatch { expected: Coin, paid: Uint128 },
}
