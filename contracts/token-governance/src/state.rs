use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, BlockInfo, Coin, Order, StdResult, Storage, Timestamp, Uint128, Uint64};
use cw_storage_plus::{Bound, Item, Map};

use crate::error::ContractError;
use crate::gating::GatingAsset;

/// Default limit for proposal and vote pagination.
pub const DEFAULT_LIMIT: u64 = 30;

/// Validation bounds applied to every new proposal and vote.
#[cw_serde]
pub struct GovernanceBounds {
    /// Maximum title length in bytes.
    pub max_title_length: u64,
    /// Maximum description length in bytes.
    pub max_description_length: u64,
    /// Shortest allowed voting window, in seconds.
    pub min_voting_duration: u64,
    /// Longest allowed voting window, in seconds.
    pub max_voting_duration: u64,
    /// Gating asset balance an address must hold to vote.
    pub min_token_balance: Uint128,
    /// Maximum number of proposals whose voting window is open at the same time.
    pub max_proposals: u32,
}

impl GovernanceBounds {
    pub fn validate(&self) -> Result<(), ContractError> {
        if self.min_voting_duration == 0 || self.min_voting_duration > self.max_voting_duration {
            return Err(ContractError::InvalidVotingDurationBounds {
                min: self.min_voting_duration,
                max: self.max_voting_duration,
            });
        }
        if self.max_proposals == 0 {
            return Err(ContractError::InvalidMaxProposals {});
        }
        Ok(())
    }

    pub fn check_title(&self, title: &str) -> Result<(), ContractError> {
        let len = title.len() as u64;
        if len > self.max_title_length {
            return Err(ContractError::InvalidTitle {
                len,
                max: self.max_title_length,
            });
        }
        Ok(())
    }

    pub fn check_description(&self, description: &str) -> Result<(), ContractError> {
        let len = description.len() as u64;
        if len > self.max_description_length {
            return Err(ContractError::InvalidDescription {
                len,
                max: self.max_description_length,
            });
        }
        Ok(())
    }

    pub fn check_duration(&self, duration: u64) -> Result<(), ContractError> {
        if duration < self.min_voting_duration || duration > self.max_voting_duration {
            return Err(ContractError::InvalidDuration {
                duration,
                min: self.min_voting_duration,
                max: self.max_voting_duration,
            });
        }
        Ok(())
    }
}

/// Global governance configuration. Exactly one instance exists per contract.
#[cw_serde]
pub struct Config {
    /// The only address allowed to create proposals, update the config and toggle the pause flag.
    pub authority: Addr,
    /// Asset whose balance gates voting.
    pub gating_asset: GatingAsset,
    /// While set, no new proposals can be created.
    pub paused: bool,
    pub bounds: GovernanceBounds,
    /// Refundable deposit attached to every vote, returned on `CloseVote`.
    pub vote_deposit: Option<Coin>,
    /// Sequence counter, equals the id of the next proposal.
    pub proposal_count: u64,
}

impl Config {
    pub fn validate(&self) -> Result<(), ContractError> {
        self.bounds.validate()?;
        if let Some(deposit) = &self.vote_deposit {
            if deposit.amount.is_zero() || deposit.denom.is_empty() {
                return Err(ContractError::InvalidVoteDeposit {});
            }
        }
        Ok(())
    }
}

#[cw_serde]
pub struct Proposal {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub proposer: Addr,
    pub start_time: Timestamp,
    /// End of the voting window, exclusive.
    pub end_time: Timestamp,
    /// Number of distinct addresses that voted on the proposal.
    pub votes: Uint64,
}

#[cw_serde]
#[derive(Copy)]
pub enum ProposalStatus {
    /// `block.time < end_time`, votes are accepted.
    Open,
    /// `block.time >= end_time`, vote records may be reclaimed.
    Closed,
}

impl std::fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ProposalStatus::Open => write!(f, "open"),
            ProposalStatus::Closed => write!(f, "closed"),
        }
    }
}

impl Proposal {
    pub fn status(&self, block: &BlockInfo) -> ProposalStatus {
        if block.time < self.end_time {
            ProposalStatus::Open
        } else {
            ProposalStatus::Closed
        }
    }

    pub fn is_open(&self, block: &BlockInfo) -> bool {
        self.status(block) == ProposalStatus::Open
    }
}

/// Proof that `voter` has voted on `proposal_id`.
#[cw_serde]
pub struct VoteRecord {
    pub proposal_id: u64,
    pub voter: Addr,
    pub cast_at: Timestamp,
    /// Deposit paid with the vote, refunded when the record is closed.
    pub deposit: Option<Coin>,
}

pub const CONFIG: Item<Config> = Item::new("config");

/// All proposals ever created, keyed by sequence index.
pub const PROPOSALS: Map<u64, Proposal> = Map::new("proposals");

/// Vote records keyed by (proposal id, voter).
pub const VOTES: Map<(u64, &Addr), VoteRecord> = Map::new("votes");

/// Every proposal keyed by (end time in nanos, id). Entries are never pruned;
/// ranging above the current time yields the open ones without scanning
/// closed proposals.
pub const PROPOSALS_BY_END: Map<(u64, u64), ()> = Map::new("proposals_by_end");

/// Returns the number of proposals whose voting window is still open at `now`.
pub fn count_open_proposals(storage: &dyn Storage, now: Timestamp) -> StdResult<u64> {
    let min = Bound::exclusive((now.nanos(), u64::MAX));
    let mut count = 0u64;
    for key in PROPOSALS_BY_END.keys(storage, Some(min), None, Order::Ascending) {
        key?;
        count += 1;
    }
    Ok(count)
}
