use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Coin;
use exec_control::pause::PauseInfoResponse;

use crate::gating::UncheckedGatingAsset;
use crate::state::{GovernanceBounds, Proposal, ProposalStatus, VoteRecord};

#[cw_serde]
pub struct InstantiateMsg {
    /// Address allowed to create proposals and pause the contract. Defaults to the instantiator.
    pub authority: Option<String>,
    /// Asset whose balance makes an address eligible to vote.
    pub gating_asset: UncheckedGatingAsset,
    pub bounds: GovernanceBounds,
    /// Refundable deposit every voter attaches to a vote. None disables deposits.
    pub vote_deposit: Option<Coin>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Opens a new proposal with a voting window of `duration` seconds. Authority only.
    CreateProposal {
        title: String,
        description: String,
        duration: u64,
    },
    /// Casts the sender's vote on an open proposal.
    Vote { proposal_id: u64 },
    /// Removes the sender's vote record of a closed proposal and refunds its deposit.
    CloseVote { proposal_id: u64 },
    /// Raises or lowers the pause flag. Authority only.
    SetPaused { paused: bool },
    /// Updates the authority and/or the validation bounds. Authority only.
    UpdateConfig {
        authority: Option<String>,
        bounds: Option<GovernanceBounds>,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(crate::state::Config)]
    Config {},
    /// Returns information about if proposal creation is currently paused.
    #[returns(PauseInfoResponse)]
    PauseInfo {},
    #[returns(ProposalResponse)]
    Proposal { proposal_id: u64 },
    #[returns(ProposalListResponse)]
    ListProposals {
        start_after: Option<u64>,
        limit: Option<u64>,
    },
    /// Returns the vote record of `voter`, or a not-found error if there is none.
    #[returns(crate::state::VoteRecord)]
    Vote { proposal_id: u64, voter: String },
    #[returns(VoteListResponse)]
    ListVotes {
        proposal_id: u64,
        start_after: Option<String>,
        limit: Option<u64>,
    },
}

#[cw_serde]
pub struct ProposalResponse {
    pub id: u64,
    pub proposal: Proposal,
    /// Status at the height of the query.
    pub status: ProposalStatus,
}

#[cw_serde]
pub struct ProposalListResponse {
    pub proposals: Vec<ProposalResponse>,
}

#[cw_serde]
pub struct VoteListResponse {
    pub votes: Vec<VoteRecord>,
}

#[cw_serde]
pub struct MigrateMsg {}
