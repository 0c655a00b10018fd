#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Addr, BankMsg, Binary, Coin, Deps, DepsMut, Env, MessageInfo, Order,
    Response, StdError, StdResult, Timestamp, Uint64,
};
use cw2::set_contract_version;
use cw_storage_plus::Bound;
use cw_utils::{must_pay, nonpayable};
use exec_control::pause::{ensure_unpaused, PauseInfoResponse};

use crate::error::ContractError;
use crate::msg::{
    ExecuteMsg, InstantiateMsg, MigrateMsg, ProposalListResponse, ProposalResponse, QueryMsg,
    VoteListResponse,
};
use crate::state::{
    count_open_proposals, Config, GovernanceBounds, Proposal, VoteRecord, CONFIG, DEFAULT_LIMIT,
    PROPOSALS, PROPOSALS_BY_END, VOTES,
};

pub(crate) const CONTRACT_NAME: &str = "crates.io:token-governance";
pub(crate) const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

//--------------------------------------------------------------------------------------------------
// Instantiation
//--------------------------------------------------------------------------------------------------

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    if CONFIG.may_load(deps.storage)?.is_some() {
        return Err(ContractError::AlreadyInitialized {});
    }

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let authority = match msg.authority {
        Some(authority) => deps.api.addr_validate(&authority)?,
        None => info.sender,
    };

    let config = Config {
        authority,
        gating_asset: msg.gating_asset.into_checked(deps.api)?,
        paused: false,
        bounds: msg.bounds,
        vote_deposit: msg.vote_deposit,
        proposal_count: 0,
    };
    config.validate()?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("authority", config.authority)
        .add_attribute("min_voting_duration", config.bounds.min_voting_duration.to_string())
        .add_attribute("max_voting_duration", config.bounds.max_voting_duration.to_string())
        .add_attribute("max_proposals", config.bounds.max_proposals.to_string()))
}

//--------------------------------------------------------------------------------------------------
// Executions
//--------------------------------------------------------------------------------------------------

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // permissioned - authority
        ExecuteMsg::CreateProposal {
            title,
            description,
            duration,
        } => execute_create_proposal(deps, env, info, title, description, duration),
        // permissionless, gated by the voter's asset balance
        ExecuteMsg::Vote { proposal_id } => execute_vote(deps, env, info, proposal_id),
        ExecuteMsg::CloseVote { proposal_id } => execute_close_vote(deps, env, info, proposal_id),
        // permissioned - authority
        ExecuteMsg::SetPaused { paused } => execute_set_paused(deps, info, paused),
        ExecuteMsg::UpdateConfig { authority, bounds } => {
            execute_update_config(deps, info, authority, bounds)
        }
    }
}

pub fn execute_create_proposal(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    title: String,
    description: String,
    duration: u64,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    ensure_authority(&config, &info.sender)?;
    ensure_unpaused(config.paused)?;

    config.bounds.check_title(&title)?;
    config.bounds.check_description(&description)?;
    config.bounds.check_duration(duration)?;

    let now = env.block.time;
    if count_open_proposals(deps.storage, now)? >= u64::from(config.bounds.max_proposals) {
        return Err(ContractError::MaxProposalsReached {
            max: config.bounds.max_proposals,
        });
    }

    let proposal_id = config.proposal_count;
    let proposal = Proposal {
        id: proposal_id,
        title,
        description,
        proposer: info.sender,
        start_time: now,
        end_time: voting_end(now, duration)?,
        votes: Uint64::zero(),
    };

    PROPOSALS.update(deps.storage, proposal_id, |existing| match existing {
        Some(_) => Err(ContractError::ProposalAlreadyExists { proposal_id }),
        None => Ok(proposal.clone()),
    })?;
    PROPOSALS_BY_END.save(deps.storage, (proposal.end_time.nanos(), proposal_id), &())?;

    config.proposal_count = proposal_id
        .checked_add(1)
        .ok_or_else(|| StdError::generic_err("proposal count overflow"))?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "create_proposal")
        .add_attribute("proposal_id", proposal_id.to_string())
        .add_attribute("proposer", proposal.proposer)
        .add_attribute("end_time", proposal.end_time.seconds().to_string()))
}

pub fn execute_vote(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    proposal_id: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut proposal = PROPOSALS
        .may_load(deps.storage, proposal_id)?
        .ok_or(ContractError::ProposalNotFound { proposal_id })?;

    if !proposal.is_open(&env.block) {
        return Err(ContractError::VotingPeriodEnded { proposal_id });
    }

    let balance = config
        .gating_asset
        .query_balance(&deps.querier, &info.sender)?;
    if balance < config.bounds.min_token_balance {
        return Err(ContractError::InsufficientBalance {
            balance,
            required: config.bounds.min_token_balance,
        });
    }

    let deposit = collect_vote_deposit(&info, config.vote_deposit.as_ref())?;

    // The record key is unique per (proposal, voter): the write itself is the double-vote guard.
    VOTES.update(
        deps.storage,
        (proposal_id, &info.sender),
        |existing| match existing {
            Some(_) => Err(ContractError::AlreadyVoted { proposal_id }),
            None => Ok(VoteRecord {
                proposal_id,
                voter: info.sender.clone(),
                cast_at: env.block.time,
                deposit,
            }),
        },
    )?;

    proposal.votes = proposal.votes.checked_add(Uint64::one())?;
    PROPOSALS.save(deps.storage, proposal_id, &proposal)?;

    Ok(Response::new()
        .add_attribute("action", "vote")
        .add_attribute("proposal_id", proposal_id.to_string())
        .add_attribute("voter", info.sender)
        .add_attribute("votes", proposal.votes.to_string()))
}

pub fn execute_close_vote(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    proposal_id: u64,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;

    let record = VOTES
        .may_load(deps.storage, (proposal_id, &info.sender))?
        .ok_or_else(|| ContractError::VoteNotFound {
            proposal_id,
            voter: info.sender.to_string(),
        })?;

    let proposal = PROPOSALS.load(deps.storage, proposal_id)?;
    if proposal.is_open(&env.block) {
        return Err(ContractError::VotingPeriodNotEnded { proposal_id });
    }

    VOTES.remove(deps.storage, (proposal_id, &info.sender));

    let mut resp = Response::new()
        .add_attribute("action", "close_vote")
        .add_attribute("proposal_id", proposal_id.to_string())
        .add_attribute("voter", info.sender.clone());

    if let Some(deposit) = record.deposit {
        resp = resp
            .add_attribute("refund", deposit.to_string())
            .add_message(BankMsg::Send {
                to_address: info.sender.to_string(),
                amount: vec![deposit],
            });
    }

    Ok(resp)
}

pub fn execute_set_paused(
    deps: DepsMut,
    info: MessageInfo,
    paused: bool,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    ensure_authority(&config, &info.sender)?;

    config.paused = paused;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "set_paused")
        .add_attribute("sender", info.sender)
        .add_attribute("paused", paused.to_string()))
}

pub fn execute_update_config(
    deps: DepsMut,
    info: MessageInfo,
    authority: Option<String>,
    bounds: Option<GovernanceBounds>,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    ensure_authority(&config, &info.sender)?;

    if let Some(authority) = authority {
        config.authority = deps.api.addr_validate(&authority)?;
    }
    if let Some(bounds) = bounds {
        config.bounds = bounds;
    }

    config.validate()?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "update_config")
        .add_attribute("authority", config.authority)
        .add_attribute("min_voting_duration", config.bounds.min_voting_duration.to_string())
        .add_attribute("max_voting_duration", config.bounds.max_voting_duration.to_string())
        .add_attribute("min_token_balance", config.bounds.min_token_balance)
        .add_attribute("max_proposals", config.bounds.max_proposals.to_string()))
}

//--------------------------------------------------------------------------------------------------
// Queries
//--------------------------------------------------------------------------------------------------

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&CONFIG.load(deps.storage)?),
        QueryMsg::PauseInfo {} => to_json_binary(&query_pause_info(deps)?),
        QueryMsg::Proposal { proposal_id } => {
            to_json_binary(&query_proposal(deps, env, proposal_id)?)
        }
        QueryMsg::ListProposals { start_after, limit } => {
            to_json_binary(&query_list_proposals(deps, env, start_after, limit)?)
        }
        QueryMsg::Vote { proposal_id, voter } => {
            to_json_binary(&query_vote(deps, proposal_id, voter)?)
        }
        QueryMsg::ListVotes {
            proposal_id,
            start_after,
            limit,
        } => to_json_binary(&query_list_votes(deps, proposal_id, start_after, limit)?),
    }
}

pub fn query_pause_info(deps: Deps) -> StdResult<PauseInfoResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(PauseInfoResponse::from(config.paused))
}

pub fn query_proposal(deps: Deps, env: Env, proposal_id: u64) -> StdResult<ProposalResponse> {
    let proposal = PROPOSALS
        .may_load(deps.storage, proposal_id)?
        .ok_or_else(|| StdError::not_found(format!("proposal {proposal_id}")))?;
    Ok(ProposalResponse {
        id: proposal_id,
        status: proposal.status(&env.block),
        proposal,
    })
}

pub fn query_list_proposals(
    deps: Deps,
    env: Env,
    start_after: Option<u64>,
    limit: Option<u64>,
) -> StdResult<ProposalListResponse> {
    let min = start_after.map(Bound::exclusive);
    let limit = limit.unwrap_or(DEFAULT_LIMIT);
    let proposals = PROPOSALS
        .range(deps.storage, min, None, Order::Ascending)
        .take(limit as usize)
        .map(|item| {
            item.map(|(id, proposal)| ProposalResponse {
                id,
                status: proposal.status(&env.block),
                proposal,
            })
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(ProposalListResponse { proposals })
}

pub fn query_vote(deps: Deps, proposal_id: u64, voter: String) -> StdResult<VoteRecord> {
    let voter = deps.api.addr_validate(&voter)?;
    VOTES.load(deps.storage, (proposal_id, &voter))
}

pub fn query_list_votes(
    deps: Deps,
    proposal_id: u64,
    start_after: Option<String>,
    limit: Option<u64>,
) -> StdResult<VoteListResponse> {
    let start_after = start_after
        .map(|addr| deps.api.addr_validate(&addr))
        .transpose()?;
    let min = start_after.as_ref().map(Bound::exclusive);
    let limit = limit.unwrap_or(DEFAULT_LIMIT);
    let votes = VOTES
        .prefix(proposal_id)
        .range(deps.storage, min, None, Order::Ascending)
        .take(limit as usize)
        .map(|item| item.map(|(_, record)| record))
        .collect::<StdResult<Vec<_>>>()?;

    Ok(VoteListResponse { votes })
}

//--------------------------------------------------------------------------------------------------
// Helpers
//--------------------------------------------------------------------------------------------------

/// Checks the funds attached to a vote against the configured deposit and
/// returns the deposit to record. Without a configured deposit the vote must
/// carry no funds.
fn collect_vote_deposit(
    info: &MessageInfo,
    required: Option<&Coin>,
) -> Result<Option<Coin>, ContractError> {
    match required {
        None => {
            nonpayable(info)?;
            Ok(None)
        }
        Some(required) => {
            let paid = must_pay(info, &required.denom)?;
            if paid != required.amount {
                return Err(ContractError::VoteDepositMismatch {
                    expected: required.clone(),
                    paid,
                });
            }
            Ok(Some(required.clone()))
        }
    }
}

/// End of a voting window opened at `start`. Fails with an overflow if the
/// end does not fit in a `Timestamp`.
fn voting_end(start: Timestamp, duration: u64) -> Result<Timestamp, ContractError> {
    let end = Uint64::new(duration)
        .checked_mul(Uint64::new(1_000_000_000))?
        .checked_add(Uint64::new(start.nanos()))?;
    Ok(Timestamp::from_nanos(end.u64()))
}

fn ensure_authority(config: &Config, sender: &Addr) -> Result<(), ContractError> {
    if *sender != config.authority {
        return Err(ContractError::Unauthorized {});
    }
    Ok(())
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    // Set contract to version to latest
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::default())
}
