use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Api, QuerierWrapper, StdResult, Uint128};
use cw20::{BalanceResponse, Cw20QueryMsg};

use crate::error::ContractError;

/// Asset whose balance makes an address eligible to vote, as submitted by the
/// instantiator.
#[cw_serde]
pub enum UncheckedGatingAsset {
    /// A bank module denom, e.g. `untrn` or an ibc denom.
    Native { denom: String },
    /// A CW20 token contract.
    Cw20 { contract_addr: String },
}

/// Validated form of [`UncheckedGatingAsset`].
#[cw_serde]
pub enum GatingAsset {
    Native { denom: String },
    Cw20 { contract_addr: Addr },
}

impl UncheckedGatingAsset {
    pub fn into_checked(self, api: &dyn Api) -> Result<GatingAsset, ContractError> {
        match self {
            UncheckedGatingAsset::Native { denom } => {
                if denom.trim().is_empty() {
                    return Err(ContractError::InvalidGatingAsset {
                        reason: "native denom is empty".to_string(),
                    });
                }
                Ok(GatingAsset::Native { denom })
            }
            UncheckedGatingAsset::Cw20 { contract_addr } => {
                let contract_addr = api.addr_validate(&contract_addr).map_err(|e| {
                    ContractError::InvalidGatingAsset {
                        reason: e.to_string(),
                    }
                })?;
                Ok(GatingAsset::Cw20 { contract_addr })
            }
        }
    }
}

impl GatingAsset {
    /// Reads `holder`'s balance of the asset from the asset ledger: the bank
    /// module for native denoms, the token contract for CW20.
    pub fn query_balance(&self, querier: &QuerierWrapper, holder: &Addr) -> StdResult<Uint128> {
        match self {
            GatingAsset::Native { denom } => Ok(querier.query_balance(holder, denom)?.amount),
            GatingAsset::Cw20 { contract_addr } => {
                let res: BalanceResponse = querier.query_wasm_smart(
                    contract_addr,
                    &Cw20QueryMsg::Balance {
                        address: holder.to_string(),
                    },
                )?;
                Ok(res.balance)
            }
        }
    }
}
