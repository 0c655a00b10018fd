use std::collections::HashMap;
use std::marker::PhantomData;

use cosmwasm_std::testing::{MockApi, MockQuerier, MockStorage};
use cosmwasm_std::{
    from_json, to_json_binary, Addr, Coin, ContractResult, Empty, OwnedDeps, Querier,
    QuerierResult, QueryRequest, SystemError, SystemResult, Uint128, WasmQuery,
};
use cw20::{BalanceResponse, Cw20QueryMsg};

pub fn mock_dependencies() -> OwnedDeps<MockStorage, MockApi, WasmMockQuerier> {
    OwnedDeps {
        storage: MockStorage::default(),
        api: MockApi::default(),
        querier: WasmMockQuerier::new(MockQuerier::new(&[])),
        custom_query_type: PhantomData,
    }
}

/// Serves bank balances through the base querier and CW20 `Balance` queries
/// for every token registered with `set_cw20_balance`.
pub struct WasmMockQuerier {
    base: MockQuerier,
    // token contract -> holder -> balance
    cw20_balances: HashMap<String, HashMap<String, Uint128>>,
}

impl Querier for WasmMockQuerier {
    fn raw_query(&self, bin_request: &[u8]) -> QuerierResult {
        let request: QueryRequest<Empty> = match from_json(bin_request) {
            Ok(v) => v,
            Err(e) => {
                return QuerierResult::Err(SystemError::InvalidRequest {
                    error: format!("Parsing query request: {}", e),
                    request: bin_request.into(),
                });
            }
        };
        self.handle_query(&request)
    }
}

impl WasmMockQuerier {
    pub fn new(base: MockQuerier) -> Self {
        WasmMockQuerier {
            base,
            cw20_balances: HashMap::new(),
        }
    }

    pub fn handle_query(&self, request: &QueryRequest<Empty>) -> QuerierResult {
        match &request {
            QueryRequest::Wasm(WasmQuery::Smart { contract_addr, msg }) => {
                let Some(balances) = self.cw20_balances.get(contract_addr) else {
                    return SystemResult::Err(SystemError::NoSuchContract {
                        addr: contract_addr.clone(),
                    });
                };
                match from_json(msg) {
                    Ok(Cw20QueryMsg::Balance { address }) => {
                        let balance = balances.get(&address).copied().unwrap_or_default();
                        SystemResult::Ok(ContractResult::from(to_json_binary(&BalanceResponse {
                            balance,
                        })))
                    }
                    _ => SystemResult::Err(SystemError::UnsupportedRequest {
                        kind: "cw20 query".to_string(),
                    }),
                }
            }
            _ => self.base.handle_query(request),
        }
    }

    pub fn set_native_balance(&mut self, holder: &Addr, balance: Vec<Coin>) {
        self.base.bank.update_balance(holder.as_str(), balance);
    }

    pub fn set_cw20_balance(&mut self, token: &Addr, holder: &Addr, amount: u128) {
        self.cw20_balances
            .entry(token.to_string())
            .or_default()
            .insert(holder.to_string(), Uint128::new(amount));
    }
}
