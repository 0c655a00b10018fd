pub mod contract;
mod error;
pub mod gating;
pub mod msg;
pub mod state;

#[cfg(test)]
mod testing;


pub use crate::error::ContractError;
