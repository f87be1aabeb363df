//! defines the interfaces that the contract exposes externally

mod model;
mod operator;
pub mod oracle_governance;
pub mod share_token;
pub mod staking_service;
mod validator_registry;

pub use model::*;
pub use operator::*;
pub use oracle_governance::Governance;
pub use share_token::ShareToken;
pub use staking_service::StakingService;
pub use validator_registry::*;
