pub mod config;
pub mod contract;
pub mod core;
pub mod domain;
pub mod errors;
pub mod interface;
pub mod near;

#[cfg(test)]
pub(crate) mod test_utils;

pub use contract::settings::*;

use crate::{
    config::Config,
    domain::{BasisPoints, BatchLock, OracleGovernance, ShareLedger, StakePool},
    errors::asserts::CONTRACT_ALREADY_INITIALIZED,
};
use near_sdk::{
    borsh::{self, BorshDeserialize, BorshSerialize},
    env, near_bindgen, wee_alloc, AccountId, PanicOnDefault,
};

#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[near_bindgen]
#[derive(BorshDeserialize, BorshSerialize, PanicOnDefault)]
pub struct PooledStakeContract {
    /// Operator is allowed to perform operator actions on the contract
    operator_id: AccountId,
    /// certifies each funding unit before it is deployed
    validator_registry_id: AccountId,

    config: Config,
    /// when the config was last changed
    /// the block info can be looked up via its block index: https://docs.near.org/docs/api/rpc#block
    config_change_block_height: domain::BlockHeight,

    ledger: ShareLedger,
    pool: StakePool,
    governance: OracleGovernance,

    /// set while a validator registration is in flight
    batch_lock: Option<BatchLock>,
}

#[near_bindgen]
impl PooledStakeContract {
    /// ## Notes
    /// - the contract account owns the share ledger, i.e., only the stake pool can mint shares and
    ///   re-price the token
    /// - unless specified otherwise, the governor is the contract account, which means the fee
    ///   and rewards are set through oracle governance
    ///
    /// ## Panics
    /// - if the contract is already initialized
    /// - if the settings are invalid
    #[init]
    pub fn new(settings: ContractSettings) -> Self {
        assert!(!env::state_exists(), CONTRACT_ALREADY_INITIALIZED);
        if let Some(err) = settings.validate() {
            env::panic(err.to_string().as_bytes());
        }

        // fee was validated above
        let fee = BasisPoints::new(settings.fee() as u32).unwrap_or_default();
        let mut config = Config::default();
        if let Some(settings_config) = settings.config.clone() {
            config.merge(settings_config);
        }

        Self {
            operator_id: settings.operator_id.as_ref().clone(),
            validator_registry_id: settings.validator_registry_id.as_ref().clone(),
            config,
            config_change_block_height: domain::BlockHeight::from_env(),
            ledger: ShareLedger::new(env::current_account_id()),
            pool: StakePool::new(
                settings.governor_id(),
                settings.funding_unit().into(),
                fee,
            ),
            governance: OracleGovernance::new(&settings.oracles()),
            batch_lock: None,
        }
    }
}
