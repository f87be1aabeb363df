//required in order for near_bindgen macro to work outside of lib.rs
use crate::*;
use crate::{
    errors::asserts::BATCH_LOCK_NOT_EXPIRED,
    interface::{contract_state::ContractState, Operator},
    near::unwrap_or_panic,
};
use near_sdk::{env, near_bindgen};

#[near_bindgen]
impl Operator for PooledStakeContract {
    fn operator_id(&self) -> AccountId {
        self.operator_id.clone()
    }

    fn contract_state(&self) -> ContractState {
        ContractState {
            block_height: domain::BlockHeight::from_env().into(),
            config_change_block_height: self.config_change_block_height.into(),
            operator_id: self.operator_id.clone(),
            validator_registry_id: self.validator_registry_id.clone(),
            governor_id: self.pool.governor_id().clone(),
            token_owner_id: self.ledger.owner_id().clone(),
            funding_unit: self.pool.funding_unit().into(),
            fee: self.pool.fee().value(),
            total_pending_balance: self.pool.total_pending_balance().into(),
            pending_stake_count: self.pool.queue().len().into(),
            deployed_balance: unwrap_or_panic(self.pool.deployed_balance()).into(),
            validator_count: self.pool.validator_count().into(),
            rewards: self.pool.rewards().into(),
            reported_rewards: self.pool.reported_rewards().into(),
            cumulative_underlying: unwrap_or_panic(self.pool.cumulative_underlying()).into(),
            total_shares: self.ledger.total_shares().into(),
            total_supply: self.ledger.total_supply().into(),
            exchange_ratio: self.ledger.ratio().into(),
            oracle_count: self.governance.oracle_count().into(),
            proposal_count: self.governance.proposal_count().into(),
            batch_lock: self.batch_lock.map(Into::into),
        }
    }

    fn config(&self) -> interface::Config {
        self.config.into()
    }

    fn reset_config_default(&mut self) -> interface::Config {
        self.assert_predecessor_is_operator();
        self.config = Config::default();
        self.config_change_block_height = domain::BlockHeight::from_env();
        self.config.into()
    }

    fn update_config(&mut self, config: interface::Config) -> interface::Config {
        self.assert_predecessor_is_operator();
        self.config.merge(config);
        self.config_change_block_height = domain::BlockHeight::from_env();
        self.config.into()
    }

    /// The lock is only needed until the `on_register_validator` callback runs. If the callback
    /// never ran, e.g., because it ran out of gas, then the operator releases the lock manually.
    ///
    /// The lock can only be cleared once it is older than the configured batch lock timeout,
    /// at which point the callback can no longer be pending.
    fn clear_batch_lock(&mut self) {
        self.assert_predecessor_is_self_or_operator();
        if let Some(lock) = self.batch_lock {
            let expires_at = lock.block_height.value() + self.config.batch_lock_timeout();
            assert!(
                env::block_index() >= expires_at,
                "{}",
                BATCH_LOCK_NOT_EXPIRED
            );
        }
        self.batch_lock = None;
    }
}
