//required in order for near_bindgen macro to work outside of lib.rs
use crate::*;
use crate::{
    domain::BatchLock,
    interface::{
        ext_self_callbacks, ext_validator_registry, Contribution, DepositData, FundingBatch,
        StakingService, YoctoNear,
    },
    near::{unwrap_or_panic, NO_DEPOSIT},
};
use near_sdk::{
    json_types::{Base64VecU8, ValidAccountId, U64},
    near_bindgen, Promise,
};

#[near_bindgen]
impl StakingService for PooledStakeContract {
    fn pending_balance_of(&self, account_id: ValidAccountId) -> YoctoNear {
        self.pool.pending_balance_of(account_id.as_ref()).into()
    }

    fn claimable_balance(&self, account_id: ValidAccountId) -> YoctoNear {
        self.pool.claimable_balance(account_id.as_ref()).into()
    }

    fn contributions(&self, account_id: ValidAccountId) -> Vec<Contribution> {
        self.pool
            .contributions(account_id.as_ref())
            .into_iter()
            .map(Contribution::from)
            .collect()
    }

    fn unstakable_balance(&self, account_id: ValidAccountId) -> YoctoNear {
        self.pool.unstakable_balance(account_id.as_ref()).into()
    }

    fn total_pending_balance(&self) -> YoctoNear {
        self.pool.total_pending_balance().into()
    }

    fn deployed_balance(&self) -> YoctoNear {
        unwrap_or_panic(self.pool.deployed_balance()).into()
    }

    fn rewards(&self) -> YoctoNear {
        self.pool.rewards().into()
    }

    fn fee(&self) -> u16 {
        self.pool.fee().value()
    }

    fn governor_id(&self) -> AccountId {
        self.pool.governor_id().clone()
    }

    fn min_stake(&self) -> YoctoNear {
        self.config.min_stake().into()
    }

    fn funding_unit(&self) -> YoctoNear {
        self.pool.funding_unit().into()
    }

    fn validator_count(&self) -> U64 {
        self.pool.validator_count().into()
    }

    fn validator(&self, index: U64) -> Base64VecU8 {
        unwrap_or_panic(self.pool.validator(index.0)).into()
    }

    fn funding_batch(&self, index: U64) -> FundingBatch {
        unwrap_or_panic(self.pool.funding_batch(index.0)).into()
    }

    #[payable]
    fn stake(&mut self) {
        unwrap_or_panic(self.pool.stake(
            &env::predecessor_account_id(),
            env::attached_deposit().into(),
            self.config.min_stake(),
        ));
    }

    fn unstake(&mut self) -> Promise {
        self.assert_no_batch_lock();
        let depositor = env::predecessor_account_id();
        let amount = unwrap_or_panic(self.pool.unstake(&depositor));
        Promise::new(depositor).transfer(amount.value())
    }

    fn form_batch(&mut self, deposit_data: DepositData) -> Promise {
        self.assert_no_batch_lock();
        let deposit_data: domain::DepositData = deposit_data.into();
        unwrap_or_panic(self.pool.check_form_batch(&deposit_data));

        self.batch_lock = Some(BatchLock::new(self.pool.validator_count()));

        let gas_config = self.config.gas_config();
        ext_validator_registry::register(
            deposit_data.pubkey.clone().into(),
            deposit_data.withdrawal_credentials.clone().into(),
            deposit_data.signature.clone().into(),
            deposit_data.deposit_data_root.clone().into(),
            &self.validator_registry_id,
            self.pool.funding_unit().value(),
            gas_config.register_validator().value(),
        )
        .then(ext_self_callbacks::on_register_validator(
            deposit_data.into(),
            &env::current_account_id(),
            NO_DEPOSIT.value(),
            gas_config.on_register_validator().value(),
        ))
    }

    fn claim(&mut self) -> YoctoNear {
        unwrap_or_panic(self.pool.claim(
            &env::predecessor_account_id(),
            &mut self.ledger,
            &env::current_account_id(),
        ))
        .into()
    }

    fn set_fee(&mut self, fee: u32) {
        unwrap_or_panic(self.pool.set_fee(&env::predecessor_account_id(), fee));
    }

    fn set_rewards(&mut self, gross_rewards: YoctoNear) {
        unwrap_or_panic(self.pool.set_rewards(
            &env::predecessor_account_id(),
            gross_rewards.into(),
            &mut self.ledger,
            &env::current_account_id(),
        ));
    }

    fn set_governor(&mut self, governor_id: ValidAccountId) {
        unwrap_or_panic(
            self.pool
                .set_governor(&env::predecessor_account_id(), governor_id.as_ref()),
        );
    }
}
