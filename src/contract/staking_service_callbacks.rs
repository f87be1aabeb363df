//required in order for near_bindgen macro to work outside of lib.rs
use crate::*;
use crate::{
    domain::ValidatorRegistry,
    errors::illegal_state::{BATCH_LOCK_SHOULD_EXIST, REGISTERED_BATCH_UNDERFUNDED},
    interface::DepositData,
    near::is_promise_success,
};
use near_sdk::{json_types::U64, log, near_bindgen};

/// Result of the validator registry `register` call, as seen by the callback
struct RegistrationOutcome(bool);

impl ValidatorRegistry for RegistrationOutcome {
    fn register(
        &mut self,
        _amount: domain::YoctoNear,
        _deposit_data: &domain::DepositData,
    ) -> std::result::Result<(), String> {
        if self.0 {
            Ok(())
        } else {
            Err("register call failed".to_string())
        }
    }
}

#[near_bindgen]
impl PooledStakeContract {
    /// Completes the batch that was started by [form_batch](crate::interface::StakingService::form_batch).
    ///
    /// If the registry accepted the deposit, then one funding unit is consumed from the queue head.
    /// Either way, the batch lock is released.
    ///
    /// A validator that the registry accepted is always recorded. If the queue can no longer fund
    /// the batch, then the batch is recorded against whatever the queue holds and the shortfall is
    /// logged as an error.
    ///
    /// Returns the batch index if the batch was formed.
    #[private]
    pub fn on_register_validator(&mut self, deposit_data: DepositData) -> Option<U64> {
        if self.batch_lock.take().is_none() {
            log!("WARN: {}", BATCH_LOCK_SHOULD_EXIST);
        }

        let deposit_data: domain::DepositData = deposit_data.into();
        let registered = is_promise_success();
        if registered {
            if let Err(err) = self.pool.check_form_batch(&deposit_data) {
                log!("ERR: {} : {}", REGISTERED_BATCH_UNDERFUNDED, err);
                return Some(self.pool.record_batch(deposit_data).into());
            }
        }

        let mut outcome = RegistrationOutcome(registered);
        match self.pool.form_batch(&mut outcome, deposit_data) {
            Ok(index) => Some(index.into()),
            Err(err) => {
                log!("ERR: {}", err);
                None
            }
        }
    }
}
