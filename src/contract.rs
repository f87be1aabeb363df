pub mod operator;
pub mod oracle_governance;
pub mod settings;
pub mod share_token;
pub mod staking_service;
pub mod staking_service_callbacks;

use crate::{
    domain,
    errors::asserts::{PREDECESSOR_MUST_BE_OPERATOR, PREDECESSOR_MUST_BE_SELF_OR_OPERATOR},
    near, PooledStakeContract,
};
use near_sdk::env;

impl PooledStakeContract {
    pub(crate) fn assert_predecessor_is_operator(&self) {
        assert_eq!(
            env::predecessor_account_id(),
            self.operator_id,
            "{}",
            PREDECESSOR_MUST_BE_OPERATOR
        );
    }

    pub(crate) fn assert_predecessor_is_self_or_operator(&self) {
        let predecessor_account_id = env::predecessor_account_id();
        assert!(
            predecessor_account_id == env::current_account_id()
                || predecessor_account_id == self.operator_id,
            "{}",
            PREDECESSOR_MUST_BE_SELF_OR_OPERATOR
        );
    }

    /// actions that depend on the queue head are blocked while a validator registration is in
    /// flight
    pub(crate) fn assert_no_batch_lock(&self) {
        if self.batch_lock.is_some() {
            near::unwrap_or_panic::<()>(Err(domain::Error::BatchInProgress));
        }
    }
}
