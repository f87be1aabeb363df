use crate::interface::{contract_state::ContractState, Config};
use near_sdk::AccountId;

pub trait Operator {
    ////////////////////////////
    //     VIEW METHODS    ///
    /// //////////////////////

    fn operator_id(&self) -> AccountId;

    /// returns the contract's state
    /// - useful for monitoring and debugging
    fn contract_state(&self) -> ContractState;

    fn config(&self) -> Config;

    //////////////////////////////
    //     CHANGE METHODS    ///
    /// ////////////////////////

    /// resets the config to its defaults
    /// - can only be invoked by the operator account
    fn reset_config_default(&mut self) -> Config;

    /// applies the specified config values
    /// - can only be invoked by the operator account
    fn update_config(&mut self, config: Config) -> Config;

    /// releases the batch lock if the validator registration workflow got stuck
    /// - can only be invoked by the contract or the operator account
    fn clear_batch_lock(&mut self);
}
