use crate::interface::{DepositData, YoctoNear};
use near_sdk::{
    ext_contract,
    json_types::{Base64VecU8, U64},
};

/// External validator registry that certifies a funding unit.
///
/// The funding unit is attached as deposit. If the registry rejects the deposit, then the call
/// fails and the attached deposit is refunded.
#[ext_contract(ext_validator_registry)]
pub trait ExtValidatorRegistry {
    fn register(
        &mut self,
        pubkey: Base64VecU8,
        withdrawal_credentials: Base64VecU8,
        signature: Base64VecU8,
        deposit_data_root: Base64VecU8,
    );

    fn funding_unit(&self) -> YoctoNear;
}

#[ext_contract(ext_self_callbacks)]
pub trait ExtSelfCallbacks {
    /// Completes the [form_batch](crate::interface::StakingService::form_batch) workflow.
    ///
    /// Releases the batch lock and consumes the queue if the registration succeeded.
    ///
    /// Returns the funding batch index, or None if the registry rejected the deposit.
    fn on_register_validator(&mut self, deposit_data: DepositData) -> Option<U64>;
}
