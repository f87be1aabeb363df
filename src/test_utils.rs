use crate::{
    domain::{
        self, DEPOSIT_DATA_ROOT_LEN, PUBKEY_LEN, SIGNATURE_LEN, WITHDRAWAL_CREDENTIALS_LEN,
    },
    interface::StakingService,
    near::YOCTO,
    ContractSettings, PooledStakeContract,
};
use near_sdk::{json_types::ValidAccountId, testing_env, AccountId, MockedBlockchain, VMContext};
use std::convert::TryFrom;

pub fn contract_account_id() -> AccountId {
    "pooled-stake.oysterpack.near".to_string()
}

pub fn operator_id() -> AccountId {
    "operator.oysterpack.near".to_string()
}

pub fn validator_registry_id() -> AccountId {
    "validator-registry.near".to_string()
}

pub fn alice() -> AccountId {
    "alice.near".to_string()
}

pub fn bob() -> AccountId {
    "bob.near".to_string()
}

pub fn charlie() -> AccountId {
    "charlie.near".to_string()
}

pub fn to_valid_account_id(account_id: &str) -> ValidAccountId {
    ValidAccountId::try_from(account_id).unwrap()
}

pub fn new_context(predecessor_account_id: &str) -> VMContext {
    VMContext {
        current_account_id: contract_account_id(),
        signer_account_id: predecessor_account_id.to_string(),
        signer_account_pk: vec![0, 1, 2],
        predecessor_account_id: predecessor_account_id.to_string(),
        input: vec![],
        epoch_height: 0,
        block_index: 0,
        block_timestamp: 0,
        account_balance: 10_000 * YOCTO,
        account_locked_balance: 0,
        storage_usage: 10u64.pow(6),
        attached_deposit: 0,
        prepaid_gas: 10u64.pow(18),
        random_seed: vec![0, 1, 2],
        is_view: false,
        output_data_receivers: vec![],
    }
}

/// well formed certification material
pub fn deposit_data() -> domain::DepositData {
    domain::DepositData {
        pubkey: vec![1; PUBKEY_LEN],
        withdrawal_credentials: vec![2; WITHDRAWAL_CREDENTIALS_LEN],
        signature: vec![3; SIGNATURE_LEN],
        deposit_data_root: vec![4; DEPOSIT_DATA_ROOT_LEN],
    }
}

pub struct TestContext {
    pub contract: PooledStakeContract,
    pub context: VMContext,
}

impl TestContext {
    /// contract with default settings, which makes the operator the only oracle
    pub fn new() -> Self {
        Self::with_settings(|_| ())
    }

    pub fn with_oracles(oracles: &[AccountId]) -> Self {
        Self::with_settings(|settings| {
            settings.oracles = Some(
                oracles
                    .iter()
                    .map(|oracle| to_valid_account_id(oracle))
                    .collect(),
            );
        })
    }

    pub fn with_settings<F>(customize: F) -> Self
    where
        F: FnOnce(&mut ContractSettings),
    {
        let context = new_context(&operator_id());
        testing_env!(context.clone());

        let mut settings = ContractSettings::new(validator_registry_id(), operator_id()).unwrap();
        customize(&mut settings);
        let contract = PooledStakeContract::new(settings);

        Self { contract, context }
    }
}

/// stakes the amount on behalf of the depositor
pub fn deposit_stake(
    contract: &mut PooledStakeContract,
    context: &VMContext,
    depositor: &str,
    amount: u128,
) {
    let mut context = context.clone();
    context.predecessor_account_id = depositor.to_string();
    context.attached_deposit = amount;
    testing_env!(context);
    contract.stake();
}
