use near_sdk::borsh::{self, BorshDeserialize, BorshSerialize};
use near_sdk::collections::LookupSet;
use near_sdk::json_types::{Base64VecU8, U128, U64};
use near_sdk::{env, near_bindgen, PanicOnDefault};

// uncomment to build wasm file
// #[global_allocator]
// static ALLOC: near_sdk::wee_alloc::WeeAlloc = near_sdk::wee_alloc::WeeAlloc::INIT;

pub const PUBKEY_LEN: usize = 48;
pub const WITHDRAWAL_CREDENTIALS_LEN: usize = 32;
pub const SIGNATURE_LEN: usize = 96;
pub const DEPOSIT_DATA_ROOT_LEN: usize = 32;

/// Accepts a deposit iff exactly one funding unit is attached and the deposit data root matches
/// `sha256(pubkey | withdrawal_credentials | amount as u128 LE | signature)`
#[near_bindgen]
#[derive(BorshDeserialize, BorshSerialize, PanicOnDefault)]
pub struct ValidatorRegistry {
    funding_unit: u128,
    validators: LookupSet<Vec<u8>>,
    validator_count: u64,
}

#[near_bindgen]
impl ValidatorRegistry {
    #[init]
    pub fn new(funding_unit: U128) -> Self {
        assert!(funding_unit.0 > 0, "funding unit must not be zero");
        Self {
            funding_unit: funding_unit.0,
            validators: LookupSet::new(vec![1]),
            validator_count: 0,
        }
    }

    pub fn funding_unit(&self) -> U128 {
        self.funding_unit.into()
    }

    pub fn validator_count(&self) -> U64 {
        self.validator_count.into()
    }

    pub fn is_registered(&self, pubkey: Base64VecU8) -> bool {
        self.validators.contains(&pubkey.0)
    }

    #[payable]
    pub fn register(
        &mut self,
        pubkey: Base64VecU8,
        withdrawal_credentials: Base64VecU8,
        signature: Base64VecU8,
        deposit_data_root: Base64VecU8,
    ) {
        let amount = env::attached_deposit();
        assert_eq!(
            amount, self.funding_unit,
            "attached deposit must match the funding unit"
        );
        assert_eq!(pubkey.0.len(), PUBKEY_LEN, "invalid pubkey length");
        assert_eq!(
            withdrawal_credentials.0.len(),
            WITHDRAWAL_CREDENTIALS_LEN,
            "invalid withdrawal credentials length"
        );
        assert_eq!(signature.0.len(), SIGNATURE_LEN, "invalid signature length");
        assert_eq!(
            deposit_data_root.0.len(),
            DEPOSIT_DATA_ROOT_LEN,
            "invalid deposit data root length"
        );
        assert_eq!(
            deposit_data_root(&pubkey.0, &withdrawal_credentials.0, amount, &signature.0),
            deposit_data_root.0,
            "deposit data root does not match"
        );
        assert!(
            self.validators.insert(&pubkey.0),
            "validator is already registered"
        );
        self.validator_count += 1;
    }
}

pub fn deposit_data_root(
    pubkey: &[u8],
    withdrawal_credentials: &[u8],
    amount: u128,
    signature: &[u8],
) -> Vec<u8> {
    let mut data = Vec::with_capacity(
        pubkey.len() + withdrawal_credentials.len() + 16 + signature.len(),
    );
    data.extend_from_slice(pubkey);
    data.extend_from_slice(withdrawal_credentials);
    data.extend_from_slice(&amount.to_le_bytes());
    data.extend_from_slice(signature);
    env::sha256(&data)
}
