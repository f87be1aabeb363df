use crate::domain::{Error, Result, YoctoNear};
use near_sdk::borsh::{self, BorshDeserialize, BorshSerialize};

pub const PUBKEY_LEN: usize = 48;
pub const WITHDRAWAL_CREDENTIALS_LEN: usize = 32;
pub const SIGNATURE_LEN: usize = 96;
pub const DEPOSIT_DATA_ROOT_LEN: usize = 32;

/// sequential funding batch index, starting from 0
pub type BatchIndex = u64;

/// Validator certification material that is forwarded to the validator registry
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct DepositData {
    pub pubkey: Vec<u8>,
    pub withdrawal_credentials: Vec<u8>,
    pub signature: Vec<u8>,
    pub deposit_data_root: Vec<u8>,
}

impl DepositData {
    /// checks the shape of the certification material - its validity is decided by the registry
    pub fn validate(&self) -> Result<()> {
        if self.pubkey.len() != PUBKEY_LEN {
            return Err(Error::InvalidDepositData("pubkey"));
        }
        if self.withdrawal_credentials.len() != WITHDRAWAL_CREDENTIALS_LEN {
            return Err(Error::InvalidDepositData("withdrawal_credentials"));
        }
        if self.signature.len() != SIGNATURE_LEN {
            return Err(Error::InvalidDepositData("signature"));
        }
        if self.deposit_data_root.len() != DEPOSIT_DATA_ROOT_LEN {
            return Err(Error::InvalidDepositData("deposit_data_root"));
        }
        Ok(())
    }
}

/// A funded validator. Immutable once created.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct FundingBatch {
    pub index: BatchIndex,
    pub deposit_data: DepositData,
}

/// How much of a depositor's stake funded a specific batch
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contribution {
    pub batch: BatchIndex,
    pub amount: YoctoNear,
}

/// Appends the contribution, merging it into the last entry when it is for the same batch.
///
/// A depositor may own more than one record that is consumed into the same batch.
pub fn add_contribution(contributions: &mut Vec<Contribution>, contribution: Contribution) {
    match contributions.last_mut() {
        Some(last) if last.batch == contribution.batch => last.amount += contribution.amount,
        _ => contributions.push(contribution),
    }
}
