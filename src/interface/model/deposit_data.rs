use crate::domain;
use near_sdk::{
    json_types::Base64VecU8,
    serde::{Deserialize, Serialize},
};

/// validator certification material - binary fields are base64 encoded
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(crate = "near_sdk::serde")]
pub struct DepositData {
    /// 48 bytes
    pub pubkey: Base64VecU8,
    /// 32 bytes
    pub withdrawal_credentials: Base64VecU8,
    /// 96 bytes
    pub signature: Base64VecU8,
    /// 32 bytes
    pub deposit_data_root: Base64VecU8,
}

impl From<domain::DepositData> for DepositData {
    fn from(data: domain::DepositData) -> Self {
        Self {
            pubkey: data.pubkey.into(),
            withdrawal_credentials: data.withdrawal_credentials.into(),
            signature: data.signature.into(),
            deposit_data_root: data.deposit_data_root.into(),
        }
    }
}

impl From<DepositData> for domain::DepositData {
    fn from(data: DepositData) -> Self {
        Self {
            pubkey: data.pubkey.into(),
            withdrawal_credentials: data.withdrawal_credentials.into(),
            signature: data.signature.into(),
            deposit_data_root: data.deposit_data_root.into(),
        }
    }
}
