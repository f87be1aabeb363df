pub mod contract_state;
mod config;
mod deposit_data;
mod exchange_ratio;
mod funding_batch;
mod metadata;
mod proposal;

pub use config::{Config, GasConfig};
pub use deposit_data::DepositData;
pub use exchange_ratio::ExchangeRatio;
pub use funding_batch::{Contribution, FundingBatch};
pub use metadata::Metadata;
pub use proposal::Proposal;

use crate::domain;
use near_sdk::{
    json_types::{U128, U64},
    serde::{Deserialize, Serialize},
};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(crate = "near_sdk::serde")]
pub struct YoctoNear(pub U128);

impl From<domain::YoctoNear> for YoctoNear {
    fn from(value: domain::YoctoNear) -> Self {
        Self(value.0.into())
    }
}

impl From<u128> for YoctoNear {
    fn from(value: u128) -> Self {
        Self(value.into())
    }
}

impl From<YoctoNear> for domain::YoctoNear {
    fn from(value: YoctoNear) -> Self {
        Self(value.value())
    }
}

impl YoctoNear {
    pub fn value(&self) -> u128 {
        self.0 .0
    }
}

/// display balance
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(crate = "near_sdk::serde")]
pub struct TokenAmount(pub U128);

impl From<domain::TokenAmount> for TokenAmount {
    fn from(value: domain::TokenAmount) -> Self {
        Self(value.0.into())
    }
}

impl From<u128> for TokenAmount {
    fn from(value: u128) -> Self {
        Self(value.into())
    }
}

impl From<TokenAmount> for domain::TokenAmount {
    fn from(value: TokenAmount) -> Self {
        Self(value.value())
    }
}

impl TokenAmount {
    pub fn value(&self) -> u128 {
        self.0 .0
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(crate = "near_sdk::serde")]
pub struct YoctoShares(pub U128);

impl From<domain::YoctoShares> for YoctoShares {
    fn from(value: domain::YoctoShares) -> Self {
        Self(value.0.into())
    }
}

impl YoctoShares {
    pub fn value(&self) -> u128 {
        self.0 .0
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(crate = "near_sdk::serde")]
pub struct BlockHeight(pub U64);

impl From<domain::BlockHeight> for BlockHeight {
    fn from(value: domain::BlockHeight) -> Self {
        Self(value.0.into())
    }
}

impl BlockHeight {
    pub fn value(&self) -> u64 {
        self.0 .0
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(crate = "near_sdk::serde")]
pub struct Gas(pub U64);

impl From<domain::Gas> for Gas {
    fn from(value: domain::Gas) -> Self {
        Self(value.0.into())
    }
}

impl From<u64> for Gas {
    fn from(value: u64) -> Self {
        Self(value.into())
    }
}

impl Gas {
    pub fn value(&self) -> u64 {
        self.0 .0
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(crate = "near_sdk::serde")]
pub struct BatchLock {
    pub batch: U64,
    pub block_height: BlockHeight,
}

impl From<domain::BatchLock> for BatchLock {
    fn from(lock: domain::BatchLock) -> Self {
        Self {
            batch: lock.batch.into(),
            block_height: lock.block_height.into(),
        }
    }
}
