use crate::domain;
use crate::interface::{DepositData, YoctoNear};
use near_sdk::{
    json_types::U64,
    serde::{Deserialize, Serialize},
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(crate = "near_sdk::serde")]
pub struct FundingBatch {
    pub index: U64,
    pub deposit_data: DepositData,
}

impl From<domain::FundingBatch> for FundingBatch {
    fn from(batch: domain::FundingBatch) -> Self {
        Self {
            index: batch.index.into(),
            deposit_data: batch.deposit_data.into(),
        }
    }
}

/// unclaimed contribution to a funding batch
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(crate = "near_sdk::serde")]
pub struct Contribution {
    pub batch: U64,
    pub amount: YoctoNear,
}

impl From<domain::Contribution> for Contribution {
    fn from(contribution: domain::Contribution) -> Self {
        Self {
            batch: contribution.batch.into(),
            amount: contribution.amount.into(),
        }
    }
}
