use crate::domain;
use near_sdk::{
    json_types::U128,
    serde::{Deserialize, Serialize},
};

/// display balance = shares * numerator / denominator
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(crate = "near_sdk::serde")]
pub struct ExchangeRatio {
    pub numerator: U128,
    pub denominator: U128,
}

impl From<domain::ExchangeRatio> for ExchangeRatio {
    fn from(ratio: domain::ExchangeRatio) -> Self {
        Self {
            numerator: ratio.numerator().into(),
            denominator: ratio.denominator().into(),
        }
    }
}
