use near_sdk::borsh::{self, BorshDeserialize, BorshSerialize};

/// 1 TGas
pub const TGAS: Gas = Gas(1_000_000_000_000);

#[derive(
    BorshSerialize, BorshDeserialize, Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Default,
)]
pub struct Gas(pub u64);

impl From<u64> for Gas {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Gas> for u64 {
    fn from(value: Gas) -> Self {
        value.0
    }
}

impl Gas {
    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn tgas(value: u64) -> Self {
        Self(TGAS.0 * value)
    }
}
