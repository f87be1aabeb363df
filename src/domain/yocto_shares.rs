use near_sdk::borsh::{self, BorshDeserialize, BorshSerialize};
use std::{
    fmt::{self, Display, Formatter},
    ops::{AddAssign, SubAssign},
};

/// ratio invariant unit that backs share token balances
#[derive(
    BorshSerialize, BorshDeserialize, Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Default,
)]
pub struct YoctoShares(pub u128);

impl From<u128> for YoctoShares {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl YoctoShares {
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl From<YoctoShares> for u128 {
    fn from(value: YoctoShares) -> Self {
        value.0
    }
}

impl AddAssign for YoctoShares {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0
    }
}

impl SubAssign for YoctoShares {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0
    }
}

impl Display for YoctoShares {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
