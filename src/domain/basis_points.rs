use crate::core::mul_div_floor;
use crate::domain::YoctoNear;
use near_sdk::borsh::{self, BorshDeserialize, BorshSerialize};
use std::fmt::{self, Display, Formatter};

/// 1 basis point = 0.01%
#[derive(
    BorshSerialize, BorshDeserialize, Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Default,
)]
pub struct BasisPoints(u16);

impl BasisPoints {
    /// 100%
    pub const MAX: u16 = 10_000;

    /// returns None if the value exceeds 100%
    pub fn new(value: u32) -> Option<Self> {
        if value > Self::MAX as u32 {
            None
        } else {
            Some(Self(value as u16))
        }
    }

    pub fn value(&self) -> u16 {
        self.0
    }

    /// `amount * bps / 10000` rounded down
    pub fn of(&self, amount: YoctoNear) -> YoctoNear {
        // cannot overflow because the result is never greater than `amount`
        mul_div_floor(amount.value(), self.0 as u128, Self::MAX as u128)
            .unwrap_or_default()
            .into()
    }
}

impl Display for BasisPoints {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
