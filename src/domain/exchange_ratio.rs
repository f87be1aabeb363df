use crate::core::mul_div_floor;
use crate::domain::{Error, Result, TokenAmount, YoctoShares};
use near_sdk::borsh::{self, BorshDeserialize, BorshSerialize};

/// Absolute share price: display balance = floor(shares * numerator / denominator)
///
/// The ratio is replaced outright whenever the pool re-prices, it never compounds.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExchangeRatio {
    numerator: u128,
    denominator: u128,
}

impl Default for ExchangeRatio {
    fn default() -> Self {
        Self {
            numerator: 1,
            denominator: 1,
        }
    }
}

impl ExchangeRatio {
    pub fn new(numerator: u128, denominator: u128) -> Result<Self> {
        if denominator == 0 {
            return Err(Error::ZeroRatioDenominator);
        }
        if numerator == 0 {
            return Err(Error::ZeroRatioNumerator);
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    pub fn numerator(&self) -> u128 {
        self.numerator
    }

    pub fn denominator(&self) -> u128 {
        self.denominator
    }

    /// rounded down
    pub fn shares_to_amount(&self, shares: YoctoShares) -> Result<TokenAmount> {
        mul_div_floor(shares.value(), self.numerator, self.denominator)
            .map(TokenAmount)
            .ok_or(Error::ArithmeticOverflow)
    }

    /// rounded down, i.e., rounding always favors the ledger
    pub fn amount_to_shares(&self, amount: TokenAmount) -> Result<YoctoShares> {
        mul_div_floor(amount.value(), self.denominator, self.numerator)
            .map(YoctoShares)
            .ok_or(Error::ArithmeticOverflow)
    }
}
