use crate::interface::{ExchangeRatio, Metadata, TokenAmount, YoctoShares};
use near_sdk::{
    json_types::{ValidAccountId, U128},
    AccountId,
};

/// Rebasing share token.
///
/// Balances are held in shares. All amounts exposed by this interface are display amounts, i.e.,
/// shares scaled by the current [ExchangeRatio], unless stated otherwise. Conversions round down.
pub trait ShareToken {
    ////////////////////////////
    //     VIEW METHODS    ///
    /// //////////////////////

    fn ft_metadata(&self) -> Metadata;

    /// display value of all shares
    fn ft_total_supply(&self) -> TokenAmount;

    fn ft_total_shares(&self) -> YoctoShares;

    fn ft_balance_of(&self, account_id: ValidAccountId) -> TokenAmount;

    fn ft_shares_of(&self, account_id: ValidAccountId) -> YoctoShares;

    /// The allowance is held in shares, which means its display value tracks the exchange ratio.
    fn ft_allowance(&self, owner_id: ValidAccountId, spender_id: ValidAccountId) -> TokenAmount;

    fn exchange_ratio(&self) -> ExchangeRatio;

    /// the account that is allowed to mint and to set the exchange ratio
    /// - defaults to the contract account
    fn token_owner_id(&self) -> AccountId;

    //////////////////////////////
    //     CHANGE METHODS    ///
    /// ////////////////////////

    /// Transfers the display amount from the predecessor account to the receiver.
    ///
    /// ## Panics
    /// - if exactly 1 yoctoNEAR is not attached
    /// - if the share equivalent of the amount exceeds the sender's shares
    ///
    /// #[payable]
    fn ft_transfer(&mut self, receiver_id: ValidAccountId, amount: TokenAmount);

    /// Transfers the display amount from the owner account to the receiver using the predecessor
    /// account's allowance.
    ///
    /// ## Panics
    /// - if exactly 1 yoctoNEAR is not attached
    /// - if the share equivalent of the amount exceeds the allowance
    /// - if the share equivalent of the amount exceeds the owner's shares
    ///
    /// #[payable]
    fn ft_transfer_from(
        &mut self,
        owner_id: ValidAccountId,
        receiver_id: ValidAccountId,
        amount: TokenAmount,
    );

    /// Sets the spender's allowance, replacing any prior allowance.
    ///
    /// ## Panics
    /// - if exactly 1 yoctoNEAR is not attached
    /// - if the share equivalent of the amount exceeds the owner's shares
    ///
    /// #[payable]
    fn ft_approve(&mut self, spender_id: ValidAccountId, amount: TokenAmount);

    /// Mints the display amount, converted to shares at the current ratio.
    ///
    /// Returns the number of shares minted.
    ///
    /// ## Panics
    /// - if the predecessor is not the token owner
    fn ft_mint(&mut self, account_id: ValidAccountId, amount: TokenAmount) -> YoctoShares;

    /// Replaces the exchange ratio, which re-prices every holder.
    ///
    /// ## Panics
    /// - if the predecessor is not the token owner
    /// - if either term is zero
    fn set_exchange_ratio(&mut self, numerator: U128, denominator: U128);

    /// ## Panics
    /// - if the predecessor is not the token owner
    fn transfer_token_ownership(&mut self, new_owner_id: ValidAccountId);
}

pub mod events {
    #[derive(Debug)]
    pub struct Transfer<'a> {
        pub from: &'a str,
        pub to: &'a str,
        /// display amount
        pub amount: u128,
        pub shares: u128,
    }

    #[derive(Debug)]
    pub struct Approval<'a> {
        pub owner: &'a str,
        pub spender: &'a str,
        /// display amount
        pub amount: u128,
        pub shares: u128,
    }

    #[derive(Debug)]
    pub struct Minted<'a> {
        pub holder_id: &'a str,
        /// display amount
        pub amount: u128,
        pub shares: u128,
    }

    #[derive(Debug)]
    pub struct ExchangeRatioUpdated {
        pub old_numerator: u128,
        pub old_denominator: u128,
        pub new_numerator: u128,
        pub new_denominator: u128,
    }

    #[derive(Debug)]
    pub struct OwnershipTransferred<'a> {
        pub from: &'a str,
        pub to: &'a str,
    }
}
