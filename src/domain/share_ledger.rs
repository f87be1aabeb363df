//! Rebasing share token ledger.
//!
//! Balances are stored as ratio invariant shares. The externally visible display balance is derived
//! from the shares using the current [ExchangeRatio]. Re-pricing every holder is a single
//! [set_ratio](ShareLedger::set_ratio) call - balances are never rewritten.

use crate::domain::{Error, ExchangeRatio, Result, TokenAmount, YoctoShares};
use crate::interface::share_token::events::{
    Approval, ExchangeRatioUpdated, Minted, OwnershipTransferred, Transfer,
};
use crate::near::{log, storage_keys::*};
use near_sdk::{
    borsh::{self, BorshDeserialize, BorshSerialize},
    collections::LookupMap,
    AccountId,
};

#[derive(BorshSerialize, BorshDeserialize)]
pub struct ShareLedger {
    /// the only account allowed to mint and to set the exchange ratio
    owner_id: AccountId,
    shares: LookupMap<AccountId, YoctoShares>,
    /// (owner, spender) -> share denominated allowance
    allowances: LookupMap<(AccountId, AccountId), YoctoShares>,
    total_shares: YoctoShares,
    ratio: ExchangeRatio,
}

impl ShareLedger {
    pub fn new(owner_id: AccountId) -> Self {
        Self {
            owner_id,
            shares: LookupMap::new(SHARES_KEY_PREFIX.to_vec()),
            allowances: LookupMap::new(ALLOWANCES_KEY_PREFIX.to_vec()),
            total_shares: YoctoShares::default(),
            ratio: ExchangeRatio::default(),
        }
    }

    pub fn owner_id(&self) -> &AccountId {
        &self.owner_id
    }

    pub fn ratio(&self) -> ExchangeRatio {
        self.ratio
    }

    pub fn total_shares(&self) -> YoctoShares {
        self.total_shares
    }

    /// display value of all shares - saturates instead of failing
    pub fn total_supply(&self) -> TokenAmount {
        self.ratio
            .shares_to_amount(self.total_shares)
            .unwrap_or(TokenAmount(u128::MAX))
    }

    pub fn shares_of(&self, account_id: &AccountId) -> YoctoShares {
        self.shares.get(account_id).unwrap_or_default()
    }

    /// display balance - saturates instead of failing
    pub fn balance_of(&self, account_id: &AccountId) -> TokenAmount {
        self.ratio
            .shares_to_amount(self.shares_of(account_id))
            .unwrap_or(TokenAmount(u128::MAX))
    }

    /// the allowance is re-scaled through the current ratio, i.e., its display value tracks the
    /// economic value of the approved shares
    pub fn allowance(&self, owner_id: &AccountId, spender_id: &AccountId) -> TokenAmount {
        self.ratio
            .shares_to_amount(self.allowance_shares(owner_id, spender_id))
            .unwrap_or(TokenAmount(u128::MAX))
    }

    /// Mints the display amount, converted to shares at the current ratio, to the holder.
    ///
    /// Returns the number of shares minted.
    pub fn mint(
        &mut self,
        caller: &AccountId,
        holder_id: &AccountId,
        amount: TokenAmount,
    ) -> Result<YoctoShares> {
        self.assert_owner(caller)?;
        let shares = self.ratio.amount_to_shares(amount)?;
        let total_shares = self
            .total_shares
            .value()
            .checked_add(shares.value())
            .ok_or(Error::ArithmeticOverflow)?;

        let mut balance = self.shares_of(holder_id);
        balance += shares;
        self.shares.insert(holder_id, &balance);
        self.total_shares = total_shares.into();

        log(Minted {
            holder_id,
            amount: amount.value(),
            shares: shares.value(),
        });
        Ok(shares)
    }

    /// Replaces the exchange ratio, which re-prices every holder at once.
    pub fn set_ratio(
        &mut self,
        caller: &AccountId,
        numerator: u128,
        denominator: u128,
    ) -> Result<()> {
        self.assert_owner(caller)?;
        let ratio = ExchangeRatio::new(numerator, denominator)?;
        let previous = self.ratio;
        self.ratio = ratio;

        log(ExchangeRatioUpdated {
            old_numerator: previous.numerator(),
            old_denominator: previous.denominator(),
            new_numerator: ratio.numerator(),
            new_denominator: ratio.denominator(),
        });
        Ok(())
    }

    /// Returns the number of shares that were moved.
    pub fn transfer(
        &mut self,
        sender_id: &AccountId,
        receiver_id: &AccountId,
        amount: TokenAmount,
    ) -> Result<YoctoShares> {
        let shares = self.ratio.amount_to_shares(amount)?;
        if shares > self.shares_of(sender_id) {
            return Err(Error::InsufficientBalance);
        }
        self.move_shares(sender_id, receiver_id, shares);

        log(Transfer {
            from: sender_id,
            to: receiver_id,
            amount: amount.value(),
            shares: shares.value(),
        });
        Ok(shares)
    }

    /// Moves the display amount from the owner to the receiver using the spender's allowance.
    ///
    /// Returns the number of shares that were moved.
    pub fn transfer_from(
        &mut self,
        spender_id: &AccountId,
        owner_id: &AccountId,
        receiver_id: &AccountId,
        amount: TokenAmount,
    ) -> Result<YoctoShares> {
        let shares = self.ratio.amount_to_shares(amount)?;
        let allowance = self.allowance_shares(owner_id, spender_id);
        if shares > allowance {
            return Err(Error::InsufficientAllowance);
        }
        if shares > self.shares_of(owner_id) {
            return Err(Error::InsufficientBalance);
        }

        self.set_allowance_shares(
            owner_id,
            spender_id,
            (allowance.value() - shares.value()).into(),
        );
        self.move_shares(owner_id, receiver_id, shares);

        log(Transfer {
            from: owner_id,
            to: receiver_id,
            amount: amount.value(),
            shares: shares.value(),
        });
        Ok(shares)
    }

    /// The allowance is stored in shares, converted at the ratio in effect at approval time.
    ///
    /// Fails with [InsufficientBalance](Error::InsufficientBalance) if the share equivalent exceeds
    /// the owner's shares.
    pub fn approve(
        &mut self,
        owner_id: &AccountId,
        spender_id: &AccountId,
        amount: TokenAmount,
    ) -> Result<()> {
        let shares = self.ratio.amount_to_shares(amount)?;
        if shares.value() > self.shares_of(owner_id).value() {
            return Err(Error::InsufficientBalance);
        }
        self.set_allowance_shares(owner_id, spender_id, shares);

        log(Approval {
            owner: owner_id,
            spender: spender_id,
            amount: amount.value(),
            shares: shares.value(),
        });
        Ok(())
    }

    pub fn transfer_ownership(
        &mut self,
        caller: &AccountId,
        new_owner_id: &AccountId,
    ) -> Result<()> {
        self.assert_owner(caller)?;
        let previous_owner = std::mem::replace(&mut self.owner_id, new_owner_id.clone());

        log(OwnershipTransferred {
            from: &previous_owner,
            to: &self.owner_id,
        });
        Ok(())
    }

    fn assert_owner(&self, caller: &AccountId) -> Result<()> {
        if caller == &self.owner_id {
            Ok(())
        } else {
            Err(Error::NotTokenOwner)
        }
    }

    fn allowance_shares(&self, owner_id: &AccountId, spender_id: &AccountId) -> YoctoShares {
        self.allowances
            .get(&(owner_id.clone(), spender_id.clone()))
            .unwrap_or_default()
    }

    fn set_allowance_shares(
        &mut self,
        owner_id: &AccountId,
        spender_id: &AccountId,
        shares: YoctoShares,
    ) {
        let key = (owner_id.clone(), spender_id.clone());
        if shares.value() == 0 {
            self.allowances.remove(&key);
        } else {
            self.allowances.insert(&key, &shares);
        }
    }

    /// the caller must have checked that the sender owns enough shares
    fn move_shares(&mut self, sender_id: &AccountId, receiver_id: &AccountId, shares: YoctoShares) {
        let mut sender_balance = self.shares_of(sender_id);
        sender_balance -= shares;
        if sender_balance.value() == 0 {
            self.shares.remove(sender_id);
        } else {
            self.shares.insert(sender_id, &sender_balance);
        }

        let mut receiver_balance = self.shares_of(receiver_id);
        receiver_balance += shares;
        if receiver_balance.value() > 0 {
            self.shares.insert(receiver_id, &receiver_balance);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::near;
    use crate::test_utils::*;
    use near_sdk::{test_utils::get_logs, testing_env, MockedBlockchain};

    const OWNER: &str = "pool.oysterpack.near";

    fn ledger() -> ShareLedger {
        testing_env!(new_context(OWNER));
        ShareLedger::new(OWNER.to_string())
    }

    fn owner() -> AccountId {
        OWNER.to_string()
    }

    #[test]
    fn mint_then_set_ratio_reprices_every_holder() {
        let mut ledger = ledger();
        ledger
            .mint(&owner(), &alice(), TokenAmount(100))
            .unwrap();
        ledger.mint(&owner(), &bob(), TokenAmount(40)).unwrap();
        assert_eq!(ledger.balance_of(&alice()), TokenAmount(100));

        ledger.set_ratio(&owner(), 18, 12).unwrap();
        assert_eq!(ledger.balance_of(&alice()), TokenAmount(150));
        assert_eq!(ledger.balance_of(&bob()), TokenAmount(60));
        assert_eq!(ledger.total_shares(), YoctoShares(140));
        assert_eq!(ledger.total_supply(), TokenAmount(210));
    }

    #[test]
    fn mint_and_set_ratio_are_owner_only() {
        let mut ledger = ledger();
        assert_eq!(
            ledger.mint(&alice(), &alice(), TokenAmount(100)),
            Err(Error::NotTokenOwner)
        );
        assert_eq!(ledger.set_ratio(&alice(), 1, 2), Err(Error::NotTokenOwner));
        assert_eq!(ledger.total_shares(), YoctoShares(0));
        assert_eq!(ledger.ratio(), ExchangeRatio::default());
    }

    #[test]
    fn set_ratio_with_zero_denominator() {
        let mut ledger = ledger();
        assert_eq!(
            ledger.set_ratio(&owner(), 1, 0),
            Err(Error::ZeroRatioDenominator)
        );
        assert_eq!(ledger.ratio(), ExchangeRatio::default());
    }

    #[test]
    fn transfer_after_ratio_change_truncates_in_favor_of_the_ledger() {
        let mut ledger = ledger();
        ledger.mint(&owner(), &alice(), TokenAmount(100)).unwrap();
        ledger.transfer(&alice(), &bob(), TokenAmount(20)).unwrap();
        ledger.set_ratio(&owner(), 18, 12).unwrap();

        let shares = ledger.transfer(&alice(), &bob(), TokenAmount(20)).unwrap();
        assert_eq!(shares, YoctoShares(13));
        assert_eq!(ledger.balance_of(&alice()), TokenAmount(100));
        // 1 unit lost to truncation
        assert_eq!(ledger.balance_of(&bob()), TokenAmount(49));
        assert_eq!(ledger.total_shares(), YoctoShares(100));
    }

    #[test]
    fn transfer_with_insufficient_balance() {
        let mut ledger = ledger();
        ledger.mint(&owner(), &alice(), TokenAmount(100)).unwrap();
        assert_eq!(
            ledger.transfer(&alice(), &bob(), TokenAmount(101)),
            Err(Error::InsufficientBalance)
        );
        assert_eq!(ledger.balance_of(&alice()), TokenAmount(100));
        assert_eq!(ledger.balance_of(&bob()), TokenAmount(0));
    }

    #[test]
    fn transfer_to_self_keeps_balance() {
        let mut ledger = ledger();
        ledger.mint(&owner(), &alice(), TokenAmount(100)).unwrap();
        ledger.transfer(&alice(), &alice(), TokenAmount(100)).unwrap();
        assert_eq!(ledger.balance_of(&alice()), TokenAmount(100));
    }

    #[test]
    fn allowance_tracks_the_current_ratio() {
        let mut ledger = ledger();
        ledger.mint(&owner(), &alice(), TokenAmount(100)).unwrap();
        ledger.set_ratio(&owner(), 18, 12).unwrap();
        ledger.approve(&alice(), &bob(), TokenAmount(30)).unwrap();
        ledger.set_ratio(&owner(), 22, 11).unwrap();

        assert_eq!(ledger.allowance(&alice(), &bob()), TokenAmount(40));
        ledger
            .transfer_from(&bob(), &alice(), &charlie(), TokenAmount(40))
            .unwrap();
        assert_eq!(ledger.balance_of(&alice()), TokenAmount(160));
        assert_eq!(ledger.allowance(&alice(), &bob()), TokenAmount(0));

        ledger.set_ratio(&owner(), 555_555, 555_555).unwrap();
        assert_eq!(ledger.balance_of(&charlie()), TokenAmount(20));
    }

    #[test]
    fn transfer_from_with_insufficient_allowance() {
        let mut ledger = ledger();
        ledger.mint(&owner(), &alice(), TokenAmount(100)).unwrap();
        ledger.approve(&alice(), &bob(), TokenAmount(10)).unwrap();
        assert_eq!(
            ledger.transfer_from(&bob(), &alice(), &charlie(), TokenAmount(11)),
            Err(Error::InsufficientAllowance)
        );
        assert_eq!(ledger.allowance(&alice(), &bob()), TokenAmount(10));
        assert_eq!(ledger.balance_of(&charlie()), TokenAmount(0));
    }

    #[test]
    fn approve_more_than_balance() {
        let mut ledger = ledger();
        ledger.mint(&owner(), &alice(), TokenAmount(100)).unwrap();
        assert_eq!(
            ledger.approve(&alice(), &bob(), TokenAmount(101)),
            Err(Error::InsufficientBalance)
        );
        assert_eq!(ledger.allowance(&alice(), &bob()), TokenAmount(0));

        // the check is made at the current ratio
        ledger.set_ratio(&owner(), 2, 1).unwrap();
        ledger.approve(&alice(), &bob(), TokenAmount(200)).unwrap();
        assert_eq!(ledger.allowance(&alice(), &bob()), TokenAmount(200));
    }

    #[test]
    fn transfer_from_with_insufficient_balance() {
        let mut ledger = ledger();
        ledger.mint(&owner(), &alice(), TokenAmount(50)).unwrap();
        ledger.approve(&alice(), &bob(), TokenAmount(50)).unwrap();
        // the balance drops below the allowance after approval
        ledger.transfer(&alice(), &charlie(), TokenAmount(40)).unwrap();
        assert_eq!(
            ledger.transfer_from(&bob(), &alice(), &charlie(), TokenAmount(11)),
            Err(Error::InsufficientBalance)
        );
        assert_eq!(ledger.allowance(&alice(), &bob()), TokenAmount(50));
    }

    #[test]
    fn transfer_ownership() {
        let mut ledger = ledger();
        ledger
            .mint(&owner(), &alice(), TokenAmount(100_000 * near::YOCTO))
            .unwrap();
        ledger.transfer_ownership(&owner(), &bob()).unwrap();
        assert_eq!(ledger.owner_id(), &bob());
        assert_eq!(ledger.set_ratio(&owner(), 500, 50), Err(Error::NotTokenOwner));

        ledger.set_ratio(&bob(), 500, 50).unwrap();
        assert_eq!(
            ledger.balance_of(&alice()),
            TokenAmount(1_000_000 * near::YOCTO)
        );
    }

    #[test]
    fn mint_logs_event() {
        let mut ledger = ledger();
        ledger.mint(&owner(), &alice(), TokenAmount(100)).unwrap();
        let logs = get_logs();
        assert_eq!(logs.len(), 1);
        assert!(logs[0].starts_with("Minted"));
    }
}
