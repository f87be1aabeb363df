//required in order for near_bindgen macro to work outside of lib.rs
use crate::*;
use crate::{
    errors::asserts::ATTACHED_DEPOSIT_IS_REQUIRED,
    interface::{ExchangeRatio, Metadata, ShareToken, TokenAmount, YoctoShares},
    near::unwrap_or_panic,
};
use near_sdk::{
    json_types::{ValidAccountId, U128},
    near_bindgen,
};

pub const TOKEN_NAME: &str = "OysterPack Pooled STAKE";
pub const TOKEN_SYMBOL: &str = "PSTAKE";
/// same as NEAR
pub const TOKEN_DECIMALS: u8 = 24;

#[near_bindgen]
impl ShareToken for PooledStakeContract {
    fn ft_metadata(&self) -> Metadata {
        Metadata {
            name: TOKEN_NAME.to_string(),
            symbol: TOKEN_SYMBOL.to_string(),
            decimals: TOKEN_DECIMALS,
        }
    }

    fn ft_total_supply(&self) -> TokenAmount {
        self.ledger.total_supply().into()
    }

    fn ft_total_shares(&self) -> YoctoShares {
        self.ledger.total_shares().into()
    }

    fn ft_balance_of(&self, account_id: ValidAccountId) -> TokenAmount {
        self.ledger.balance_of(account_id.as_ref()).into()
    }

    fn ft_shares_of(&self, account_id: ValidAccountId) -> YoctoShares {
        self.ledger.shares_of(account_id.as_ref()).into()
    }

    fn ft_allowance(&self, owner_id: ValidAccountId, spender_id: ValidAccountId) -> TokenAmount {
        self.ledger
            .allowance(owner_id.as_ref(), spender_id.as_ref())
            .into()
    }

    fn exchange_ratio(&self) -> ExchangeRatio {
        self.ledger.ratio().into()
    }

    fn token_owner_id(&self) -> AccountId {
        self.ledger.owner_id().clone()
    }

    #[payable]
    fn ft_transfer(&mut self, receiver_id: ValidAccountId, amount: TokenAmount) {
        assert_yocto_near_attached();
        unwrap_or_panic(self.ledger.transfer(
            &env::predecessor_account_id(),
            receiver_id.as_ref(),
            amount.into(),
        ));
    }

    #[payable]
    fn ft_transfer_from(
        &mut self,
        owner_id: ValidAccountId,
        receiver_id: ValidAccountId,
        amount: TokenAmount,
    ) {
        assert_yocto_near_attached();
        unwrap_or_panic(self.ledger.transfer_from(
            &env::predecessor_account_id(),
            owner_id.as_ref(),
            receiver_id.as_ref(),
            amount.into(),
        ));
    }

    #[payable]
    fn ft_approve(&mut self, spender_id: ValidAccountId, amount: TokenAmount) {
        assert_yocto_near_attached();
        unwrap_or_panic(self.ledger.approve(
            &env::predecessor_account_id(),
            spender_id.as_ref(),
            amount.into(),
        ));
    }

    fn ft_mint(&mut self, account_id: ValidAccountId, amount: TokenAmount) -> YoctoShares {
        unwrap_or_panic(self.ledger.mint(
            &env::predecessor_account_id(),
            account_id.as_ref(),
            amount.into(),
        ))
        .into()
    }

    fn set_exchange_ratio(&mut self, numerator: U128, denominator: U128) {
        unwrap_or_panic(self.ledger.set_ratio(
            &env::predecessor_account_id(),
            numerator.0,
            denominator.0,
        ));
    }

    fn transfer_token_ownership(&mut self, new_owner_id: ValidAccountId) {
        unwrap_or_panic(
            self.ledger
                .transfer_ownership(&env::predecessor_account_id(), new_owner_id.as_ref()),
        );
    }
}

/// the attached yoctoNEAR is kept by the contract
fn assert_yocto_near_attached() {
    assert_eq!(
        env::attached_deposit(),
        1,
        "{}",
        ATTACHED_DEPOSIT_IS_REQUIRED
    )
}
