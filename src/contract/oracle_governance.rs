//required in order for near_bindgen macro to work outside of lib.rs
use crate::*;
use crate::{
    domain::{GovernedPool, ProposalArg, ProposalType},
    interface::{Governance, Proposal},
    near::unwrap_or_panic,
};
use near_sdk::{
    json_types::{Base64VecU8, ValidAccountId, U64},
    near_bindgen,
};
use std::convert::TryFrom;

/// Executes proposals against the stake pool.
///
/// The credential is what the pool and the share ledger check the caller against, i.e., oracle
/// governance can only move the fee and rewards while the contract account is the governor.
struct GovernedStakePool<'a> {
    pool: &'a mut StakePool,
    ledger: &'a mut ShareLedger,
    credential: AccountId,
}

impl GovernedPool for GovernedStakePool<'_> {
    fn set_rewards(&mut self, gross_rewards: domain::YoctoNear) -> domain::Result<()> {
        let credential = self.credential.clone();
        self.pool
            .set_rewards(&credential, gross_rewards, self.ledger, &credential)
    }

    fn set_fee(&mut self, fee: u32) -> domain::Result<()> {
        self.pool.set_fee(&self.credential, fee)
    }
}

#[near_bindgen]
impl Governance for PooledStakeContract {
    fn oracle_count(&self) -> U64 {
        self.governance.oracle_count().into()
    }

    fn oracle(&self, index: U64) -> AccountId {
        unwrap_or_panic(self.governance.oracle(index.0))
    }

    fn oracles(&self) -> Vec<AccountId> {
        self.governance.oracles()
    }

    fn is_oracle(&self, account_id: ValidAccountId) -> bool {
        self.governance.is_oracle(account_id.as_ref())
    }

    fn proposal_count(&self) -> U64 {
        self.governance.proposal_count().into()
    }

    fn proposal(&self, id: U64) -> Proposal {
        unwrap_or_panic(self.governance.proposal(id.0)).into()
    }

    fn active_proposal_of(&self, account_id: ValidAccountId) -> Option<U64> {
        self.governance
            .active_proposal_of(account_id.as_ref())
            .map(U64::from)
    }

    fn propose(&mut self, proposal_type: u8, arg: Base64VecU8) -> U64 {
        let author = env::predecessor_account_id();
        // membership is checked before the proposal type is decoded
        unwrap_or_panic(self.governance.check_oracle(&author));
        let proposal_type =
            ProposalType::try_from(proposal_type).unwrap_or_else(|err| panic!("{}", err));
        let arg = unwrap_or_panic(ProposalArg::from_slice(&arg.0));
        let mut pool = GovernedStakePool {
            pool: &mut self.pool,
            ledger: &mut self.ledger,
            credential: env::current_account_id(),
        };
        unwrap_or_panic(
            self.governance
                .propose(&author, proposal_type, arg, &mut pool),
        )
        .into()
    }

    fn vote(&mut self, id: U64) -> bool {
        let mut pool = GovernedStakePool {
            pool: &mut self.pool,
            ledger: &mut self.ledger,
            credential: env::current_account_id(),
        };
        unwrap_or_panic(
            self.governance
                .vote(&env::predecessor_account_id(), id.0, &mut pool),
        )
    }

    fn cancel(&mut self, id: U64) {
        unwrap_or_panic(self.governance.cancel(&env::predecessor_account_id(), id.0));
    }
}
