//! Oracle governance state machine.
//!
//! A proposal is active from creation until it is either executed (quorum reached) or canceled by
//! its author. Each oracle may author at most one active proposal at a time. Quorum is a strict
//! majority of the current oracle membership and is evaluated within the call that casts a vote.

use crate::domain::{
    Error, Proposal, ProposalAction, ProposalArg, ProposalId, ProposalType, Result, YoctoNear,
};
use crate::interface::oracle_governance::events::{
    ProposalCanceled, ProposalCreated, ProposalExecuted, ProposalVoted,
};
use crate::near::{log, storage_keys::*};
use near_sdk::{
    borsh::{self, BorshDeserialize, BorshSerialize},
    collections::{LookupMap, Vector},
    AccountId,
};
use std::convert::TryFrom;

/// The governed setters that executed proposals are applied to.
pub trait GovernedPool {
    /// reports the cumulative gross rewards
    fn set_rewards(&mut self, gross_rewards: YoctoNear) -> Result<()>;

    fn set_fee(&mut self, fee: u32) -> Result<()>;
}

#[derive(BorshSerialize, BorshDeserialize)]
pub struct OracleGovernance {
    oracles: Vector<AccountId>,
    /// oracle -> position in `oracles`
    oracle_index: LookupMap<AccountId, u64>,
    /// active proposals
    proposals: LookupMap<ProposalId, Proposal>,
    /// author -> active proposal
    active_proposals: LookupMap<AccountId, ProposalId>,
    proposal_count: u64,
}

impl OracleGovernance {
    pub fn new(oracles: &[AccountId]) -> Self {
        let mut governance = Self {
            oracles: Vector::new(ORACLES_KEY_PREFIX.to_vec()),
            oracle_index: LookupMap::new(ORACLE_INDEX_KEY_PREFIX.to_vec()),
            proposals: LookupMap::new(PROPOSALS_KEY_PREFIX.to_vec()),
            active_proposals: LookupMap::new(ACTIVE_PROPOSALS_KEY_PREFIX.to_vec()),
            proposal_count: 0,
        };
        oracles
            .iter()
            .for_each(|oracle| governance.add_oracle(oracle));
        governance
    }

    pub fn is_oracle(&self, account_id: &AccountId) -> bool {
        self.oracle_index.contains_key(account_id)
    }

    pub fn check_oracle(&self, account_id: &AccountId) -> Result<()> {
        if self.is_oracle(account_id) {
            Ok(())
        } else {
            Err(Error::NotAnOracle)
        }
    }

    pub fn oracle_count(&self) -> u64 {
        self.oracles.len()
    }

    pub fn oracle(&self, index: u64) -> Result<AccountId> {
        self.oracles.get(index).ok_or(Error::InvalidIndex)
    }

    pub fn oracles(&self) -> Vec<AccountId> {
        self.oracles.to_vec()
    }

    /// number of proposals ever created, which is also the ID of the most recent proposal
    pub fn proposal_count(&self) -> u64 {
        self.proposal_count
    }

    /// only active proposals are retained
    pub fn proposal(&self, id: ProposalId) -> Result<Proposal> {
        self.proposals.get(&id).ok_or(Error::NoSuchProposal)
    }

    pub fn active_proposal_of(&self, author: &AccountId) -> Option<ProposalId> {
        self.active_proposals.get(author)
    }

    /// Creates a proposal with the author's vote counted. If the author's vote alone reaches
    /// quorum, then the proposal is executed immediately.
    ///
    /// The argument is decoded up front, i.e., a malformed argument is rejected at creation time.
    pub fn propose<P: GovernedPool>(
        &mut self,
        caller: &AccountId,
        proposal_type: ProposalType,
        arg: ProposalArg,
        pool: &mut P,
    ) -> Result<ProposalId> {
        self.check_oracle(caller)?;
        if self.active_proposals.contains_key(caller) {
            return Err(Error::AuthorHasActiveProposal);
        }
        let action = ProposalAction::decode(proposal_type, &arg)?;

        let id = self.proposal_count + 1;
        let proposal = Proposal {
            id,
            proposal_type,
            author: caller.clone(),
            arg,
            voters: vec![caller.clone()],
        };
        let executed = proposal.has_quorum(self.oracle_count());
        if executed {
            self.execute(action, pool)?;
        } else {
            self.proposals.insert(&id, &proposal);
            self.active_proposals.insert(caller, &id);
        }
        self.proposal_count = id;

        log(ProposalCreated {
            id,
            author: caller,
            proposal_type: proposal_type.into(),
            arg: &arg.0,
        });
        log(ProposalVoted { id, voter: caller });
        if executed {
            log(ProposalExecuted {
                id,
                proposal_type: proposal_type.into(),
                arg: &arg.0,
            });
        }
        Ok(id)
    }

    /// Records the caller's vote and executes the proposal if quorum is reached.
    ///
    /// Voting again is a no-op. Returns true if the proposal was executed.
    pub fn vote<P: GovernedPool>(
        &mut self,
        caller: &AccountId,
        id: ProposalId,
        pool: &mut P,
    ) -> Result<bool> {
        self.check_oracle(caller)?;
        let mut proposal = self.proposal(id)?;
        if !proposal.add_vote(caller) {
            return Ok(false);
        }

        let executed = proposal.has_quorum(self.oracle_count());
        if executed {
            let action = ProposalAction::decode(proposal.proposal_type, &proposal.arg)?;
            self.execute(action, pool)?;
            self.remove_proposal(&proposal);
        } else {
            self.proposals.insert(&id, &proposal);
        }

        log(ProposalVoted { id, voter: caller });
        if executed {
            log(ProposalExecuted {
                id,
                proposal_type: proposal.proposal_type.into(),
                arg: &proposal.arg.0,
            });
        }
        Ok(executed)
    }

    /// Withdraws the caller's active proposal.
    pub fn cancel(&mut self, caller: &AccountId, id: ProposalId) -> Result<()> {
        let proposal = self.proposal(id)?;
        self.check_oracle(caller)?;
        if &proposal.author != caller {
            return Err(Error::NotAuthor);
        }
        self.remove_proposal(&proposal);

        log(ProposalCanceled { id });
        Ok(())
    }

    fn execute<P: GovernedPool>(&mut self, action: ProposalAction, pool: &mut P) -> Result<()> {
        match action {
            ProposalAction::SetYield(gross_rewards) => pool.set_rewards(gross_rewards.into()),
            // values that do not fit are above 100% and are ignored by the pool
            ProposalAction::SetFee(fee) => pool.set_fee(u32::try_from(fee).unwrap_or(u32::MAX)),
            ProposalAction::AddOracle(account_id) => {
                self.add_oracle(&account_id);
                Ok(())
            }
            ProposalAction::RemoveOracle(account_id) => {
                self.remove_oracle(&account_id);
                Ok(())
            }
        }
    }

    fn remove_proposal(&mut self, proposal: &Proposal) {
        self.proposals.remove(&proposal.id);
        self.active_proposals.remove(&proposal.author);
    }

    /// no-op if already a member
    fn add_oracle(&mut self, account_id: &AccountId) {
        if self.is_oracle(account_id) {
            return;
        }
        self.oracle_index.insert(account_id, &self.oracles.len());
        self.oracles.push(account_id);
    }

    /// Swaps the last member into the removed member's position, i.e., member order is not
    /// preserved. No-op if not a member.
    fn remove_oracle(&mut self, account_id: &AccountId) {
        let index = match self.oracle_index.remove(account_id) {
            Some(index) => index,
            None => return,
        };
        self.oracles.swap_remove(index);
        if let Some(moved) = self.oracles.get(index) {
            self.oracle_index.insert(&moved, &index);
        }
    }
}
