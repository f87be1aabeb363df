use crate::interface::Proposal;
use near_sdk::{
    json_types::{Base64VecU8, ValidAccountId, U64},
    AccountId,
};

/// Oracle governance over the pool's rewards and fee, and over its own membership.
pub trait Governance {
    ////////////////////////////
    //     VIEW METHODS    ///
    /// //////////////////////

    fn oracle_count(&self) -> U64;

    /// ## Panics
    /// if the index is out of range
    fn oracle(&self, index: U64) -> AccountId;

    fn oracles(&self) -> Vec<AccountId>;

    fn is_oracle(&self, account_id: ValidAccountId) -> bool;

    /// number of proposals ever created
    fn proposal_count(&self) -> U64;

    /// ## Panics
    /// if the proposal is not active
    fn proposal(&self, id: U64) -> Proposal;

    fn active_proposal_of(&self, account_id: ValidAccountId) -> Option<U64>;

    //////////////////////////////
    //     CHANGE METHODS    ///
    /// ////////////////////////

    /// Creates a proposal with the predecessor's vote counted. Executes immediately if that vote
    /// alone reaches quorum.
    ///
    /// `proposal_type`: 0 = SetYield, 1 = SetFee, 2 = AddOracle, 3 = RemoveOracle
    ///
    /// `arg` is a 32 byte word:
    /// - SetYield / SetFee: big-endian unsigned integer, which must fit into a u128
    /// - AddOracle / RemoveOracle: account ID bytes, right aligned and zero padded on the left
    ///
    /// Returns the proposal ID.
    ///
    /// ## Panics
    /// - if the predecessor is not an oracle
    /// - if the proposal type is out of range
    /// - if the predecessor already authored an active proposal
    /// - if the argument cannot be decoded
    fn propose(&mut self, proposal_type: u8, arg: Base64VecU8) -> U64;

    /// Returns true if the vote executed the proposal. Voting again is a no-op.
    ///
    /// ## Panics
    /// - if the predecessor is not an oracle
    /// - if the proposal is not active
    fn vote(&mut self, id: U64) -> bool;

    /// ## Panics
    /// - if the proposal is not active
    /// - if the predecessor is not an oracle
    /// - if the predecessor is not the proposal's author
    fn cancel(&mut self, id: U64);
}

pub mod events {
    #[derive(Debug)]
    pub struct ProposalCreated<'a> {
        pub id: u64,
        pub author: &'a str,
        pub proposal_type: u8,
        pub arg: &'a [u8],
    }

    #[derive(Debug)]
    pub struct ProposalVoted<'a> {
        pub id: u64,
        pub voter: &'a str,
    }

    #[derive(Debug)]
    pub struct ProposalExecuted<'a> {
        pub id: u64,
        pub proposal_type: u8,
        pub arg: &'a [u8],
    }

    #[derive(Debug)]
    pub struct ProposalCanceled {
        pub id: u64,
    }
}
