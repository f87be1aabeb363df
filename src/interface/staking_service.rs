use crate::interface::{Contribution, DepositData, FundingBatch, YoctoNear};
use near_sdk::{
    json_types::{Base64VecU8, ValidAccountId, U64},
    AccountId, Promise,
};

/// Stake queue and batching engine
pub trait StakingService {
    ////////////////////////////
    //     VIEW METHODS    ///
    /// //////////////////////

    /// sum of the account's stake that is queued and not yet deployed into a funding batch
    fn pending_balance_of(&self, account_id: ValidAccountId) -> YoctoNear;

    /// sum of the account's contributions to funding batches that have not yet been claimed
    fn claimable_balance(&self, account_id: ValidAccountId) -> YoctoNear;

    fn contributions(&self, account_id: ValidAccountId) -> Vec<Contribution>;

    /// The part of the account's pending stake that falls in the tail excess, i.e., what is left
    /// over after forming as many whole funding units as the total pending balance allows. The
    /// excess is attributed to the most recent stakes first.
    fn unstakable_balance(&self, account_id: ValidAccountId) -> YoctoNear;

    /// GlobalPendingTotal
    fn total_pending_balance(&self) -> YoctoNear;

    /// funding batch count x funding unit
    fn deployed_balance(&self) -> YoctoNear;

    /// accumulated net rewards
    fn rewards(&self) -> YoctoNear;

    /// fee in basis points
    fn fee(&self) -> u16;

    fn governor_id(&self) -> AccountId;

    fn min_stake(&self) -> YoctoNear;

    fn funding_unit(&self) -> YoctoNear;

    /// number of funding batches
    fn validator_count(&self) -> U64;

    /// returns the funding batch's validator public key
    ///
    /// ## Panics
    /// if the index is out of range
    fn validator(&self, index: U64) -> Base64VecU8;

    /// ## Panics
    /// if the index is out of range
    fn funding_batch(&self, index: U64) -> FundingBatch;

    //////////////////////////////
    //     CHANGE METHODS    ///
    /// ////////////////////////

    /// Queues the attached deposit.
    ///
    /// ## Panics
    /// - if the attached deposit is less than the configured min stake
    ///
    /// #[payable]
    fn stake(&mut self);

    /// Removes all of the predecessor account's pending stake from the queue, regardless of its
    /// queue position, and refunds it.
    ///
    /// ## Panics
    /// - if there is nothing pending
    /// - if a batch registration is in progress
    fn unstake(&mut self) -> Promise;

    /// Forms the next funding batch from exactly one funding unit taken from the head of the queue.
    ///
    /// The deposit data is forwarded to the validator registry together with the funding unit. The
    /// queue is only consumed if the registry accepts the deposit - see
    /// [on_register_validator](crate::interface::ext_self_callbacks::on_register_validator)
    ///
    /// ## Panics
    /// - if the total pending balance is less than the funding unit
    /// - if the deposit data fields are not sized correctly
    /// - if a batch registration is already in progress
    fn form_batch(&mut self, deposit_data: DepositData) -> Promise;

    /// Converts all of the predecessor account's unclaimed contributions into shares.
    ///
    /// Returns the amount claimed - zero if there was nothing to claim.
    fn claim(&mut self) -> YoctoNear;

    /// Values above 10000 basis points are ignored.
    ///
    /// ## Panics
    /// - if the predecessor is not the governor
    fn set_fee(&mut self, fee: u32);

    /// Reports the cumulative gross rewards, which re-prices the share token.
    ///
    /// ## Panics
    /// - if the predecessor is not the governor
    /// - if no shares have been claimed yet
    fn set_rewards(&mut self, gross_rewards: YoctoNear);

    /// ## Panics
    /// - if the predecessor is not the governor
    fn set_governor(&mut self, governor_id: ValidAccountId);
}

pub mod events {
    #[derive(Debug)]
    pub struct StakeAdded<'a> {
        pub depositor: &'a str,
        pub amount: u128,
    }

    #[derive(Debug)]
    pub struct StakeCanceled<'a> {
        pub depositor: &'a str,
        pub amount: u128,
    }

    #[derive(Debug)]
    pub struct StakeDeposited<'a> {
        pub batch: u64,
        pub pubkey: &'a [u8],
    }

    /// logged once per batch claimed
    #[derive(Debug)]
    pub struct TokensClaimed<'a> {
        pub depositor: &'a str,
        pub amount: u128,
        pub batch: u64,
        pub pubkey: &'a [u8],
    }

    #[derive(Debug)]
    pub struct GovernorChanged<'a> {
        pub old: &'a str,
        pub new: &'a str,
    }

    /// basis points
    #[derive(Debug)]
    pub struct FeeUpdated {
        pub old: u16,
        pub new: u16,
    }

    /// accumulated net rewards
    #[derive(Debug)]
    pub struct RewardsUpdated {
        pub old: u128,
        pub new: u128,
    }
}
