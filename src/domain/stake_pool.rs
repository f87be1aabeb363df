//! Stake queue and batching engine.
//!
//! Depositors stake variable amounts that are queued FIFO. Whenever the pending total reaches the
//! funding unit, anyone may form a batch: exactly one funding unit is consumed from the head of
//! the queue, certified with the validator registry, and recorded as per depositor contributions.
//! Contributions are converted into shares when claimed.

use crate::domain::{
    add_contribution, BasisPoints, BatchIndex, Contribution, DepositData, Error, FundingBatch,
    Result, ShareLedger, StakeQueue, TokenAmount, YoctoNear,
};
use crate::interface::staking_service::events::{
    FeeUpdated, GovernorChanged, RewardsUpdated, StakeAdded, StakeCanceled, StakeDeposited,
    TokensClaimed,
};
use crate::near::{log, storage_keys::*};
use near_sdk::{
    borsh::{self, BorshDeserialize, BorshSerialize},
    collections::{LookupMap, Vector},
    AccountId,
};

/// External collaborator that certifies a funding unit.
///
/// It either accepts the deposit, or rejects it with a reason. It must be deterministic.
pub trait ValidatorRegistry {
    fn register(
        &mut self,
        amount: YoctoNear,
        deposit_data: &DepositData,
    ) -> std::result::Result<(), String>;
}

#[derive(BorshSerialize, BorshDeserialize)]
pub struct StakePool {
    governor_id: AccountId,
    funding_unit: YoctoNear,
    fee: BasisPoints,
    queue: StakeQueue,
    batches: Vector<FundingBatch>,
    /// unclaimed contributions per depositor, ordered by batch
    contributions: LookupMap<AccountId, Vec<Contribution>>,
    /// cumulative gross rewards as last reported
    reported_rewards: YoctoNear,
    /// accumulated net rewards, i.e., after fees
    rewards: YoctoNear,
}

impl StakePool {
    pub fn new(governor_id: AccountId, funding_unit: YoctoNear, fee: BasisPoints) -> Self {
        Self {
            governor_id,
            funding_unit,
            fee,
            queue: StakeQueue::new(),
            batches: Vector::new(FUNDING_BATCHES_KEY_PREFIX.to_vec()),
            contributions: LookupMap::new(CONTRIBUTIONS_KEY_PREFIX.to_vec()),
            reported_rewards: YoctoNear::ZERO,
            rewards: YoctoNear::ZERO,
        }
    }

    pub fn governor_id(&self) -> &AccountId {
        &self.governor_id
    }

    pub fn funding_unit(&self) -> YoctoNear {
        self.funding_unit
    }

    pub fn fee(&self) -> BasisPoints {
        self.fee
    }

    pub fn queue(&self) -> &StakeQueue {
        &self.queue
    }

    /// GlobalPendingTotal
    pub fn total_pending_balance(&self) -> YoctoNear {
        self.queue.total()
    }

    pub fn pending_balance_of(&self, depositor: &AccountId) -> YoctoNear {
        self.queue.pending_balance_of(depositor)
    }

    pub fn unstakable_balance(&self, depositor: &AccountId) -> YoctoNear {
        self.queue.unstakable_balance(depositor, self.funding_unit)
    }

    pub fn claimable_balance(&self, depositor: &AccountId) -> YoctoNear {
        self.contributions
            .get(depositor)
            .unwrap_or_default()
            .iter()
            .fold(YoctoNear::ZERO, |total, contribution| {
                total + contribution.amount
            })
    }

    pub fn contributions(&self, depositor: &AccountId) -> Vec<Contribution> {
        self.contributions.get(depositor).unwrap_or_default()
    }

    /// accumulated net rewards
    pub fn rewards(&self) -> YoctoNear {
        self.rewards
    }

    /// cumulative gross rewards as last reported
    pub fn reported_rewards(&self) -> YoctoNear {
        self.reported_rewards
    }

    pub fn validator_count(&self) -> u64 {
        self.batches.len()
    }

    /// returns the batch's validator public key
    pub fn validator(&self, index: BatchIndex) -> Result<Vec<u8>> {
        self.funding_batch(index)
            .map(|batch| batch.deposit_data.pubkey)
    }

    pub fn funding_batch(&self, index: BatchIndex) -> Result<FundingBatch> {
        self.batches.get(index).ok_or(Error::InvalidIndex)
    }

    /// batch count x funding unit
    pub fn deployed_balance(&self) -> Result<YoctoNear> {
        self.funding_unit
            .value()
            .checked_mul(self.batches.len() as u128)
            .map(YoctoNear)
            .ok_or(Error::ArithmeticOverflow)
    }

    /// CumulativeUnderlying = deployed balance + accumulated net rewards
    pub fn cumulative_underlying(&self) -> Result<YoctoNear> {
        self.underlying_with_rewards(self.rewards)
    }

    pub fn stake(
        &mut self,
        depositor: &AccountId,
        amount: YoctoNear,
        min_stake: YoctoNear,
    ) -> Result<()> {
        if amount.is_zero() || amount < min_stake {
            return Err(Error::AmountTooSmall);
        }
        self.queue.push(depositor, amount);

        log(StakeAdded {
            depositor,
            amount: amount.value(),
        });
        Ok(())
    }

    /// Removes all of the depositor's pending stake from the queue.
    ///
    /// Returns the amount that should be refunded to the depositor.
    pub fn unstake(&mut self, depositor: &AccountId) -> Result<YoctoNear> {
        if self.queue.pending_balance_of(depositor).is_zero() {
            return Err(Error::NothingPending);
        }
        let amount = self.queue.remove_all_of(depositor);

        log(StakeCanceled {
            depositor,
            amount: amount.value(),
        });
        Ok(amount)
    }

    /// Checks that a batch could be formed with the specified deposit data.
    pub fn check_form_batch(&self, deposit_data: &DepositData) -> Result<()> {
        if self.queue.total() < self.funding_unit {
            return Err(Error::InsufficientPooledFunds);
        }
        deposit_data.validate()
    }

    /// Consumes exactly one funding unit from the head of the queue into a new funding batch.
    ///
    /// The registry is consulted before any state is changed - if it rejects the deposit, then
    /// the queue is left untouched.
    pub fn form_batch<R: ValidatorRegistry>(
        &mut self,
        registry: &mut R,
        deposit_data: DepositData,
    ) -> Result<BatchIndex> {
        self.check_form_batch(&deposit_data)?;
        registry
            .register(self.funding_unit, &deposit_data)
            .map_err(Error::ExternalValidationFailed)?;
        Ok(self.record_batch(deposit_data))
    }

    /// Records a funding batch for a validator that the registry has already accepted.
    ///
    /// Consumes one funding unit from the queue head, or whatever the queue holds if it has fallen
    /// below a funding unit. Contributions are recorded for the amounts actually consumed.
    pub fn record_batch(&mut self, deposit_data: DepositData) -> BatchIndex {
        let index = self.batches.len();
        let amount = self.funding_unit.min(self.queue.total());
        for (depositor, amount) in self.queue.consume_from_head(amount) {
            let mut contributions = self.contributions.get(&depositor).unwrap_or_default();
            add_contribution(
                &mut contributions,
                Contribution {
                    batch: index,
                    amount,
                },
            );
            self.contributions.insert(&depositor, &contributions);
        }
        let batch = FundingBatch {
            index,
            deposit_data,
        };
        self.batches.push(&batch);

        log(StakeDeposited {
            batch: index,
            pubkey: &batch.deposit_data.pubkey,
        });
        index
    }

    /// Mints shares for all of the depositor's unclaimed contributions.
    ///
    /// `minter` is the credential presented to the share ledger.
    ///
    /// Returns the amount claimed - zero if there was nothing to claim, in which case nothing is
    /// logged.
    pub fn claim(
        &mut self,
        depositor: &AccountId,
        ledger: &mut ShareLedger,
        minter: &AccountId,
    ) -> Result<YoctoNear> {
        let contributions = self.contributions.get(depositor).unwrap_or_default();
        let amount = contributions
            .iter()
            .fold(YoctoNear::ZERO, |total, contribution| {
                total + contribution.amount
            });
        if amount.is_zero() {
            return Ok(YoctoNear::ZERO);
        }

        ledger.mint(minter, depositor, TokenAmount(amount.value()))?;
        self.contributions.remove(depositor);

        for contribution in contributions {
            let pubkey = self
                .batches
                .get(contribution.batch)
                .map(|batch| batch.deposit_data.pubkey)
                .unwrap_or_default();
            log(TokensClaimed {
                depositor,
                amount: contribution.amount.value(),
                batch: contribution.batch,
                pubkey: &pubkey,
            });
        }
        Ok(amount)
    }

    /// Values above 100% are ignored without error.
    pub fn set_fee(&mut self, caller: &AccountId, fee: u32) -> Result<()> {
        self.assert_governor(caller)?;
        if let Some(fee) = BasisPoints::new(fee) {
            let old = self.fee;
            self.fee = fee;
            log(FeeUpdated {
                old: old.value(),
                new: fee.value(),
            });
        }
        Ok(())
    }

    /// Records the cumulative gross rewards reported to date and re-prices the share token.
    ///
    /// The fee is charged on the increase over the previous report. A report that is lower than
    /// the previous one reduces the accumulated rewards by the shortfall.
    ///
    /// `minter` is the credential presented to the share ledger.
    pub fn set_rewards(
        &mut self,
        caller: &AccountId,
        gross_rewards: YoctoNear,
        ledger: &mut ShareLedger,
        minter: &AccountId,
    ) -> Result<()> {
        self.assert_governor(caller)?;

        let rewards = if gross_rewards >= self.reported_rewards {
            let increase = gross_rewards - self.reported_rewards;
            let net = increase - self.fee.of(increase);
            self.rewards
                .value()
                .checked_add(net.value())
                .map(YoctoNear)
                .ok_or(Error::ArithmeticOverflow)?
        } else {
            self.rewards
                .saturating_sub(self.reported_rewards - gross_rewards)
        };

        let total_shares = ledger.total_shares().value();
        if total_shares == 0 {
            return Err(Error::ZeroRatioDenominator);
        }
        let underlying = self.underlying_with_rewards(rewards)?;
        ledger.set_ratio(minter, underlying.value(), total_shares)?;

        let old = self.rewards;
        self.rewards = rewards;
        self.reported_rewards = gross_rewards;
        log(RewardsUpdated {
            old: old.value(),
            new: rewards.value(),
        });
        Ok(())
    }

    pub fn set_governor(&mut self, caller: &AccountId, governor_id: &AccountId) -> Result<()> {
        self.assert_governor(caller)?;
        let old = std::mem::replace(&mut self.governor_id, governor_id.clone());
        log(GovernorChanged {
            old: &old,
            new: governor_id,
        });
        Ok(())
    }

    fn assert_governor(&self, caller: &AccountId) -> Result<()> {
        if caller == &self.governor_id {
            Ok(())
        } else {
            Err(Error::NotGovernor)
        }
    }

    fn underlying_with_rewards(&self, rewards: YoctoNear) -> Result<YoctoNear> {
        self.deployed_balance()?
            .value()
            .checked_add(rewards.value())
            .map(YoctoNear)
            .ok_or(Error::ArithmeticOverflow)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::near::YOCTO;
    use crate::test_utils::*;
    use near_sdk::{test_utils::get_logs, testing_env, MockedBlockchain};

    const UNIT: u128 = 32 * YOCTO;

    struct Context {
        pool: StakePool,
        ledger: ShareLedger,
    }

    impl Context {
        fn new() -> Self {
            testing_env!(new_context(&governor()));
            Self {
                pool: StakePool::new(governor(), YoctoNear(UNIT), BasisPoints::new(100).unwrap()),
                ledger: ShareLedger::new(minter()),
            }
        }

        fn stake(&mut self, depositor: &AccountId, amount: u128) {
            self.pool
                .stake(depositor, YoctoNear(amount), YoctoNear(YOCTO / 10))
                .unwrap();
        }

        fn form_batch(&mut self) -> BatchIndex {
            self.pool
                .form_batch(&mut AcceptingRegistry, deposit_data())
                .unwrap()
        }

        fn claim(&mut self, depositor: &AccountId) -> YoctoNear {
            self.pool
                .claim(depositor, &mut self.ledger, &minter())
                .unwrap()
        }

        fn set_rewards(&mut self, gross: u128) -> Result<()> {
            self.pool
                .set_rewards(&governor(), YoctoNear(gross), &mut self.ledger, &minter())
        }
    }

    fn governor() -> AccountId {
        "governor.near".to_string()
    }

    fn minter() -> AccountId {
        "pool.near".to_string()
    }

    struct AcceptingRegistry;

    impl ValidatorRegistry for AcceptingRegistry {
        fn register(
            &mut self,
            amount: YoctoNear,
            _deposit_data: &DepositData,
        ) -> std::result::Result<(), String> {
            assert_eq!(amount, YoctoNear(UNIT));
            Ok(())
        }
    }

    struct RejectingRegistry;

    impl ValidatorRegistry for RejectingRegistry {
        fn register(
            &mut self,
            _amount: YoctoNear,
            _deposit_data: &DepositData,
        ) -> std::result::Result<(), String> {
            Err("deposit data root mismatch".to_string())
        }
    }

    #[test]
    fn stake_below_min_stake() {
        let mut ctx = Context::new();
        assert_eq!(
            ctx.pool
                .stake(&alice(), YoctoNear(YOCTO / 100), YoctoNear(YOCTO / 10)),
            Err(Error::AmountTooSmall)
        );
        assert_eq!(
            ctx.pool.stake(&alice(), YoctoNear::ZERO, YoctoNear::ZERO),
            Err(Error::AmountTooSmall)
        );
        assert!(ctx.pool.total_pending_balance().is_zero());
        assert!(get_logs().is_empty());
    }

    #[test]
    fn stake_logs_event() {
        let mut ctx = Context::new();
        ctx.stake(&alice(), YOCTO);
        assert_eq!(ctx.pool.pending_balance_of(&alice()), YoctoNear(YOCTO));
        let logs = get_logs();
        assert_eq!(logs.len(), 1);
        assert!(logs[0].starts_with("StakeAdded"));
    }

    #[test]
    fn unstake_returns_all_pending_stake() {
        let mut ctx = Context::new();
        ctx.stake(&alice(), 10 * YOCTO);
        ctx.stake(&bob(), 10 * YOCTO);
        ctx.stake(&alice(), 5 * YOCTO);

        assert_eq!(ctx.pool.unstake(&alice()), Ok(YoctoNear(15 * YOCTO)));
        assert_eq!(ctx.pool.total_pending_balance(), YoctoNear(10 * YOCTO));
        assert_eq!(ctx.pool.unstake(&alice()), Err(Error::NothingPending));
        assert!(get_logs().last().unwrap().starts_with("StakeCanceled"));
    }

    #[test]
    fn form_batch_with_insufficient_funds() {
        let mut ctx = Context::new();
        ctx.stake(&alice(), UNIT - 1);
        assert_eq!(
            ctx.pool.form_batch(&mut AcceptingRegistry, deposit_data()),
            Err(Error::InsufficientPooledFunds)
        );
        assert_eq!(ctx.pool.validator_count(), 0);
    }

    #[test]
    fn form_batch_consumes_fifo() {
        let mut ctx = Context::new();
        ctx.stake(&alice(), 20 * YOCTO);
        ctx.stake(&bob(), 20 * YOCTO);

        assert_eq!(ctx.form_batch(), 0);
        assert_eq!(ctx.pool.claimable_balance(&alice()), YoctoNear(20 * YOCTO));
        assert_eq!(ctx.pool.claimable_balance(&bob()), YoctoNear(12 * YOCTO));
        assert_eq!(ctx.pool.pending_balance_of(&alice()), YoctoNear::ZERO);
        assert_eq!(ctx.pool.pending_balance_of(&bob()), YoctoNear(8 * YOCTO));
        assert_eq!(ctx.pool.total_pending_balance(), YoctoNear(8 * YOCTO));
        assert_eq!(ctx.pool.validator_count(), 1);
        assert_eq!(ctx.pool.validator(0), Ok(deposit_data().pubkey));
        assert_eq!(ctx.pool.validator(1), Err(Error::InvalidIndex));
        assert!(get_logs().last().unwrap().starts_with("StakeDeposited"));
    }

    #[test]
    fn form_batch_rejected_by_registry_leaves_queue_untouched() {
        let mut ctx = Context::new();
        ctx.stake(&alice(), 40 * YOCTO);
        let log_count = get_logs().len();

        assert_eq!(
            ctx.pool.form_batch(&mut RejectingRegistry, deposit_data()),
            Err(Error::ExternalValidationFailed(
                "deposit data root mismatch".to_string()
            ))
        );
        assert_eq!(ctx.pool.pending_balance_of(&alice()), YoctoNear(40 * YOCTO));
        assert!(ctx.pool.claimable_balance(&alice()).is_zero());
        assert_eq!(ctx.pool.validator_count(), 0);
        assert_eq!(get_logs().len(), log_count);
    }

    #[test]
    fn record_batch_when_queue_is_underfunded() {
        let mut ctx = Context::new();
        ctx.stake(&alice(), 20 * YOCTO);
        ctx.stake(&bob(), 5 * YOCTO);

        assert_eq!(ctx.pool.record_batch(deposit_data()), 0);
        assert_eq!(ctx.pool.validator_count(), 1);
        assert_eq!(ctx.pool.validator(0), Ok(deposit_data().pubkey));
        assert!(ctx.pool.total_pending_balance().is_zero());
        assert_eq!(ctx.pool.claimable_balance(&alice()), YoctoNear(20 * YOCTO));
        assert_eq!(ctx.pool.claimable_balance(&bob()), YoctoNear(5 * YOCTO));
        assert!(get_logs().last().unwrap().starts_with("StakeDeposited"));

        // an empty queue still records the registered validator
        assert_eq!(ctx.pool.record_batch(deposit_data()), 1);
        assert_eq!(ctx.pool.validator_count(), 2);
        assert!(ctx.pool.contributions(&alice()).iter().all(|c| c.batch == 0));
    }

    #[test]
    fn form_batch_with_invalid_deposit_data() {
        let mut ctx = Context::new();
        ctx.stake(&alice(), 40 * YOCTO);
        let mut data = deposit_data();
        data.withdrawal_credentials = vec![];
        assert_eq!(
            ctx.pool.form_batch(&mut AcceptingRegistry, data),
            Err(Error::InvalidDepositData("withdrawal_credentials"))
        );
    }

    #[test]
    fn claim_is_idempotent() {
        let mut ctx = Context::new();
        ctx.stake(&alice(), UNIT);
        ctx.form_batch();

        assert_eq!(ctx.claim(&alice()), YoctoNear(UNIT));
        assert_eq!(ctx.ledger.balance_of(&alice()), TokenAmount(UNIT));
        let logs = get_logs();
        assert!(logs.last().unwrap().starts_with("TokensClaimed"));

        let log_count = logs.len();
        assert_eq!(ctx.claim(&alice()), YoctoNear::ZERO);
        assert_eq!(ctx.ledger.balance_of(&alice()), TokenAmount(UNIT));
        assert_eq!(get_logs().len(), log_count);
    }

    #[test]
    fn claim_logs_one_event_per_batch() {
        let mut ctx = Context::new();
        ctx.stake(&alice(), 50 * YOCTO);
        ctx.stake(&bob(), 14 * YOCTO);
        ctx.form_batch();
        ctx.form_batch();
        assert_eq!(ctx.pool.contributions(&alice()).len(), 2);

        let log_count = get_logs().len();
        assert_eq!(ctx.claim(&alice()), YoctoNear(50 * YOCTO));
        let logs = get_logs();
        let claimed = logs[log_count..]
            .iter()
            .filter(|log| log.starts_with("TokensClaimed"))
            .count();
        assert_eq!(claimed, 2);
        assert_eq!(ctx.claim(&bob()), YoctoNear(14 * YOCTO));
    }

    #[test]
    fn set_rewards_reprices_holders() {
        let mut ctx = Context::new();
        ctx.stake(&alice(), UNIT);
        ctx.form_batch();
        ctx.claim(&alice());

        ctx.set_rewards(2 * YOCTO).unwrap();
        assert_eq!(ctx.pool.rewards(), YoctoNear(2 * YOCTO - 2 * YOCTO / 100));
        assert_eq!(
            ctx.ledger.balance_of(&alice()),
            TokenAmount(UNIT + 2 * YOCTO - 2 * YOCTO / 100)
        );
        assert!(get_logs().last().unwrap().starts_with("RewardsUpdated"));
    }

    #[test]
    fn set_rewards_charges_fee_on_increase_only() {
        let mut ctx = Context::new();
        ctx.stake(&alice(), UNIT);
        ctx.form_batch();
        ctx.claim(&alice());

        ctx.set_rewards(YOCTO).unwrap();
        ctx.set_rewards(2 * YOCTO).unwrap();
        let net = YOCTO - YOCTO / 100;
        assert_eq!(ctx.pool.rewards(), YoctoNear(2 * net));
        assert_eq!(ctx.pool.reported_rewards(), YoctoNear(2 * YOCTO));

        // a lower report reduces the accumulated rewards by the shortfall
        ctx.set_rewards(YOCTO).unwrap();
        assert_eq!(ctx.pool.rewards(), YoctoNear(2 * net - YOCTO));
        ctx.set_rewards(0).unwrap();
        assert_eq!(ctx.pool.rewards(), YoctoNear::ZERO);
        assert_eq!(ctx.ledger.balance_of(&alice()), TokenAmount(UNIT));
    }

    #[test]
    fn set_rewards_before_any_claim() {
        let mut ctx = Context::new();
        ctx.stake(&alice(), UNIT);
        ctx.form_batch();
        assert_eq!(ctx.set_rewards(YOCTO), Err(Error::ZeroRatioDenominator));
        assert!(ctx.pool.rewards().is_zero());
        assert!(ctx.pool.reported_rewards().is_zero());
    }

    #[test]
    fn governor_only_setters() {
        let mut ctx = Context::new();
        assert_eq!(ctx.pool.set_fee(&alice(), 200), Err(Error::NotGovernor));
        assert_eq!(
            ctx.pool
                .set_rewards(&alice(), YoctoNear(1), &mut ctx.ledger, &minter()),
            Err(Error::NotGovernor)
        );
        assert_eq!(
            ctx.pool.set_governor(&alice(), &alice()),
            Err(Error::NotGovernor)
        );
        // the governor check comes before the fee range check
        assert_eq!(ctx.pool.set_fee(&alice(), 10_001), Err(Error::NotGovernor));
    }

    #[test]
    fn set_fee_above_max_is_ignored() {
        let mut ctx = Context::new();
        ctx.pool.set_fee(&governor(), 10_001).unwrap();
        assert_eq!(ctx.pool.fee().value(), 100);
        assert!(get_logs().is_empty());

        ctx.pool.set_fee(&governor(), 10_000).unwrap();
        assert_eq!(ctx.pool.fee().value(), 10_000);
        assert!(get_logs()[0].starts_with("FeeUpdated"));
    }

    #[test]
    fn set_governor() {
        let mut ctx = Context::new();
        ctx.pool.set_governor(&governor(), &alice()).unwrap();
        assert_eq!(ctx.pool.governor_id(), &alice());
        assert_eq!(ctx.pool.set_fee(&governor(), 200), Err(Error::NotGovernor));
        ctx.pool.set_fee(&alice(), 200).unwrap();
        assert!(get_logs()[0].starts_with("GovernorChanged"));
    }

    #[test]
    fn unstakable_balance_uses_funding_unit() {
        let mut ctx = Context::new();
        ctx.stake(&alice(), 20 * YOCTO);
        ctx.stake(&bob(), 20 * YOCTO);
        assert_eq!(ctx.pool.unstakable_balance(&bob()), YoctoNear(8 * YOCTO));
        assert_eq!(ctx.pool.unstakable_balance(&alice()), YoctoNear::ZERO);
    }
}
