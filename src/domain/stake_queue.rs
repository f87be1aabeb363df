use crate::domain::YoctoNear;
use crate::near::storage_keys::*;
use near_sdk::{
    borsh::{self, BorshDeserialize, BorshSerialize},
    collections::LookupMap,
    AccountId,
};

/// queue position - assigned sequentially and never reused
pub type QueuePosition = u64;

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub struct StakeRecord {
    pub depositor: AccountId,
    pub amount: YoctoNear,
}

/// FIFO queue of pending stakes backed by an index based ring over `[head, tail)`.
///
/// Records removed by unstaking leave holes, which are skipped when walking the queue. A partially
/// consumed head record is mutated in place and stays at the head.
#[derive(BorshSerialize, BorshDeserialize)]
pub struct StakeQueue {
    records: LookupMap<QueuePosition, StakeRecord>,
    head: QueuePosition,
    tail: QueuePosition,
    /// live record positions per depositor
    positions: LookupMap<AccountId, Vec<QueuePosition>>,
    total: YoctoNear,
}

impl StakeQueue {
    pub fn new() -> Self {
        Self {
            records: LookupMap::new(STAKE_RECORDS_KEY_PREFIX.to_vec()),
            head: 0,
            tail: 0,
            positions: LookupMap::new(STAKE_POSITIONS_KEY_PREFIX.to_vec()),
            total: YoctoNear::ZERO,
        }
    }

    /// GlobalPendingTotal
    pub fn total(&self) -> YoctoNear {
        self.total
    }

    /// number of live records
    pub fn len(&self) -> u64 {
        (self.head..self.tail)
            .filter(|position| self.records.contains_key(position))
            .count() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.total.is_zero()
    }

    pub fn pending_balance_of(&self, depositor: &AccountId) -> YoctoNear {
        self.positions
            .get(depositor)
            .unwrap_or_default()
            .iter()
            .filter_map(|position| self.records.get(position))
            .fold(YoctoNear::ZERO, |total, record| total + record.amount)
    }

    /// appends the stake at the tail
    pub fn push(&mut self, depositor: &AccountId, amount: YoctoNear) -> QueuePosition {
        let position = self.tail;
        self.records.insert(
            &position,
            &StakeRecord {
                depositor: depositor.clone(),
                amount,
            },
        );
        let mut positions = self.positions.get(depositor).unwrap_or_default();
        positions.push(position);
        self.positions.insert(depositor, &positions);
        self.tail += 1;
        self.total += amount;
        position
    }

    /// Removes all of the depositor's live records, regardless of their queue position.
    ///
    /// Returns the total amount removed.
    pub fn remove_all_of(&mut self, depositor: &AccountId) -> YoctoNear {
        let positions = match self.positions.remove(depositor) {
            Some(positions) => positions,
            None => return YoctoNear::ZERO,
        };
        let amount = positions
            .iter()
            .filter_map(|position| self.records.remove(position))
            .fold(YoctoNear::ZERO, |total, record| total + record.amount);
        self.total -= amount;
        self.advance_head();
        amount
    }

    /// Consumes exactly `amount` from the head of the queue.
    ///
    /// Returns what was taken from each record that was touched, in queue order. The same depositor
    /// may appear more than once.
    ///
    /// ## Panics
    /// if the queue holds less than `amount` - the caller is expected to check [total](Self::total)
    pub fn consume_from_head(&mut self, amount: YoctoNear) -> Vec<(AccountId, YoctoNear)> {
        assert!(
            amount <= self.total,
            "ILLEGAL STATE : stake queue does not hold enough funds"
        );
        let records = &self.records;
        let taken = take_from_head(
            (self.head..self.tail)
                .filter_map(|position| records.get(&position).map(|record| (position, record)))
                .map(|(position, record)| {
                    let available = record.amount.value();
                    ((position, record), available)
                }),
            amount.value(),
        );

        let mut consumed = Vec::with_capacity(taken.len());
        for ((position, mut record), take) in taken {
            let take = YoctoNear(take);
            if take == record.amount {
                self.records.remove(&position);
                self.forget_position(&record.depositor, position);
            } else {
                record.amount -= take;
                self.records.insert(&position, &record);
            }
            consumed.push((record.depositor, take));
        }
        self.total -= amount;
        self.advance_head();
        consumed
    }

    /// The depositor's share of the tail excess, i.e., the part of the pending total that is left
    /// over after forming as many whole funding units as possible. The excess is attributed to the
    /// most recent records first.
    pub fn unstakable_balance(&self, depositor: &AccountId, funding_unit: YoctoNear) -> YoctoNear {
        if funding_unit.is_zero() {
            return YoctoNear::ZERO;
        }
        let excess = self.total.value() % funding_unit.value();
        if excess == 0 {
            return YoctoNear::ZERO;
        }
        let records = &self.records;
        attribute_from_tail(
            (self.head..self.tail)
                .rev()
                .filter_map(|position| records.get(&position))
                .map(|record| {
                    let amount = record.amount.value();
                    (record.depositor, amount)
                }),
            excess,
        )
        .into_iter()
        .filter(|(account_id, _)| account_id == depositor)
        .fold(YoctoNear::ZERO, |total, (_, amount)| total + YoctoNear(amount))
    }

    /// live records in queue order
    pub fn records(&self) -> Vec<StakeRecord> {
        (self.head..self.tail)
            .filter_map(|position| self.records.get(&position))
            .collect()
    }

    fn forget_position(&mut self, depositor: &AccountId, position: QueuePosition) {
        if let Some(mut positions) = self.positions.get(depositor) {
            positions.retain(|p| *p != position);
            if positions.is_empty() {
                self.positions.remove(depositor);
            } else {
                self.positions.insert(depositor, &positions);
            }
        }
    }

    /// skips over holes at the head
    fn advance_head(&mut self) {
        while self.head < self.tail && !self.records.contains_key(&self.head) {
            self.head += 1;
        }
    }
}

/// Walks entries in order taking whole amounts until `need` is satisfied; the last entry touched
/// may be taken partially.
///
/// Returns the entries touched paired with the amount taken from each. The entries are consumed
/// lazily, i.e., entries beyond the last one touched are never pulled from the iterator.
pub(crate) fn take_from_head<K>(
    entries: impl Iterator<Item = (K, u128)>,
    mut need: u128,
) -> Vec<(K, u128)> {
    let mut taken = vec![];
    if need == 0 {
        return taken;
    }
    for (key, available) in entries {
        if available == 0 {
            continue;
        }
        let take = available.min(need);
        taken.push((key, take));
        need -= take;
        if need == 0 {
            break;
        }
    }
    taken
}

/// Attributes `excess` to entries walking from the tail, i.e., the iterator is expected to yield
/// the most recent entry first.
pub(crate) fn attribute_from_tail<K>(
    entries_from_tail: impl Iterator<Item = (K, u128)>,
    excess: u128,
) -> Vec<(K, u128)> {
    take_from_head(entries_from_tail, excess)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_utils::*;
    use near_sdk::{testing_env, MockedBlockchain};
    use quickcheck_macros::quickcheck;

    fn queue() -> StakeQueue {
        testing_env!(new_context(&alice()));
        StakeQueue::new()
    }

    #[test]
    fn push_then_remove_all_of_depositor() {
        let mut queue = queue();
        queue.push(&alice(), YoctoNear(10));
        queue.push(&bob(), YoctoNear(5));
        queue.push(&alice(), YoctoNear(7));
        assert_eq!(queue.total(), YoctoNear(22));
        assert_eq!(queue.pending_balance_of(&alice()), YoctoNear(17));

        assert_eq!(queue.remove_all_of(&alice()), YoctoNear(17));
        assert_eq!(queue.pending_balance_of(&alice()), YoctoNear::ZERO);
        assert_eq!(queue.total(), YoctoNear(5));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.remove_all_of(&alice()), YoctoNear::ZERO);
    }

    #[test]
    fn consume_from_head_mutates_partially_consumed_head_in_place() {
        let mut queue = queue();
        queue.push(&alice(), YoctoNear(20));
        queue.push(&bob(), YoctoNear(20));
        queue.push(&charlie(), YoctoNear(5));

        let consumed = queue.consume_from_head(YoctoNear(32));
        assert_eq!(
            consumed,
            vec![(alice(), YoctoNear(20)), (bob(), YoctoNear(12))]
        );
        assert_eq!(queue.total(), YoctoNear(13));
        assert_eq!(
            queue.records(),
            vec![
                StakeRecord {
                    depositor: bob(),
                    amount: YoctoNear(8)
                },
                StakeRecord {
                    depositor: charlie(),
                    amount: YoctoNear(5)
                }
            ]
        );
        assert_eq!(queue.pending_balance_of(&alice()), YoctoNear::ZERO);
        assert_eq!(queue.pending_balance_of(&bob()), YoctoNear(8));
    }

    #[test]
    fn consume_from_head_skips_holes() {
        let mut queue = queue();
        queue.push(&alice(), YoctoNear(20));
        queue.push(&bob(), YoctoNear(20));
        queue.push(&charlie(), YoctoNear(20));
        queue.remove_all_of(&alice());
        queue.remove_all_of(&bob());

        let consumed = queue.consume_from_head(YoctoNear(15));
        assert_eq!(consumed, vec![(charlie(), YoctoNear(15))]);
        assert_eq!(queue.pending_balance_of(&charlie()), YoctoNear(5));
    }

    #[test]
    #[should_panic(expected = "ILLEGAL STATE : stake queue does not hold enough funds")]
    fn consume_more_than_pending() {
        let mut queue = queue();
        queue.push(&alice(), YoctoNear(20));
        queue.consume_from_head(YoctoNear(21));
    }

    #[test]
    fn unstakable_balance_of_most_recent_depositor() {
        let mut queue = queue();
        queue.push(&alice(), YoctoNear(20));
        queue.push(&bob(), YoctoNear(20));
        // 40 % 32 = 8, all from bob's record
        assert_eq!(queue.unstakable_balance(&bob(), YoctoNear(32)), YoctoNear(8));
        assert_eq!(queue.unstakable_balance(&alice(), YoctoNear(32)), YoctoNear::ZERO);
    }

    #[test]
    fn unstakable_balance_spans_multiple_depositors() {
        let mut queue = queue();
        queue.push(&alice(), YoctoNear(20));
        queue.push(&bob(), YoctoNear(3));
        queue.push(&charlie(), YoctoNear(2));
        queue.push(&bob(), YoctoNear(1));
        // 26 % 32 = 26 -> every record is in the excess
        assert_eq!(queue.unstakable_balance(&alice(), YoctoNear(32)), YoctoNear(20));
        assert_eq!(queue.unstakable_balance(&bob(), YoctoNear(32)), YoctoNear(4));
        assert_eq!(queue.unstakable_balance(&charlie(), YoctoNear(32)), YoctoNear(2));

        queue.push(&charlie(), YoctoNear(10));
        // 36 % 32 = 4 -> charlie's 10 covers it
        assert_eq!(queue.unstakable_balance(&charlie(), YoctoNear(32)), YoctoNear(4));
        assert_eq!(queue.unstakable_balance(&bob(), YoctoNear(32)), YoctoNear::ZERO);

        queue.push(&alice(), YoctoNear(21));
        // 57 % 32 = 25 -> alice 21, charlie 4
        assert_eq!(queue.unstakable_balance(&alice(), YoctoNear(32)), YoctoNear(21));
        assert_eq!(queue.unstakable_balance(&charlie(), YoctoNear(32)), YoctoNear(4));
    }

    #[test]
    fn unstakable_balance_is_zero_when_pending_fills_whole_units() {
        let mut queue = queue();
        queue.push(&alice(), YoctoNear(40));
        queue.push(&bob(), YoctoNear(24));
        assert_eq!(queue.unstakable_balance(&bob(), YoctoNear(32)), YoctoNear::ZERO);
    }

    #[test]
    fn take_from_head_is_lazy() {
        let mut pulled = 0;
        let taken = take_from_head(
            vec![5u128, 5, 5, 5].into_iter().enumerate().map(|entry| {
                pulled += 1;
                entry
            }),
            7,
        );
        assert_eq!(taken, vec![(0, 5), (1, 2)]);
        assert_eq!(pulled, 2);
    }

    #[quickcheck]
    fn take_from_head_takes_exactly_what_is_needed(amounts: Vec<u32>, need: u64) -> bool {
        let amounts: Vec<u128> = amounts.into_iter().map(u128::from).collect();
        let need = need as u128;
        let available: u128 = amounts.iter().sum();
        let taken = take_from_head(amounts.iter().cloned().enumerate(), need);

        let total_taken: u128 = taken.iter().map(|(_, take)| take).sum();
        if total_taken != need.min(available) {
            return false;
        }
        // every touched entry except the last is taken whole, in queue order
        let whole_prefix = taken
            .iter()
            .take(taken.len().saturating_sub(1))
            .all(|(index, take)| amounts[*index] == *take);
        let in_order = taken.windows(2).all(|pair| pair[0].0 < pair[1].0);
        let none_skipped = match taken.last() {
            Some((last, _)) => (0..*last)
                .filter(|index| amounts[*index] > 0)
                .all(|index| taken.iter().any(|(touched, _)| *touched == index)),
            None => true,
        };
        whole_prefix && in_order && none_skipped
    }

    #[quickcheck]
    fn tail_excess_is_fully_attributed(amounts: Vec<u32>, unit: u32) -> bool {
        if unit == 0 {
            return true;
        }
        let amounts: Vec<u128> = amounts.into_iter().map(u128::from).collect();
        let total: u128 = amounts.iter().sum();
        let excess = total % unit as u128;
        let attributed = attribute_from_tail(amounts.iter().cloned().enumerate().rev(), excess);
        let total_attributed: u128 = attributed.iter().map(|(_, amount)| amount).sum();
        total_attributed == excess
            && attributed
                .iter()
                .all(|(index, amount)| *amount <= amounts[*index])
    }
}
