use crate::domain::{BatchIndex, BlockHeight};
use near_sdk::borsh::{self, BorshDeserialize, BorshSerialize};

/// Held while the validator registration for the next funding batch is in flight.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchLock {
    /// index that the batch will be assigned if the registration succeeds
    pub batch: BatchIndex,
    /// when the lock was acquired
    pub block_height: BlockHeight,
}

impl BatchLock {
    pub fn new(batch: BatchIndex) -> Self {
        Self {
            batch,
            block_height: BlockHeight::from_env(),
        }
    }
}
