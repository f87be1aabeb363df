use crate::interface::{BatchLock, BlockHeight, ExchangeRatio, TokenAmount, YoctoNear, YoctoShares};
use near_sdk::{
    json_types::U64,
    serde::{Deserialize, Serialize},
    AccountId,
};

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(crate = "near_sdk::serde")]
pub struct ContractState {
    pub block_height: BlockHeight,
    pub config_change_block_height: BlockHeight,

    pub operator_id: AccountId,
    pub validator_registry_id: AccountId,
    pub governor_id: AccountId,
    pub token_owner_id: AccountId,

    pub funding_unit: YoctoNear,
    /// basis points
    pub fee: u16,

    /// GlobalPendingTotal
    pub total_pending_balance: YoctoNear,
    /// number of live stake records in the queue
    pub pending_stake_count: U64,
    /// funding batch count x funding unit
    pub deployed_balance: YoctoNear,
    pub validator_count: U64,
    /// accumulated net rewards
    pub rewards: YoctoNear,
    /// cumulative gross rewards as last reported
    pub reported_rewards: YoctoNear,
    /// deployed balance + accumulated net rewards
    pub cumulative_underlying: YoctoNear,

    pub total_shares: YoctoShares,
    pub total_supply: TokenAmount,
    pub exchange_ratio: ExchangeRatio,

    pub oracle_count: U64,
    pub proposal_count: U64,

    pub batch_lock: Option<BatchLock>,
}
