//! defines the internal domain model used to implement the business logic
//!
//! NOTE: the domain model is separate from the interface model. That being said, the interface model
//! closely mirrors the domain model.
//!
//! Domain operations never panic on rejected preconditions - they return an [Error] and leave
//! state unchanged. The contract layer converts errors into panics.

mod basis_points;
mod batch_lock;
mod block_height;
mod error;
mod exchange_ratio;
mod funding_batch;
mod gas;
mod oracle_governance;
mod proposal;
mod share_ledger;
mod stake_pool;
mod stake_queue;
mod token_amount;
mod yocto_near;
mod yocto_shares;

pub use basis_points::BasisPoints;
pub use batch_lock::BatchLock;
pub use block_height::BlockHeight;
pub use error::{Error, Result};
pub use exchange_ratio::ExchangeRatio;
pub use funding_batch::{
    add_contribution, BatchIndex, Contribution, DepositData, FundingBatch,
    DEPOSIT_DATA_ROOT_LEN, PUBKEY_LEN, SIGNATURE_LEN, WITHDRAWAL_CREDENTIALS_LEN,
};
pub use gas::{Gas, TGAS};
pub use oracle_governance::{GovernedPool, OracleGovernance};
pub use proposal::{
    Proposal, ProposalAction, ProposalArg, ProposalId, ProposalType, ProposalTypeOutOfRange,
    PROPOSAL_ARG_LEN,
};
pub use share_ledger::ShareLedger;
pub use stake_pool::{StakePool, ValidatorRegistry};
pub use stake_queue::{QueuePosition, StakeQueue, StakeRecord};
pub use token_amount::TokenAmount;
pub use yocto_near::YoctoNear;
pub use yocto_shares::YoctoShares;
