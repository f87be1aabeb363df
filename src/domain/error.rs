use crate::errors::{governance, share_ledger, stake_pool};
use std::fmt::{self, Display, Formatter};

/// Rejected preconditions. Each one aborts only the triggering call and leaves state unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // share ledger
    NotTokenOwner,
    InsufficientBalance,
    InsufficientAllowance,
    ZeroRatioDenominator,
    ZeroRatioNumerator,
    ArithmeticOverflow,

    // stake pool
    NotGovernor,
    AmountTooSmall,
    NothingPending,
    InsufficientPooledFunds,
    ExternalValidationFailed(String),
    InvalidDepositData(&'static str),
    InvalidIndex,
    BatchInProgress,

    // oracle governance
    NotAnOracle,
    NoSuchProposal,
    NotAuthor,
    AuthorHasActiveProposal,
    InvalidProposalArgument,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotTokenOwner => f.write_str(share_ledger::NOT_TOKEN_OWNER),
            Error::InsufficientBalance => f.write_str(share_ledger::INSUFFICIENT_BALANCE),
            Error::InsufficientAllowance => f.write_str(share_ledger::INSUFFICIENT_ALLOWANCE),
            Error::ZeroRatioDenominator => f.write_str(share_ledger::ZERO_RATIO_DENOMINATOR),
            Error::ZeroRatioNumerator => f.write_str(share_ledger::ZERO_RATIO_NUMERATOR),
            Error::ArithmeticOverflow => f.write_str(share_ledger::ARITHMETIC_OVERFLOW),
            Error::NotGovernor => f.write_str(stake_pool::NOT_GOVERNOR),
            Error::AmountTooSmall => f.write_str(stake_pool::AMOUNT_TOO_SMALL),
            Error::NothingPending => f.write_str(stake_pool::NOTHING_PENDING),
            Error::InsufficientPooledFunds => f.write_str(stake_pool::INSUFFICIENT_POOLED_FUNDS),
            Error::ExternalValidationFailed(reason) => write!(
                f,
                "{}: {}",
                stake_pool::EXTERNAL_VALIDATION_FAILED,
                reason
            ),
            Error::InvalidDepositData(field) => {
                write!(f, "{}: {}", stake_pool::INVALID_DEPOSIT_DATA, field)
            }
            Error::InvalidIndex => f.write_str(stake_pool::INVALID_INDEX),
            Error::BatchInProgress => f.write_str(stake_pool::BATCH_IN_PROGRESS),
            Error::NotAnOracle => f.write_str(governance::NOT_AN_ORACLE),
            Error::NoSuchProposal => f.write_str(governance::NO_SUCH_PROPOSAL),
            Error::NotAuthor => f.write_str(governance::NOT_AUTHOR),
            Error::AuthorHasActiveProposal => {
                f.write_str(governance::AUTHOR_HAS_ACTIVE_PROPOSAL)
            }
            Error::InvalidProposalArgument => f.write_str(governance::INVALID_PROPOSAL_ARGUMENT),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
