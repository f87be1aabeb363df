//! centralizes all error messages

pub mod asserts {
    pub const PREDECESSOR_MUST_BE_OPERATOR: &str =
        "contract call is only allowed by an operator account";
    pub const PREDECESSOR_MUST_BE_SELF_OR_OPERATOR: &str =
        "contract call is only allowed internally or by an operator account";
    pub const OPERATOR_ID_MUST_NOT_BE_CONTRACT_ID: &str =
        "operator account ID must not be the contract account ID";
    pub const CONTRACT_ALREADY_INITIALIZED: &str = "contract is already initialized";
    pub const ATTACHED_DEPOSIT_IS_REQUIRED: &str = "exactly 1 yoctoNEAR must be attached";
    pub const BATCH_LOCK_NOT_EXPIRED: &str =
        "batch lock can only be cleared once it has expired";
}

pub mod share_ledger {
    pub const NOT_TOKEN_OWNER: &str = "caller is not the token owner";
    pub const INSUFFICIENT_BALANCE: &str = "transfer amount exceeds balance";
    pub const INSUFFICIENT_ALLOWANCE: &str = "transfer amount exceeds allowance";
    pub const ZERO_RATIO_DENOMINATOR: &str = "ratio cannot be 0";
    pub const ZERO_RATIO_NUMERATOR: &str = "ratio numerator cannot be 0";
    pub const ARITHMETIC_OVERFLOW: &str = "arithmetic overflow";
}

pub mod stake_pool {
    pub const NOT_GOVERNOR: &str = "caller is not the governor";
    pub const AMOUNT_TOO_SMALL: &str = "stake too small";
    pub const NOTHING_PENDING: &str = "nothing to unstake";
    pub const INSUFFICIENT_POOLED_FUNDS: &str = "not enough balance";
    pub const EXTERNAL_VALIDATION_FAILED: &str = "validator registry rejected the deposit";
    pub const INVALID_DEPOSIT_DATA: &str = "invalid deposit data";
    pub const INVALID_INDEX: &str = "invalid index";
    pub const BATCH_IN_PROGRESS: &str =
        "action is blocked because a batch registration is in progress";
}

pub mod governance {
    pub const NOT_AN_ORACLE: &str = "caller is not an oracle";
    pub const NO_SUCH_PROPOSAL: &str = "proposal does not exist";
    pub const NOT_AUTHOR: &str = "caller is not the author";
    pub const AUTHOR_HAS_ACTIVE_PROPOSAL: &str = "oracle has an active proposal";
    pub const INVALID_PROPOSAL_ARGUMENT: &str = "invalid proposal argument";
}

pub mod illegal_argument {
    pub const PROPOSAL_TYPE_OUT_OF_RANGE: &str =
        "ILLEGAL ARGUMENT : proposal type is out of range";
}

pub mod illegal_state {
    pub const BATCH_LOCK_SHOULD_EXIST: &str =
        "ILLEGAL STATE : batch lock should exist while the validator registration is in flight";
    pub const REGISTERED_BATCH_UNDERFUNDED: &str =
        "ILLEGAL STATE : registered batch is not fully funded by the stake queue";
}

pub mod settings {
    pub const FEE_OUT_OF_RANGE: &str = "fee must not exceed 10000 basis points";
    pub const ZERO_FUNDING_UNIT: &str = "funding unit must not be zero";
    pub const INVALID_ORACLE_ID: &str = "oracle account ID must not be longer than 32 bytes";
}
