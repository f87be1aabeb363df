pub mod storage_keys;

use crate::domain::{self, YoctoNear};
use near_sdk::{env, PromiseResult};
use std::fmt::Debug;

/// YOCTO = 10^24
pub const YOCTO: u128 = 1_000_000_000_000_000_000_000_000;

/// Used to indicate that no deposit is being attached to a cross contract func call
pub const NO_DEPOSIT: YoctoNear = YoctoNear(0);

/// wrapper around `near_sdk::env::log()` which supports structured logging
pub fn log<T: Debug>(event: T) {
    env::log(format!("{:#?}", event).as_bytes());
}

/// returns true if the single upstream promise that the current callback depends on succeeded
pub fn is_promise_success() -> bool {
    env::promise_results_count() == 1
        && matches!(env::promise_result(0), PromiseResult::Successful(_))
}

/// Unwraps the domain result at the contract boundary.
///
/// ## Panics
/// with the error's stable message if the domain rejected the request - on NEAR, this reverts all
/// state changes and logs made by the call
pub fn unwrap_or_panic<T>(result: domain::Result<T>) -> T {
    result.unwrap_or_else(|err| env::panic(err.to_string().as_bytes()))
}
