use crate::interface::{Gas, YoctoNear};
use near_sdk::{
    json_types::U64,
    serde::{Deserialize, Serialize},
};

/// All properties are optional - only the properties that are specified are changed when the
/// config is updated.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(crate = "near_sdk::serde")]
pub struct Config {
    pub min_stake: Option<YoctoNear>,
    pub gas_config: Option<GasConfig>,
    /// number of blocks after which the operator may clear a batch lock
    pub batch_lock_timeout: Option<U64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(crate = "near_sdk::serde")]
pub struct GasConfig {
    pub register_validator: Option<Gas>,
    pub on_register_validator: Option<Gas>,
}
