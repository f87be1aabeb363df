use crate::domain::{Gas, YoctoNear};
use crate::interface;
use crate::near::YOCTO;
use near_sdk::borsh::{self, BorshDeserialize, BorshSerialize};

/// Operational config, which the operator may change at any time.
///
/// NOTE: the funding unit is not part of the config because it is fixed for the lifetime of the
/// contract.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// minimum amount that can be staked
    min_stake: YoctoNear,
    gas_config: GasConfig,
    /// number of blocks a batch lock must be held before the operator can clear it
    batch_lock_timeout: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // 0.1 NEAR
            min_stake: (YOCTO / 10).into(),
            gas_config: GasConfig::default(),
            batch_lock_timeout: 100,
        }
    }
}

impl Config {
    pub fn min_stake(&self) -> YoctoNear {
        self.min_stake
    }

    pub fn gas_config(&self) -> GasConfig {
        self.gas_config
    }

    pub fn batch_lock_timeout(&self) -> u64 {
        self.batch_lock_timeout
    }

    /// only the specified values are applied
    pub fn merge(&mut self, config: interface::Config) {
        if let Some(min_stake) = config.min_stake {
            self.min_stake = min_stake.value().into();
        }
        if let Some(gas_config) = config.gas_config {
            self.gas_config.merge(gas_config);
        }
        if let Some(timeout) = config.batch_lock_timeout {
            self.batch_lock_timeout = timeout.0;
        }
    }
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq)]
pub struct GasConfig {
    /// gas attached to the validator registry `register` func call
    register_validator: Gas,
    /// gas attached to the `on_register_validator` callback
    on_register_validator: Gas,
}

impl Default for GasConfig {
    fn default() -> Self {
        Self {
            register_validator: Gas::tgas(25),
            on_register_validator: Gas::tgas(50),
        }
    }
}

impl GasConfig {
    pub fn register_validator(&self) -> Gas {
        self.register_validator
    }

    pub fn on_register_validator(&self) -> Gas {
        self.on_register_validator
    }

    pub fn merge(&mut self, config: interface::GasConfig) {
        if let Some(gas) = config.register_validator {
            self.register_validator = gas.value().into();
        }
        if let Some(gas) = config.on_register_validator {
            self.on_register_validator = gas.value().into();
        }
    }
}

impl From<Config> for interface::Config {
    fn from(config: Config) -> Self {
        Self {
            min_stake: Some(config.min_stake.into()),
            gas_config: Some(config.gas_config.into()),
            batch_lock_timeout: Some(config.batch_lock_timeout.into()),
        }
    }
}

impl From<GasConfig> for interface::GasConfig {
    fn from(config: GasConfig) -> Self {
        Self {
            register_validator: Some(config.register_validator.into()),
            on_register_validator: Some(config.on_register_validator.into()),
        }
    }
}
