use crate::{
    domain::{BasisPoints, PROPOSAL_ARG_LEN},
    errors::{asserts::OPERATOR_ID_MUST_NOT_BE_CONTRACT_ID, settings::*},
    interface,
};
use near_sdk::{
    env,
    json_types::ValidAccountId,
    serde::{Deserialize, Serialize},
    AccountId,
};
use std::{
    convert::TryInto,
    fmt::{self, Display, Formatter},
};

/// Init settings
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(crate = "near_sdk::serde")]
pub struct ContractSettings {
    pub validator_registry_id: ValidAccountId,
    pub operator_id: ValidAccountId,
    /// defaults to the contract account, which is the credential that oracle governance presents
    /// when executing proposals
    pub governor_id: Option<ValidAccountId>,
    /// defaults to the operator
    pub oracles: Option<Vec<ValidAccountId>>,
    /// basis points - defaults to 100 (1%)
    pub fee: Option<u16>,
    /// fixed for the lifetime of the contract - defaults to 32 NEAR
    pub funding_unit: Option<interface::YoctoNear>,
    pub config: Option<interface::Config>,
}

impl ContractSettings {
    pub const DEFAULT_FEE: u16 = 100;
    pub const DEFAULT_FUNDING_UNIT: u128 = 32 * crate::near::YOCTO;

    /// depends on NEAR runtime env
    pub fn new(
        validator_registry_id: AccountId,
        operator_id: AccountId,
    ) -> Result<Self, InvalidContractSettings> {
        let settings = Self {
            validator_registry_id: validator_registry_id
                .try_into()
                .map_err(|_| InvalidContractSettings::InvalidValidatorRegistryId)?,
            operator_id: operator_id
                .try_into()
                .map_err(|_| InvalidContractSettings::InvalidOperatorId)?,
            governor_id: None,
            oracles: None,
            fee: None,
            funding_unit: None,
            config: None,
        };

        match settings.validate() {
            Some(err) => Err(err),
            None => Ok(settings),
        }
    }

    pub fn validate(&self) -> Option<InvalidContractSettings> {
        if env::current_account_id().as_str() == self.operator_id.as_ref().as_str() {
            return Some(InvalidContractSettings::OperatorMustNotBeContract);
        }
        if BasisPoints::new(self.fee() as u32).is_none() {
            return Some(InvalidContractSettings::FeeOutOfRange);
        }
        if self.funding_unit() == 0 {
            return Some(InvalidContractSettings::ZeroFundingUnit);
        }
        // oracle account IDs must fit into a proposal argument
        if let Some(oracle) = self
            .oracles()
            .iter()
            .find(|oracle| oracle.len() > PROPOSAL_ARG_LEN)
        {
            return Some(InvalidContractSettings::InvalidOracleId(oracle.clone()));
        }
        None
    }

    pub fn governor_id(&self) -> AccountId {
        self.governor_id
            .as_ref()
            .map(|id| id.as_ref().clone())
            .unwrap_or_else(env::current_account_id)
    }

    pub fn oracles(&self) -> Vec<AccountId> {
        match self.oracles.as_ref() {
            Some(oracles) => oracles.iter().map(|id| id.as_ref().clone()).collect(),
            None => vec![self.operator_id.as_ref().clone()],
        }
    }

    pub fn fee(&self) -> u16 {
        self.fee.unwrap_or(Self::DEFAULT_FEE)
    }

    pub fn funding_unit(&self) -> u128 {
        self.funding_unit
            .map(|amount| amount.value())
            .unwrap_or(Self::DEFAULT_FUNDING_UNIT)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InvalidContractSettings {
    InvalidValidatorRegistryId,
    InvalidOperatorId,
    OperatorMustNotBeContract,
    FeeOutOfRange,
    ZeroFundingUnit,
    InvalidOracleId(AccountId),
}

impl Display for InvalidContractSettings {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            InvalidContractSettings::OperatorMustNotBeContract => {
                f.write_str(OPERATOR_ID_MUST_NOT_BE_CONTRACT_ID)
            }
            InvalidContractSettings::InvalidOperatorId => write!(f, "invalid operator account ID"),
            InvalidContractSettings::InvalidValidatorRegistryId => {
                write!(f, "invalid validator registry account ID")
            }
            InvalidContractSettings::FeeOutOfRange => f.write_str(FEE_OUT_OF_RANGE),
            InvalidContractSettings::ZeroFundingUnit => f.write_str(ZERO_FUNDING_UNIT),
            InvalidContractSettings::InvalidOracleId(account_id) => {
                write!(f, "{}: {}", INVALID_ORACLE_ID, account_id)
            }
        }
    }
}
