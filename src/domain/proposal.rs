use crate::domain::{Error, Result};
use crate::errors::illegal_argument::PROPOSAL_TYPE_OUT_OF_RANGE;
use near_sdk::{
    borsh::{self, BorshDeserialize, BorshSerialize},
    env, AccountId,
};
use std::convert::TryFrom;
use std::fmt::{self, Display, Formatter};

/// sequential proposal ID, starting from 1
pub type ProposalId = u64;

pub const PROPOSAL_ARG_LEN: usize = 32;

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProposalType {
    SetYield,
    SetFee,
    AddOracle,
    RemoveOracle,
}

impl TryFrom<u8> for ProposalType {
    type Error = ProposalTypeOutOfRange;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::SetYield),
            1 => Ok(Self::SetFee),
            2 => Ok(Self::AddOracle),
            3 => Ok(Self::RemoveOracle),
            _ => Err(ProposalTypeOutOfRange(value)),
        }
    }
}

impl From<ProposalType> for u8 {
    fn from(value: ProposalType) -> Self {
        value as u8
    }
}

/// Unlike [Error], this signals a caller bug and is not a business rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProposalTypeOutOfRange(pub u8);

impl Display for ProposalTypeOutOfRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", PROPOSAL_TYPE_OUT_OF_RANGE, self.0)
    }
}

impl std::error::Error for ProposalTypeOutOfRange {}

/// Fixed width proposal argument.
///
/// - integers are big-endian and right aligned
/// - account IDs are right aligned with zero left padding
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProposalArg(pub [u8; PROPOSAL_ARG_LEN]);

impl ProposalArg {
    pub fn from_u128(value: u128) -> Self {
        let mut arg = [0; PROPOSAL_ARG_LEN];
        arg[16..].copy_from_slice(&value.to_be_bytes());
        Self(arg)
    }

    /// returns None if the account ID does not fit
    pub fn from_account_id(account_id: &str) -> Option<Self> {
        let bytes = account_id.as_bytes();
        if bytes.len() > PROPOSAL_ARG_LEN {
            return None;
        }
        let mut arg = [0; PROPOSAL_ARG_LEN];
        arg[PROPOSAL_ARG_LEN - bytes.len()..].copy_from_slice(bytes);
        Some(Self(arg))
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != PROPOSAL_ARG_LEN {
            return Err(Error::InvalidProposalArgument);
        }
        let mut arg = [0; PROPOSAL_ARG_LEN];
        arg.copy_from_slice(bytes);
        Ok(Self(arg))
    }

    /// fails if the value does not fit into a u128
    pub fn to_u128(&self) -> Result<u128> {
        if self.0[..16].iter().any(|b| *b != 0) {
            return Err(Error::InvalidProposalArgument);
        }
        let mut bytes = [0; 16];
        bytes.copy_from_slice(&self.0[16..]);
        Ok(u128::from_be_bytes(bytes))
    }

    /// fails if the trimmed bytes are not a valid account ID
    pub fn to_account_id(&self) -> Result<AccountId> {
        let start = self
            .0
            .iter()
            .position(|b| *b != 0)
            .ok_or(Error::InvalidProposalArgument)?;
        let account_id = std::str::from_utf8(&self.0[start..])
            .map_err(|_| Error::InvalidProposalArgument)?
            .to_string();
        if env::is_valid_account_id(account_id.as_bytes()) {
            Ok(account_id)
        } else {
            Err(Error::InvalidProposalArgument)
        }
    }
}

/// Decoded proposal argument
#[derive(Debug, Clone, PartialEq)]
pub enum ProposalAction {
    SetYield(u128),
    SetFee(u128),
    AddOracle(AccountId),
    RemoveOracle(AccountId),
}

impl ProposalAction {
    pub fn decode(proposal_type: ProposalType, arg: &ProposalArg) -> Result<Self> {
        let action = match proposal_type {
            ProposalType::SetYield => Self::SetYield(arg.to_u128()?),
            ProposalType::SetFee => Self::SetFee(arg.to_u128()?),
            ProposalType::AddOracle => Self::AddOracle(arg.to_account_id()?),
            ProposalType::RemoveOracle => Self::RemoveOracle(arg.to_account_id()?),
        };
        Ok(action)
    }
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub struct Proposal {
    pub id: ProposalId,
    pub proposal_type: ProposalType,
    pub author: AccountId,
    pub arg: ProposalArg,
    /// distinct voters - the author's vote is counted at creation
    pub voters: Vec<AccountId>,
}

impl Proposal {
    pub fn vote_count(&self) -> usize {
        self.voters.len()
    }

    pub fn has_voted(&self, account_id: &AccountId) -> bool {
        self.voters.contains(account_id)
    }

    /// returns false if the account has already voted
    pub fn add_vote(&mut self, account_id: &AccountId) -> bool {
        if self.has_voted(account_id) {
            false
        } else {
            self.voters.push(account_id.clone());
            true
        }
    }

    /// strict majority of the current oracle count
    pub fn has_quorum(&self, oracle_count: u64) -> bool {
        self.vote_count() as u64 * 2 > oracle_count
    }
}
