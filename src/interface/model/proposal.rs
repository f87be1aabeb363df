use crate::domain;
use near_sdk::{
    json_types::{Base64VecU8, U64},
    serde::{Deserialize, Serialize},
    AccountId,
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(crate = "near_sdk::serde")]
pub struct Proposal {
    pub id: U64,
    /// 0 = SetYield, 1 = SetFee, 2 = AddOracle, 3 = RemoveOracle
    pub proposal_type: u8,
    pub author: AccountId,
    /// 32 byte argument
    pub arg: Base64VecU8,
    pub voters: Vec<AccountId>,
    pub vote_count: u32,
}

impl From<domain::Proposal> for Proposal {
    fn from(proposal: domain::Proposal) -> Self {
        Self {
            id: proposal.id.into(),
            proposal_type: proposal.proposal_type.into(),
            author: proposal.author.clone(),
            arg: proposal.arg.0.to_vec().into(),
            vote_count: proposal.vote_count() as u32,
            voters: proposal.voters,
        }
    }
}
