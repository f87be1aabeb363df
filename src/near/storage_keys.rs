//! This module is used to centralize NEAR SDK Collection IDs to ensure duplicates are not defined
//!
//! Each NEAR SDK persistent collection must be defined with a unique ID, which is used to store the
//! collection in the TRIE. Each of the IDs defined below should only be referenced once within the
//! project.

pub const SHARES_KEY_PREFIX: [u8; 1] = [0];
pub const ALLOWANCES_KEY_PREFIX: [u8; 1] = [1];
pub const STAKE_RECORDS_KEY_PREFIX: [u8; 1] = [2];
pub const STAKE_POSITIONS_KEY_PREFIX: [u8; 1] = [3];
pub const CONTRIBUTIONS_KEY_PREFIX: [u8; 1] = [4];
pub const FUNDING_BATCHES_KEY_PREFIX: [u8; 1] = [5];
pub const ORACLES_KEY_PREFIX: [u8; 1] = [6];
pub const ORACLE_INDEX_KEY_PREFIX: [u8; 1] = [7];
pub const PROPOSALS_KEY_PREFIX: [u8; 1] = [8];
pub const ACTIVE_PROPOSALS_KEY_PREFIX: [u8; 1] = [9];
