use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct TreasuryConfig {
    pub authority: Pubkey,
    pub x_mint: Pubkey,
    pub treasury_token_account: Pubkey,
    pub sol_price: u64,
    pub tokens_per_purchase: u64,
    pub bump: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct ProposalCounter {
    pub proposal_count: u8,
    pub bump: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct Proposal {
    pub proposal_id: u8,
    pub proposal_info: String,
    pub number_of_votes: u64,
    pub deadline: i64,
    pub authority: Pubkey,
    pub bump: u8,
}

impl Proposal {
    pub fn is_active(&self, now_unix: i64) -> bool {
        self.deadline > now_unix
    }
}

// proposal_voted keeps 0 as the unvoted sentinel; voted ids are stored
// offset by one.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct Voter {
    pub voter_id: Pubkey,
    pub proposal_voted: u8,
    pub bump: u8,
}

impl Voter {
    pub fn has_voted(&self) -> bool {
        self.proposal_voted != 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountData {
    pub lamports: u64,
    pub owner: Pubkey,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBalance {
    pub amount: u64,
    pub decimals: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreasuryOverview {
    pub treasury_config_address: Pubkey,
    pub sol_vault_address: Pubkey,
    pub sol_vault_lamports: u64,
    pub config: Option<TreasuryConfig>,
}

impl TreasuryOverview {
    pub fn is_initialized(&self) -> bool {
        self.config.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBalanceView {
    pub token_account: Pubkey,
    pub amount: u64,
    pub decimals: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoterStatus {
    Registered(Voter),
    NotRegistered,
}

impl VoterStatus {
    pub fn is_registered(&self) -> bool {
        matches!(self, VoterStatus::Registered(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalSummary {
    pub address: Pubkey,
    pub proposal: Proposal,
    pub active: bool,
}
