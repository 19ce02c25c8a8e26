use borsh::{BorshDeserialize, BorshSerialize};
use sha2::{Digest, Sha256};
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;
use solana_system_interface::program::ID as SYSTEM_PROGRAM_ID;
use spl_associated_token_account::get_associated_token_address;
use thiserror::Error;

use crate::domain::{Proposal, ProposalCounter, TreasuryConfig, Voter};

pub const TOKEN_PROGRAM_ID: Pubkey = spl_token::ID;
pub const ASSOCIATED_TOKEN_PROGRAM_ID: Pubkey = spl_associated_token_account::ID;

pub const TREASURY_CONFIG_SEED: &[u8] = b"treasury_config";
pub const X_MINT_SEED: &[u8] = b"x_mint";
pub const MINT_AUTHORITY_SEED: &[u8] = b"mint_authority";
pub const SOL_VAULT_SEED: &[u8] = b"sol_vault";
pub const PROPOSAL_COUNTER_SEED: &[u8] = b"proposal_counter";
pub const PROPOSAL_SEED: &[u8] = b"proposal";
pub const VOTER_SEED: &[u8] = b"voter";

fn sighash(namespace: &str, name: &str) -> [u8; 8] {
    let mut hasher = Sha256::new();
    hasher.update(namespace.as_bytes());
    hasher.update(b":");
    hasher.update(name.as_bytes());
    let digest = hasher.finalize();
    let mut out = [0u8; 8];
    out.copy_from_slice(&digest[..8]);
    out
}

pub fn method_discriminator(method: &str) -> [u8; 8] {
    sighash("global", method)
}

pub fn account_discriminator(account: &str) -> [u8; 8] {
    sighash("account", account)
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("account data too short for {0}")]
    TooShort(&'static str),
    #[error("account discriminator mismatch for {0}")]
    BadDiscriminator(&'static str),
    #[error("malformed {kind} account data: {source}")]
    Body {
        kind: &'static str,
        #[source]
        source: borsh::io::Error,
    },
}

pub trait ProgramAccount: BorshSerialize + BorshDeserialize {
    const NAME: &'static str;
}

impl ProgramAccount for TreasuryConfig {
    const NAME: &'static str = "TreasuryConfig";
}

impl ProgramAccount for ProposalCounter {
    const NAME: &'static str = "ProposalCounter";
}

impl ProgramAccount for Proposal {
    const NAME: &'static str = "Proposal";
}

impl ProgramAccount for Voter {
    const NAME: &'static str = "Voter";
}

// Account data keeps whatever zero padding the on-chain allocation left
// after the borsh body, so decoding must not require full consumption.
pub fn decode_account<T: ProgramAccount>(data: &[u8]) -> Result<T, CodecError> {
    if data.len() < 8 {
        return Err(CodecError::TooShort(T::NAME));
    }
    if data[..8] != account_discriminator(T::NAME) {
        return Err(CodecError::BadDiscriminator(T::NAME));
    }
    let mut body = &data[8..];
    T::deserialize(&mut body).map_err(|source| CodecError::Body {
        kind: T::NAME,
        source,
    })
}

pub fn encode_account<T: ProgramAccount>(value: &T) -> Result<Vec<u8>, CodecError> {
    let mut data = account_discriminator(T::NAME).to_vec();
    value
        .serialize(&mut data)
        .map_err(|source| CodecError::Body {
            kind: T::NAME,
            source,
        })?;
    Ok(data)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteProgram {
    pub program_id: Pubkey,
}

impl VoteProgram {
    pub fn new(program_id: Pubkey) -> Self {
        Self { program_id }
    }

    pub fn treasury_config_address(&self) -> Pubkey {
        Pubkey::find_program_address(&[TREASURY_CONFIG_SEED], &self.program_id).0
    }

    pub fn x_mint_address(&self) -> Pubkey {
        Pubkey::find_program_address(&[X_MINT_SEED], &self.program_id).0
    }

    pub fn mint_authority_address(&self) -> Pubkey {
        Pubkey::find_program_address(&[MINT_AUTHORITY_SEED], &self.program_id).0
    }

    pub fn sol_vault_address(&self) -> Pubkey {
        Pubkey::find_program_address(&[SOL_VAULT_SEED], &self.program_id).0
    }

    pub fn proposal_counter_address(&self) -> Pubkey {
        Pubkey::find_program_address(&[PROPOSAL_COUNTER_SEED], &self.program_id).0
    }

    pub fn proposal_address(&self, proposal_id: u8) -> Pubkey {
        Pubkey::find_program_address(&[PROPOSAL_SEED, &[proposal_id]], &self.program_id).0
    }

    pub fn voter_address(&self, voter: &Pubkey) -> Pubkey {
        Pubkey::find_program_address(&[VOTER_SEED, voter.as_ref()], &self.program_id).0
    }

    /// Associated token account of `owner` for the governance mint.
    pub fn token_account_for(&self, owner: &Pubkey) -> Pubkey {
        get_associated_token_address(owner, &self.x_mint_address())
    }

    pub fn initialize_treasury(
        &self,
        authority: &Pubkey,
        sol_price: u64,
        tokens_per_purchase: u64,
    ) -> Instruction {
        let mut data = method_discriminator("initialize_treasury").to_vec();
        data.extend_from_slice(&sol_price.to_le_bytes());
        data.extend_from_slice(&tokens_per_purchase.to_le_bytes());
        Instruction {
            program_id: self.program_id,
            accounts: vec![
                AccountMeta::new(*authority, true),
                AccountMeta::new(self.treasury_config_address(), false),
                AccountMeta::new(self.x_mint_address(), false),
                AccountMeta::new(self.token_account_for(authority), false),
                AccountMeta::new(self.sol_vault_address(), false),
                AccountMeta::new_readonly(self.mint_authority_address(), false),
                AccountMeta::new(self.proposal_counter_address(), false),
                AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
                AccountMeta::new_readonly(ASSOCIATED_TOKEN_PROGRAM_ID, false),
                AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
            ],
            data,
        }
    }

    pub fn buy_tokens(&self, buyer: &Pubkey, treasury_token_account: &Pubkey) -> Instruction {
        Instruction {
            program_id: self.program_id,
            accounts: vec![
                AccountMeta::new_readonly(self.treasury_config_address(), false),
                AccountMeta::new(self.sol_vault_address(), false),
                AccountMeta::new(*treasury_token_account, false),
                AccountMeta::new_readonly(self.x_mint_address(), false),
                AccountMeta::new(self.token_account_for(buyer), false),
                AccountMeta::new_readonly(self.mint_authority_address(), false),
                AccountMeta::new(*buyer, true),
                AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
                AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
            ],
            data: method_discriminator("buy_tokens").to_vec(),
        }
    }

    pub fn register_voter(&self, signer: &Pubkey) -> Instruction {
        Instruction {
            program_id: self.program_id,
            accounts: vec![
                AccountMeta::new(*signer, true),
                AccountMeta::new(self.voter_address(signer), false),
                AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
            ],
            data: method_discriminator("register_voter").to_vec(),
        }
    }

    /// `proposal_count` is the counter value before this registration; it
    /// seeds the new proposal's address.
    pub fn register_proposal(
        &self,
        signer: &Pubkey,
        proposal_count: u8,
        treasury_token_account: &Pubkey,
        description: &str,
        deadline: i64,
        token_stake: u64,
    ) -> Instruction {
        let mut data = method_discriminator("register_proposal").to_vec();
        data.extend_from_slice(&(description.len() as u32).to_le_bytes());
        data.extend_from_slice(description.as_bytes());
        data.extend_from_slice(&deadline.to_le_bytes());
        data.extend_from_slice(&token_stake.to_le_bytes());
        Instruction {
            program_id: self.program_id,
            accounts: vec![
                AccountMeta::new(self.proposal_counter_address(), false),
                AccountMeta::new(*signer, true),
                AccountMeta::new(self.proposal_address(proposal_count), false),
                AccountMeta::new_readonly(self.x_mint_address(), false),
                AccountMeta::new(self.token_account_for(signer), false),
                AccountMeta::new(*treasury_token_account, false),
                AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
                AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
            ],
            data,
        }
    }

    pub fn proposal_to_vote(
        &self,
        signer: &Pubkey,
        proposal_id: u8,
        treasury_token_account: &Pubkey,
        token_stake: u64,
    ) -> Instruction {
        let mut data = method_discriminator("proposal_to_vote").to_vec();
        data.push(proposal_id);
        data.extend_from_slice(&token_stake.to_le_bytes());
        Instruction {
            program_id: self.program_id,
            accounts: vec![
                AccountMeta::new_readonly(self.proposal_counter_address(), false),
                AccountMeta::new(self.proposal_address(proposal_id), false),
                AccountMeta::new(*signer, true),
                AccountMeta::new(self.voter_address(signer), false),
                AccountMeta::new_readonly(self.x_mint_address(), false),
                AccountMeta::new(self.token_account_for(signer), false),
                AccountMeta::new(*treasury_token_account, false),
                AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            ],
            data,
        }
    }

    pub fn pick_winner(&self, signer: &Pubkey, proposal_id: u8) -> Instruction {
        let mut data = method_discriminator("pick_winner").to_vec();
        data.push(proposal_id);
        Instruction {
            program_id: self.program_id,
            accounts: vec![
                AccountMeta::new(self.proposal_address(proposal_id), false),
                AccountMeta::new_readonly(*signer, true),
            ],
            data,
        }
    }

    pub fn close_proposal(
        &self,
        signer: &Pubkey,
        destination: &Pubkey,
        proposal_id: u8,
    ) -> Instruction {
        let mut data = method_discriminator("close_proposal").to_vec();
        data.push(proposal_id);
        Instruction {
            program_id: self.program_id,
            accounts: vec![
                AccountMeta::new(self.proposal_address(proposal_id), false),
                AccountMeta::new(*destination, false),
                AccountMeta::new_readonly(*signer, true),
            ],
            data,
        }
    }

    pub fn close_voter(&self, signer: &Pubkey) -> Instruction {
        Instruction {
            program_id: self.program_id,
            accounts: vec![
                AccountMeta::new(self.voter_address(signer), false),
                AccountMeta::new(*signer, true),
            ],
            data: method_discriminator("close_voter").to_vec(),
        }
    }

    pub fn withdraw_sol(&self, authority: &Pubkey, amount: u64) -> Instruction {
        let mut data = method_discriminator("withdraw_sol").to_vec();
        data.extend_from_slice(&amount.to_le_bytes());
        Instruction {
            program_id: self.program_id,
            accounts: vec![
                AccountMeta::new_readonly(self.treasury_config_address(), false),
                AccountMeta::new(self.sol_vault_address(), false),
                AccountMeta::new(*authority, true),
                AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
            ],
            data,
        }
    }

    /// Associated token account creation for the governance mint, prepended
    /// to a purchase when the buyer has no token account yet.
    pub fn create_token_account(&self, funder: &Pubkey, owner: &Pubkey) -> Instruction {
        let x_mint = self.x_mint_address();
        Instruction {
            program_id: ASSOCIATED_TOKEN_PROGRAM_ID,
            accounts: vec![
                AccountMeta::new(*funder, true),
                AccountMeta::new(get_associated_token_address(owner, &x_mint), false),
                AccountMeta::new_readonly(*owner, false),
                AccountMeta::new_readonly(x_mint, false),
                AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
                AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            ],
            data: vec![0],
        }
    }
}
