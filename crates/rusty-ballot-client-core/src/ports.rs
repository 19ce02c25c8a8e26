use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::Transaction;
use thiserror::Error;

use crate::domain::{AccountData, TokenBalance};

#[derive(Debug, Error)]
pub enum PortError {
    #[error("port not implemented: {0}")]
    NotImplemented(&'static str),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },
}

pub trait ChainPort {
    fn get_account(&self, address: &Pubkey) -> Result<Option<AccountData>, PortError>;
    fn get_balance(&self, address: &Pubkey) -> Result<u64, PortError>;
    fn get_token_balance(&self, token_account: &Pubkey)
        -> Result<Option<TokenBalance>, PortError>;
    fn latest_blockhash(&self) -> Result<Hash, PortError>;
    fn send_transaction(&self, tx: &Transaction) -> Result<Signature, PortError>;
}

pub trait WalletPort {
    fn address(&self) -> Result<Pubkey, PortError>;
    fn sign_transaction(
        &self,
        tx: &mut Transaction,
        recent_blockhash: Hash,
    ) -> Result<(), PortError>;
}

pub trait ClockPort {
    fn unix_now(&self) -> Result<i64, PortError>;
}
