use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::Transaction;

use rusty_ballot_client_core::interface::TOKEN_PROGRAM_ID;
use rusty_ballot_client_core::{AccountData, ChainPort, PortError, TokenBalance};

const SPL_TOKEN_ACCOUNT_LEN: usize = 165;

#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    state: Arc<Mutex<LedgerState>>,
}

#[derive(Debug, Default)]
struct LedgerState {
    accounts: HashMap<Pubkey, AccountData>,
    token_balances: HashMap<Pubkey, TokenBalance>,
    sent: Vec<Transaction>,
}

impl InMemoryLedger {
    pub fn blockhash() -> Hash {
        Hash::new_from_array([7; 32])
    }

    pub fn set_account(&self, address: Pubkey, account: AccountData) -> Result<(), PortError> {
        let mut g = self.guard()?;
        g.accounts.insert(address, account);
        Ok(())
    }

    pub fn remove_account(&self, address: &Pubkey) -> Result<(), PortError> {
        let mut g = self.guard()?;
        g.accounts.remove(address);
        g.token_balances.remove(address);
        Ok(())
    }

    pub fn set_token_account(
        &self,
        address: Pubkey,
        amount: u64,
        decimals: u8,
    ) -> Result<(), PortError> {
        let mut g = self.guard()?;
        g.accounts.insert(
            address,
            AccountData {
                lamports: 2_039_280,
                owner: TOKEN_PROGRAM_ID,
                data: vec![0; SPL_TOKEN_ACCOUNT_LEN],
            },
        );
        g.token_balances.insert(address, TokenBalance { amount, decimals });
        Ok(())
    }

    pub fn set_lamports(&self, address: Pubkey, lamports: u64) -> Result<(), PortError> {
        let mut g = self.guard()?;
        g.accounts
            .entry(address)
            .and_modify(|account| account.lamports = lamports)
            .or_insert(AccountData {
                lamports,
                owner: Pubkey::default(),
                data: Vec::new(),
            });
        Ok(())
    }

    pub fn sent_transactions(&self) -> Result<Vec<Transaction>, PortError> {
        let g = self.guard()?;
        Ok(g.sent.clone())
    }

    fn guard(&self) -> Result<MutexGuard<'_, LedgerState>, PortError> {
        self.state
            .lock()
            .map_err(|e| PortError::Transport(format!("ledger lock poisoned: {e}")))
    }
}

impl ChainPort for InMemoryLedger {
    fn get_account(&self, address: &Pubkey) -> Result<Option<AccountData>, PortError> {
        let g = self.guard()?;
        Ok(g.accounts.get(address).cloned())
    }

    fn get_balance(&self, address: &Pubkey) -> Result<u64, PortError> {
        let g = self.guard()?;
        Ok(g.accounts.get(address).map(|a| a.lamports).unwrap_or(0))
    }

    fn get_token_balance(&self, token_account: &Pubkey) -> Result<Option<TokenBalance>, PortError> {
        let g = self.guard()?;
        Ok(g.token_balances.get(token_account).cloned())
    }

    fn latest_blockhash(&self) -> Result<Hash, PortError> {
        Ok(Self::blockhash())
    }

    fn send_transaction(&self, tx: &Transaction) -> Result<Signature, PortError> {
        let mut g = self.guard()?;
        g.sent.push(tx.clone());
        let seq = g.sent.len() as u8;
        Ok(Signature::from([seq; 64]))
    }
}
