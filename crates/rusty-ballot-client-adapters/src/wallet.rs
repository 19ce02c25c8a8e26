use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{keypair_from_seed, read_keypair_file, Keypair, Signer};
use solana_sdk::transaction::Transaction;

use rusty_ballot_client_core::{PortError, WalletPort};

use crate::ClientConfig;

pub struct KeypairWallet {
    mode: WalletMode,
}

enum WalletMode {
    Disabled(String),
    Deterministic(Keypair),
    File { keypair: Keypair, path: String },
}

impl KeypairWallet {
    pub fn with_config(config: &ClientConfig) -> Self {
        let mode = match read_keypair_file(&config.keypair_path) {
            Ok(keypair) => WalletMode::File {
                keypair,
                path: config.keypair_path.clone(),
            },
            Err(e) => {
                if config.profile.deterministic_wallet_allowed() {
                    WalletMode::Deterministic(deterministic_keypair())
                } else {
                    WalletMode::Disabled(format!(
                        "keypair file {} unavailable: {e}",
                        config.keypair_path
                    ))
                }
            }
        };
        Self { mode }
    }

    pub fn deterministic() -> Self {
        Self {
            mode: WalletMode::Deterministic(deterministic_keypair()),
        }
    }

    pub fn describe(&self) -> String {
        match &self.mode {
            WalletMode::Disabled(reason) => format!("unavailable: {reason}"),
            WalletMode::Deterministic(_) => "deterministic test signer".to_owned(),
            WalletMode::File { path, .. } => format!("keypair file {path}"),
        }
    }

    fn keypair(&self) -> Result<&Keypair, PortError> {
        match &self.mode {
            WalletMode::Disabled(reason) => Err(PortError::Validation(reason.clone())),
            WalletMode::Deterministic(keypair) => Ok(keypair),
            WalletMode::File { keypair, .. } => Ok(keypair),
        }
    }
}

impl WalletPort for KeypairWallet {
    fn address(&self) -> Result<Pubkey, PortError> {
        Ok(self.keypair()?.pubkey())
    }

    fn sign_transaction(
        &self,
        tx: &mut Transaction,
        recent_blockhash: Hash,
    ) -> Result<(), PortError> {
        let keypair = self.keypair()?;
        tx.try_sign(&[keypair], recent_blockhash)
            .map_err(|e| PortError::Validation(format!("signing failed: {e}")))
    }
}

fn deterministic_keypair() -> Keypair {
    keypair_from_seed(&[0x42; 32]).expect("valid built-in deterministic seed")
}
