use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{write_keypair_file, Keypair, Signer};
use solana_sdk::transaction::Transaction;

use rusty_ballot_client_adapters::{ClientConfig, KeypairWallet, RuntimeProfile};
use rusty_ballot_client_core::{PortError, VoteProgram, WalletPort};

#[test]
fn config_env_overrides_and_defaults() {
    std::env::set_var("RUSTY_BALLOT_RPC_URL", "http://node.example:8899");
    std::env::set_var("RUSTY_BALLOT_COMMITMENT", "confirmed");
    std::env::set_var("RUSTY_BALLOT_PROFILE", "test");
    std::env::set_var("RUSTY_BALLOT_TIMEOUT_MS", "2500");

    let config = ClientConfig::from_env();
    assert_eq!(config.rpc_url, "http://node.example:8899");
    assert_eq!(config.commitment, "confirmed");
    assert_eq!(config.profile, RuntimeProfile::Test);
    assert_eq!(config.request_timeout_ms, 2_500);
    assert!(config.profile.deterministic_wallet_allowed());

    std::env::set_var("RUSTY_BALLOT_TIMEOUT_MS", "not-a-number");
    let config = ClientConfig::from_env();
    assert_eq!(config.request_timeout_ms, 15_000);

    std::env::remove_var("RUSTY_BALLOT_RPC_URL");
    std::env::remove_var("RUSTY_BALLOT_COMMITMENT");
    std::env::remove_var("RUSTY_BALLOT_PROFILE");
    std::env::remove_var("RUSTY_BALLOT_TIMEOUT_MS");

    let config = ClientConfig::from_env();
    assert_eq!(config.rpc_url, "http://127.0.0.1:8899");
    assert_eq!(config.commitment, "processed");
    assert_eq!(config.profile, RuntimeProfile::Production);
    assert!(!config.profile.deterministic_wallet_allowed());
    assert!(config.keypair_path.ends_with(".config/solana/id.json"));
}

#[test]
fn missing_keypair_file_falls_back_by_profile() {
    let config = ClientConfig {
        keypair_path: "/nonexistent/rusty-ballot/id.json".to_owned(),
        profile: RuntimeProfile::Test,
        ..ClientConfig::default()
    };
    let wallet = KeypairWallet::with_config(&config);
    assert_eq!(wallet.describe(), "deterministic test signer");
    assert_eq!(
        wallet.address().expect("fallback address"),
        KeypairWallet::deterministic()
            .address()
            .expect("deterministic address")
    );

    let config = ClientConfig {
        keypair_path: "/nonexistent/rusty-ballot/id.json".to_owned(),
        profile: RuntimeProfile::Production,
        ..ClientConfig::default()
    };
    let wallet = KeypairWallet::with_config(&config);
    let err = wallet.address().expect_err("wallet should be disabled");
    assert!(matches!(err, PortError::Validation(_)));
    assert!(wallet.describe().starts_with("unavailable"));
}

#[test]
fn file_wallet_loads_solana_cli_keypairs() {
    let keypair = Keypair::new();
    let path =
        std::env::temp_dir().join(format!("rusty-ballot-wallet-{}.json", std::process::id()));
    write_keypair_file(&keypair, &path).expect("write keypair file");

    let config = ClientConfig {
        keypair_path: path.to_string_lossy().into_owned(),
        profile: RuntimeProfile::Production,
        ..ClientConfig::default()
    };
    let wallet = KeypairWallet::with_config(&config);
    assert_eq!(wallet.address().expect("address"), keypair.pubkey());
    assert!(wallet.describe().contains("keypair file"));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn deterministic_wallet_signs_for_its_own_address() {
    let wallet = KeypairWallet::deterministic();
    let address = wallet.address().expect("address");

    let program = VoteProgram::new(Pubkey::new_unique());
    let mut tx = Transaction::new_with_payer(&[program.register_voter(&address)], Some(&address));
    wallet
        .sign_transaction(&mut tx, Hash::new_from_array([1; 32]))
        .expect("sign transaction");

    assert!(tx.is_signed());
    tx.verify().expect("signature verifies");
}
