#![allow(dead_code)]

use std::sync::atomic::{AtomicI64, Ordering};

use solana_sdk::pubkey::Pubkey;

use rusty_ballot_client_adapters::{InMemoryLedger, KeypairWallet};
use rusty_ballot_client_core::{
    encode_account, AccountData, ClockPort, DashboardClient, PortError, Proposal,
    ProgramAccount, ProposalCounter, TreasuryConfig, Voter, WalletPort,
};

pub const EPOCH: i64 = 1_758_000_000;

#[derive(Debug, Default)]
pub struct TestClock {
    ticks: AtomicI64,
}

impl ClockPort for TestClock {
    fn unix_now(&self) -> Result<i64, PortError> {
        Ok(self.ticks.fetch_add(1, Ordering::SeqCst) + EPOCH)
    }
}

pub type TestClient = DashboardClient<InMemoryLedger, KeypairWallet, TestClock>;

pub fn new_client() -> (TestClient, InMemoryLedger) {
    let ledger = InMemoryLedger::default();
    let client = DashboardClient::new(
        ledger.clone(),
        KeypairWallet::deterministic(),
        TestClock::default(),
        Pubkey::new_unique(),
    );
    (client, ledger)
}

pub fn wallet_address(client: &TestClient) -> Pubkey {
    client.wallet.address().expect("wallet address")
}

pub fn program_account<T: ProgramAccount>(owner: Pubkey, value: &T) -> AccountData {
    AccountData {
        lamports: 1_461_600,
        owner,
        data: encode_account(value).expect("encode account"),
    }
}

pub fn seed_treasury(
    client: &TestClient,
    ledger: &InMemoryLedger,
    proposal_count: u8,
) -> TreasuryConfig {
    let authority = Pubkey::new_unique();
    let program = &client.program;
    let config = TreasuryConfig {
        authority,
        x_mint: program.x_mint_address(),
        treasury_token_account: program.token_account_for(&authority),
        sol_price: 1_000_000_000,
        tokens_per_purchase: 1_000_000_000,
        bump: 254,
    };
    ledger
        .set_account(
            program.treasury_config_address(),
            program_account(program.program_id, &config),
        )
        .expect("seed treasury config");
    ledger
        .set_account(
            program.proposal_counter_address(),
            program_account(
                program.program_id,
                &ProposalCounter {
                    proposal_count,
                    bump: 255,
                },
            ),
        )
        .expect("seed proposal counter");
    config
}

pub fn seed_proposal(client: &TestClient, ledger: &InMemoryLedger, proposal: &Proposal) {
    let program = &client.program;
    ledger
        .set_account(
            program.proposal_address(proposal.proposal_id),
            program_account(program.program_id, proposal),
        )
        .expect("seed proposal");
}

pub fn seed_voter(client: &TestClient, ledger: &InMemoryLedger, voter: &Voter) {
    let program = &client.program;
    ledger
        .set_account(
            program.voter_address(&voter.voter_id),
            program_account(program.program_id, voter),
        )
        .expect("seed voter");
}

pub fn sample_proposal(proposal_id: u8, deadline: i64) -> Proposal {
    Proposal {
        proposal_id,
        proposal_info: format!("community motion {proposal_id}"),
        number_of_votes: 0,
        deadline,
        authority: Pubkey::new_unique(),
        bump: 250,
    }
}
