//! Application state types
//!
//! Per-panel UI state structs plus the input parsers the forms run
//! before handing values to the dashboard client.

use std::collections::HashMap;

use rusty_ballot_client_core::domain::{
    ProposalSummary, TokenBalanceView, TreasuryOverview, VoterStatus,
};
use rusty_ballot_client_core::units;

/// Top-level dashboard pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Proposals,
    Tokens,
    Voter,
    Governance,
    Treasury,
}

impl Page {
    pub fn title(&self) -> &'static str {
        match self {
            Page::Proposals => "🗳 Proposals",
            Page::Tokens => "💰 Tokens",
            Page::Voter => "👤 Voter",
            Page::Governance => "📝 Governance",
            Page::Treasury => "🏦 Treasury",
        }
    }
}

/// Proposal list filter tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProposalFilter {
    Active,
    Ended,
    All,
}

/// Sidebar UI state
#[derive(Debug)]
pub struct SidebarState {
    pub collapsed: bool,
    /// Airdrop amount in SOL (localnet and devnet only)
    pub airdrop_sol: String,
    pub airdrop_loading: bool,
    pub airdrop_result: Option<Result<String, String>>,
}

impl Default for SidebarState {
    fn default() -> Self {
        Self {
            collapsed: false,
            airdrop_sol: "1".to_string(),
            airdrop_loading: false,
            airdrop_result: None,
        }
    }
}

/// Proposal board UI state
#[derive(Debug)]
pub struct ProposalsState {
    pub filter: ProposalFilter,
    /// Per-proposal stake input, keyed by proposal id
    pub vote_stakes: HashMap<u8, String>,
    pub lookup_id: String,
    pub summaries: Vec<ProposalSummary>,
    pub fetched: bool,
    pub looked_up: Option<ProposalSummary>,
    pub error: Option<String>,
    pub is_loading: bool,
}

impl Default for ProposalsState {
    fn default() -> Self {
        Self {
            filter: ProposalFilter::Active,
            vote_stakes: HashMap::new(),
            lookup_id: String::new(),
            summaries: Vec::new(),
            fetched: false,
            looked_up: None,
            error: None,
            is_loading: false,
        }
    }
}

impl ProposalsState {
    pub fn stake_input(&mut self, proposal_id: u8) -> &mut String {
        self.vote_stakes
            .entry(proposal_id)
            .or_insert_with(|| "1".to_string())
    }

    pub fn clear_results(&mut self) {
        self.looked_up = None;
        self.error = None;
    }
}

/// Wallet balances shown in the sidebar and tokens panel
#[derive(Debug, Default)]
pub struct WalletState {
    pub sol_lamports: Option<u64>,
    pub token: Option<TokenBalanceView>,
    pub error: Option<String>,
    pub is_loading: bool,
}

/// Voter account panel state
#[derive(Debug, Default)]
pub struct VoterState {
    pub status: Option<VoterStatus>,
    pub error: Option<String>,
    pub is_loading: bool,
}

/// Governance panel inputs (proposal registration and lifecycle calls)
#[derive(Debug)]
pub struct GovernanceState {
    pub description: String,
    /// UTC deadline in `YYYY-MM-DD HH:MM` form
    pub deadline: String,
    pub stake: String,
    pub winner_id: String,
    pub close_id: String,
    pub error: Option<String>,
}

impl Default for GovernanceState {
    fn default() -> Self {
        Self {
            description: String::new(),
            deadline: String::new(),
            stake: "1".to_string(),
            winner_id: String::new(),
            close_id: String::new(),
            error: None,
        }
    }
}

/// Treasury panel state (overview plus admin inputs)
#[derive(Debug)]
pub struct TreasuryState {
    pub sol_price: String,
    pub tokens_per_purchase: String,
    pub withdraw_sol: String,
    pub overview: Option<TreasuryOverview>,
    pub error: Option<String>,
    pub is_loading: bool,
}

impl Default for TreasuryState {
    fn default() -> Self {
        Self {
            sol_price: "1".to_string(),
            tokens_per_purchase: "1000".to_string(),
            withdraw_sol: String::new(),
            overview: None,
            error: None,
            is_loading: false,
        }
    }
}

/// Outcome of the most recent submitted transaction
#[derive(Debug, Clone)]
pub struct ActionOutcome {
    pub label: String,
    /// Base58 signature on success, message on failure
    pub result: Result<String, String>,
}

/// Transaction submission tracking shared by all panels
#[derive(Debug, Default)]
pub struct ActionState {
    pub in_flight: Option<String>,
    pub last: Option<ActionOutcome>,
}

impl ActionState {
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }
}

// =============================================================================
// INPUT PARSING
// =============================================================================

/// Parse a SOL amount entered as a decimal string into lamports
pub fn parse_sol_amount(input: &str) -> Result<u64, String> {
    let trimmed = input.trim();
    let sol: f64 = trimmed
        .parse()
        .map_err(|_| format!("'{}' is not a SOL amount", trimmed))?;
    if !sol.is_finite() || sol < 0.0 {
        return Err(format!("'{}' is not a SOL amount", trimmed));
    }
    Ok(units::sol_to_lamports(sol))
}

/// Parse a token amount entered as a decimal string into raw units
pub fn parse_token_amount(input: &str) -> Result<u64, String> {
    let trimmed = input.trim();
    let tokens: f64 = trimmed
        .parse()
        .map_err(|_| format!("'{}' is not a token amount", trimmed))?;
    if !tokens.is_finite() || tokens < 0.0 {
        return Err(format!("'{}' is not a token amount", trimmed));
    }
    Ok(units::tokens_to_raw(tokens))
}

/// Parse a proposal id (the program caps ids at u8)
pub fn parse_proposal_id(input: &str) -> Result<u8, String> {
    let trimmed = input.trim();
    trimmed
        .parse()
        .map_err(|_| format!("'{}' is not a proposal id (0-255)", trimmed))
}

/// Parse a `YYYY-MM-DD HH:MM` UTC deadline into a unix timestamp
pub fn parse_deadline_utc(input: &str) -> Result<i64, String> {
    let trimmed = input.trim();
    chrono::NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M")
        .map(|dt| dt.and_utc().timestamp())
        .map_err(|_| format!("'{}' is not a UTC deadline like 2026-09-01 18:00", trimmed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sol_amounts_parse_to_lamports() {
        assert_eq!(parse_sol_amount("1"), Ok(1_000_000_000));
        assert_eq!(parse_sol_amount(" 2.5 "), Ok(2_500_000_000));
        assert!(parse_sol_amount("abc").is_err());
        assert!(parse_sol_amount("-1").is_err());
        assert!(parse_sol_amount("").is_err());
    }

    #[test]
    fn token_amounts_parse_to_raw_units() {
        assert_eq!(parse_token_amount("1"), Ok(1_000_000));
        assert_eq!(parse_token_amount("0.5"), Ok(500_000));
        assert!(parse_token_amount("lots").is_err());
    }

    #[test]
    fn proposal_ids_stay_within_u8() {
        assert_eq!(parse_proposal_id("0"), Ok(0));
        assert_eq!(parse_proposal_id("255"), Ok(255));
        assert!(parse_proposal_id("256").is_err());
        assert!(parse_proposal_id("first").is_err());
    }

    #[test]
    fn deadlines_parse_as_utc() {
        // 2026-01-01 00:00 UTC
        assert_eq!(parse_deadline_utc("2026-01-01 00:00"), Ok(1_767_225_600));
        assert!(parse_deadline_utc("2026-01-01").is_err());
        assert!(parse_deadline_utc("tomorrow").is_err());
    }

    #[test]
    fn stake_inputs_default_per_proposal() {
        let mut state = ProposalsState::default();
        assert_eq!(state.stake_input(3), "1");
        *state.stake_input(3) = "25".to_string();
        assert_eq!(state.stake_input(3), "25");
        assert_eq!(state.stake_input(4), "1");
    }
}
