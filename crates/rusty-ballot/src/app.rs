//! Main application state and update loop

use std::str::FromStr;
use std::sync::{Arc, Mutex};

use eframe::egui;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;

use rusty_ballot_client_adapters::{ClientConfig, HttpRpcGateway, KeypairWallet, SystemClock};
use rusty_ballot_client_core::domain::{
    ProposalSummary, TokenBalanceView, TreasuryOverview, VoterStatus,
};
use rusty_ballot_client_core::flows::DashboardClient;
use rusty_ballot_client_core::ports::{ChainPort, PortError, WalletPort};
use rusty_ballot_client_core::units::TOKEN_DECIMALS;

use crate::api;
use crate::sidebar::{self, SidebarAction};
use crate::state::{
    ActionOutcome, ActionState, GovernanceState, Page, ProposalFilter, ProposalsState,
    SidebarState, TreasuryState, VoterState, WalletState,
};
use crate::state;
use crate::ui;

type Client = DashboardClient<HttpRpcGateway, KeypairWallet, SystemClock>;

/// Result of an async transaction submission
struct SubmitResult {
    label: String,
    outcome: Result<Signature, PortError>,
}

/// The main application state
pub struct App {
    /// Current active page
    page: Page,
    /// Environment-derived client configuration
    config: ClientConfig,
    /// Dashboard client shared with worker threads
    client: Option<Arc<Client>>,
    /// Why the client could not be constructed, if it could not
    startup_error: Option<String>,
    /// Signing wallet address, absent when no keypair is available
    wallet_pubkey: Option<Pubkey>,
    /// Human-readable wallet description for the sidebar
    wallet_note: String,
    /// solana-core version reported by the node
    node_version: Option<String>,
    /// One-shot initial data load
    bootstrapped: bool,
    /// Dark theme unless the user flips the toggle
    dark_mode: bool,

    sidebar: SidebarState,
    proposals: ProposalsState,
    balances: WalletState,
    voter: VoterState,
    governance: GovernanceState,
    treasury: TreasuryState,
    actions: ActionState,

    /// Async submission result receiver
    action_result: Arc<Mutex<Option<SubmitResult>>>,
    /// Async proposal list receiver
    proposals_result: Arc<Mutex<Option<Result<Vec<ProposalSummary>, PortError>>>>,
    /// Async single-proposal lookup receiver
    lookup_result: Arc<Mutex<Option<Result<ProposalSummary, PortError>>>>,
    /// Async voter status receiver
    voter_result: Arc<Mutex<Option<Result<VoterStatus, PortError>>>>,
    /// Async treasury overview receiver
    overview_result: Arc<Mutex<Option<Result<TreasuryOverview, PortError>>>>,
    /// Async wallet balances receiver (lamports plus token balance)
    balances_result: Arc<Mutex<Option<Result<(u64, TokenBalanceView), PortError>>>>,
    /// Async airdrop receiver
    airdrop_result: Arc<Mutex<Option<Result<Signature, String>>>>,
    /// Async node version receiver
    version_result: Arc<Mutex<Option<Result<String, String>>>>,
}

impl App {
    /// Create a new App instance
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config = ClientConfig::from_env();
        tracing::info!(
            rpc_url = %config.rpc_url,
            cluster = %config.cluster,
            program_id = %config.program_id,
            "starting voting dashboard"
        );

        let wallet = KeypairWallet::with_config(&config);
        let wallet_note = wallet.describe();
        let wallet_pubkey = wallet.address().ok();

        let mut startup_error = None;
        let client = match build_client(&config, wallet) {
            Ok(client) => Some(Arc::new(client)),
            Err(e) => {
                tracing::error!(error = %e, "dashboard client unavailable");
                startup_error = Some(e);
                None
            }
        };

        Self {
            page: Page::Proposals,
            config,
            client,
            startup_error,
            wallet_pubkey,
            wallet_note,
            node_version: None,
            bootstrapped: false,
            dark_mode: true,
            sidebar: SidebarState::default(),
            proposals: ProposalsState::default(),
            balances: WalletState::default(),
            voter: VoterState::default(),
            governance: GovernanceState::default(),
            treasury: TreasuryState::default(),
            actions: ActionState::default(),
            action_result: Arc::new(Mutex::new(None)),
            proposals_result: Arc::new(Mutex::new(None)),
            lookup_result: Arc::new(Mutex::new(None)),
            voter_result: Arc::new(Mutex::new(None)),
            overview_result: Arc::new(Mutex::new(None)),
            balances_result: Arc::new(Mutex::new(None)),
            airdrop_result: Arc::new(Mutex::new(None)),
            version_result: Arc::new(Mutex::new(None)),
        }
    }
}

fn build_client(config: &ClientConfig, wallet: KeypairWallet) -> Result<Client, String> {
    let program_id = Pubkey::from_str(&config.program_id)
        .map_err(|e| format!("program id '{}' did not parse: {}", config.program_id, e))?;
    let gateway = HttpRpcGateway::with_config(config).map_err(|e| e.to_string())?;
    Ok(DashboardClient::new(
        gateway,
        wallet,
        SystemClock::default(),
        program_id,
    ))
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(if self.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });

        // Collect async worker results
        self.check_action_result(ctx);
        self.check_proposals_result();
        self.check_lookup_result();
        self.check_voter_result();
        self.check_overview_result();
        self.check_balances_result();
        self.check_airdrop_result(ctx);
        self.check_version_result();

        if !self.bootstrapped {
            self.bootstrapped = true;
            self.fetch_node_version(ctx);
            self.refresh_all(ctx);
        }

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.heading(
                    egui::RichText::new("🗳 Rusty-Ballot")
                        .size(22.0)
                        .color(egui::Color32::from_rgb(0, 212, 170)),
                );
                ui.add_space(30.0);
                ui.separator();
                ui.add_space(10.0);
                for page in [
                    Page::Proposals,
                    Page::Tokens,
                    Page::Voter,
                    Page::Governance,
                    Page::Treasury,
                ] {
                    ui.selectable_value(&mut self.page, page, page.title());
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let icon = if self.dark_mode { "☀" } else { "🌙" };
                    if ui.button(icon).on_hover_text("Switch theme").clicked() {
                        self.dark_mode = !self.dark_mode;
                    }
                });
            });
            ui.add_space(4.0);
        });

        let wallet_address = self.wallet_pubkey.map(|p| p.to_string());
        let sidebar_action = sidebar::render(
            ctx,
            &mut self.sidebar,
            &self.balances,
            wallet_address.as_deref(),
            &self.wallet_note,
            &self.config.cluster,
            &self.config.rpc_url,
            &self.config.program_id,
            self.node_version.as_deref(),
        );
        match sidebar_action {
            SidebarAction::Refresh => self.refresh_all(ctx),
            SidebarAction::Airdrop { lamports } => self.request_airdrop(ctx, lamports),
            SidebarAction::None => {}
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(10.0);
                if let Some(error) = self.startup_error.clone() {
                    ui::error_message(ui, &error);
                    ui.label(
                        egui::RichText::new(
                            "Fix the RUSTY_BALLOT_* environment and restart the dashboard.",
                        )
                        .weak(),
                    );
                    return;
                }
                self.render_action_strip(ui);
                match self.page {
                    Page::Proposals => self.render_proposals_tab(ui, ctx),
                    Page::Tokens => self.render_tokens_tab(ui, ctx),
                    Page::Voter => self.render_voter_tab(ui, ctx),
                    Page::Governance => self.render_governance_tab(ui, ctx),
                    Page::Treasury => self.render_treasury_tab(ui, ctx),
                }
                ui.add_space(20.0);
            });
        });
    }
}

// Async workers and their result collectors
impl App {
    fn refresh_all(&mut self, ctx: &egui::Context) {
        self.refresh_proposals(ctx);
        self.refresh_overview(ctx);
        if self.wallet_pubkey.is_some() {
            self.refresh_balances(ctx);
            self.refresh_voter(ctx);
        }
    }

    fn refresh_proposals(&mut self, ctx: &egui::Context) {
        let Some(client) = self.client.clone() else {
            return;
        };
        self.proposals.is_loading = true;
        self.proposals.error = None;

        let result = Arc::clone(&self.proposals_result);
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let outcome = client.list_proposals();
            *result.lock().unwrap() = Some(outcome);
            ctx.request_repaint();
        });
    }

    fn lookup_proposal(&mut self, ctx: &egui::Context, proposal_id: u8) {
        let Some(client) = self.client.clone() else {
            return;
        };
        self.proposals.clear_results();
        self.proposals.is_loading = true;

        let result = Arc::clone(&self.lookup_result);
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let outcome = client.fetch_proposal(proposal_id);
            *result.lock().unwrap() = Some(outcome);
            ctx.request_repaint();
        });
    }

    fn refresh_voter(&mut self, ctx: &egui::Context) {
        let Some(client) = self.client.clone() else {
            return;
        };
        self.voter.is_loading = true;
        self.voter.error = None;

        let result = Arc::clone(&self.voter_result);
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let outcome = client.voter_status();
            *result.lock().unwrap() = Some(outcome);
            ctx.request_repaint();
        });
    }

    fn refresh_overview(&mut self, ctx: &egui::Context) {
        let Some(client) = self.client.clone() else {
            return;
        };
        self.treasury.is_loading = true;
        self.treasury.error = None;

        let result = Arc::clone(&self.overview_result);
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let outcome = client.treasury_overview();
            *result.lock().unwrap() = Some(outcome);
            ctx.request_repaint();
        });
    }

    fn refresh_balances(&mut self, ctx: &egui::Context) {
        let Some(client) = self.client.clone() else {
            return;
        };
        self.balances.is_loading = true;
        self.balances.error = None;

        let result = Arc::clone(&self.balances_result);
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let outcome = (|| {
                let address = client.wallet.address()?;
                let lamports = client.chain.get_balance(&address)?;
                let token = client.token_balance()?;
                Ok::<_, PortError>((lamports, token))
            })();
            *result.lock().unwrap() = Some(outcome);
            ctx.request_repaint();
        });
    }

    /// Submit a transaction-producing call on a worker thread
    fn submit_action<F>(&mut self, ctx: &egui::Context, label: &str, task: F)
    where
        F: FnOnce(&Client) -> Result<Signature, PortError> + Send + 'static,
    {
        let Some(client) = self.client.clone() else {
            return;
        };
        if self.actions.is_busy() {
            return;
        }
        self.actions.in_flight = Some(label.to_string());
        tracing::info!(action = label, "submitting transaction");

        let result = Arc::clone(&self.action_result);
        let label = label.to_string();
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let outcome = task(&client);
            *result.lock().unwrap() = Some(SubmitResult { label, outcome });
            ctx.request_repaint();
        });
    }

    fn request_airdrop(&mut self, ctx: &egui::Context, lamports: u64) {
        let Some(address) = self.wallet_pubkey else {
            return;
        };
        self.sidebar.airdrop_loading = true;
        self.sidebar.airdrop_result = None;
        tracing::info!(lamports, "requesting faucet airdrop");

        let rpc_url = self.config.rpc_url.clone();
        let result = Arc::clone(&self.airdrop_result);
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let outcome = rt
                .block_on(api::request_airdrop(&rpc_url, &address, lamports))
                .map_err(|e| format!("{:#}", e));
            *result.lock().unwrap() = Some(outcome);
            ctx.request_repaint();
        });
    }

    fn fetch_node_version(&mut self, ctx: &egui::Context) {
        let rpc_url = self.config.rpc_url.clone();
        let result = Arc::clone(&self.version_result);
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let outcome = rt
                .block_on(api::fetch_node_version(&rpc_url))
                .map_err(|e| format!("{:#}", e));
            *result.lock().unwrap() = Some(outcome);
            ctx.request_repaint();
        });
    }

    fn check_action_result(&mut self, ctx: &egui::Context) {
        let reply = { self.action_result.lock().unwrap().take() };
        if let Some(reply) = reply {
            self.actions.in_flight = None;
            let result = match reply.outcome {
                Ok(signature) => {
                    tracing::info!(
                        action = %reply.label,
                        signature = %signature,
                        "transaction accepted by the node"
                    );
                    // Pull fresh chain state once the node has the transaction
                    self.refresh_all(ctx);
                    Ok(signature.to_string())
                }
                Err(e) => {
                    tracing::warn!(action = %reply.label, error = %e, "transaction failed");
                    Err(e.to_string())
                }
            };
            self.actions.last = Some(ActionOutcome {
                label: reply.label,
                result,
            });
        }
    }

    fn check_proposals_result(&mut self) {
        let result = { self.proposals_result.lock().unwrap().take() };
        if let Some(result) = result {
            self.proposals.is_loading = false;
            match result {
                Ok(summaries) => {
                    self.proposals.summaries = summaries;
                    self.proposals.fetched = true;
                }
                Err(e) => self.proposals.error = Some(e.to_string()),
            }
        }
    }

    fn check_lookup_result(&mut self) {
        let result = { self.lookup_result.lock().unwrap().take() };
        if let Some(result) = result {
            self.proposals.is_loading = false;
            match result {
                Ok(summary) => self.proposals.looked_up = Some(summary),
                Err(e) => self.proposals.error = Some(e.to_string()),
            }
        }
    }

    fn check_voter_result(&mut self) {
        let result = { self.voter_result.lock().unwrap().take() };
        if let Some(result) = result {
            self.voter.is_loading = false;
            match result {
                Ok(status) => self.voter.status = Some(status),
                Err(e) => self.voter.error = Some(e.to_string()),
            }
        }
    }

    fn check_overview_result(&mut self) {
        let result = { self.overview_result.lock().unwrap().take() };
        if let Some(result) = result {
            self.treasury.is_loading = false;
            match result {
                Ok(overview) => self.treasury.overview = Some(overview),
                Err(e) => self.treasury.error = Some(e.to_string()),
            }
        }
    }

    fn check_balances_result(&mut self) {
        let result = { self.balances_result.lock().unwrap().take() };
        if let Some(result) = result {
            self.balances.is_loading = false;
            match result {
                Ok((lamports, token)) => {
                    self.balances.sol_lamports = Some(lamports);
                    self.balances.token = Some(token);
                }
                Err(e) => self.balances.error = Some(e.to_string()),
            }
        }
    }

    fn check_airdrop_result(&mut self, ctx: &egui::Context) {
        let result = { self.airdrop_result.lock().unwrap().take() };
        if let Some(result) = result {
            self.sidebar.airdrop_loading = false;
            match result {
                Ok(signature) => {
                    self.sidebar.airdrop_result = Some(Ok(signature.to_string()));
                    self.refresh_balances(ctx);
                }
                Err(e) => self.sidebar.airdrop_result = Some(Err(e)),
            }
        }
    }

    fn check_version_result(&mut self) {
        let result = { self.version_result.lock().unwrap().take() };
        if let Some(result) = result {
            match result {
                Ok(version) => self.node_version = Some(version),
                Err(e) => {
                    tracing::warn!(error = %e, "node version unavailable");
                }
            }
        }
    }
}

// Page rendering
impl App {
    /// Status strip for the most recent transaction
    fn render_action_strip(&mut self, ui: &mut egui::Ui) {
        if let Some(label) = &self.actions.in_flight {
            ui::card_highlighted(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(format!("Submitting: {}...", label));
                });
            });
            ui.add_space(10.0);
            return;
        }

        let Some(outcome) = self.actions.last.clone() else {
            return;
        };
        let mut dismiss = false;
        ui::card(ui, |ui| {
            ui.horizontal(|ui| {
                match &outcome.result {
                    Ok(signature) => {
                        ui::success_message(ui, &format!("{} submitted", outcome.label));
                        ui::tx_link(ui, &self.config.cluster, signature);
                    }
                    Err(error) => {
                        ui::error_message(ui, &format!("{} failed: {}", outcome.label, error));
                    }
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("✕").on_hover_text("Dismiss").clicked() {
                        dismiss = true;
                    }
                });
            });
        });
        ui.add_space(10.0);
        if dismiss {
            self.actions.last = None;
        }
    }

    fn render_proposals_tab(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui::styled_heading(ui, "Proposal Board");
        ui.label("Stake VOTE tokens on community proposals before their deadlines close.");
        ui.add_space(15.0);

        let active_count = self.proposals.summaries.iter().filter(|s| s.active).count();
        let ended_count = self.proposals.summaries.len() - active_count;

        ui.horizontal(|ui| {
            ui.selectable_value(
                &mut self.proposals.filter,
                ProposalFilter::Active,
                format!("Active ({})", active_count),
            );
            ui.selectable_value(
                &mut self.proposals.filter,
                ProposalFilter::Ended,
                format!("Ended ({})", ended_count),
            );
            ui.selectable_value(
                &mut self.proposals.filter,
                ProposalFilter::All,
                format!("All ({})", self.proposals.summaries.len()),
            );

            ui.add_space(20.0);
            if ui.button("⟳ Refresh").clicked() {
                self.refresh_proposals(ctx);
            }
            if self.proposals.is_loading {
                ui.spinner();
            }
        });

        if let Some(error) = self.proposals.error.clone() {
            ui.add_space(10.0);
            ui::error_message(ui, &error);
        }

        if matches!(self.voter.status, Some(VoterStatus::NotRegistered)) {
            ui.add_space(10.0);
            ui::warning_message(
                ui,
                "Register as a voter before casting votes.",
                egui::Color32::from_rgb(220, 180, 50),
            );
        }

        ui.add_space(10.0);

        let filter = self.proposals.filter;
        let filtered: Vec<ProposalSummary> = self
            .proposals
            .summaries
            .iter()
            .filter(|s| match filter {
                ProposalFilter::Active => s.active,
                ProposalFilter::Ended => !s.active,
                ProposalFilter::All => true,
            })
            .cloned()
            .collect();

        let now = chrono::Utc::now().timestamp();
        let mut vote_request: Option<(u8, u64)> = None;

        if filtered.is_empty() && self.proposals.fetched {
            ui::card(ui, |ui| {
                ui.label(match filter {
                    ProposalFilter::Active => "No active proposals right now.",
                    ProposalFilter::Ended => "No ended proposals yet.",
                    ProposalFilter::All => "No proposals yet. Be the first to register one!",
                });
            });
        }

        for summary in &filtered {
            self.proposal_card(ui, summary, now, true, &mut vote_request);
            ui.add_space(10.0);
        }

        ui::section_header(ui, "Find a proposal");
        ui.horizontal(|ui| {
            ui.label("Proposal id:");
            ui::number_input(ui, &mut self.proposals.lookup_id, "0");
            if ui.button("🔍 Look up").clicked() {
                match state::parse_proposal_id(&self.proposals.lookup_id) {
                    Ok(id) => self.lookup_proposal(ctx, id),
                    Err(e) => self.proposals.error = Some(e),
                }
            }
        });

        if let Some(summary) = self.proposals.looked_up.clone() {
            ui.add_space(10.0);
            self.proposal_card(ui, &summary, now, true, &mut vote_request);
        }

        if let Some((proposal_id, stake)) = vote_request {
            self.submit_action(
                ctx,
                &format!("vote on proposal #{}", proposal_id),
                move |client| client.proposal_to_vote(proposal_id, stake),
            );
        }
    }

    /// One proposal rendered as a card, optionally with its vote form
    fn proposal_card(
        &mut self,
        ui: &mut egui::Ui,
        summary: &ProposalSummary,
        now: i64,
        with_vote_form: bool,
        vote_request: &mut Option<(u8, u64)>,
    ) {
        let proposal = &summary.proposal;
        let cluster = self.config.cluster.clone();
        let can_vote = self.wallet_pubkey.is_some() && !self.actions.is_busy();

        ui::card(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(format!("Proposal #{}", proposal.proposal_id))
                        .strong()
                        .size(16.0),
                );
                ui.add_space(10.0);
                ui::status_badge(ui, summary.active);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(format!(
                            "🗳 {} votes",
                            ui::format_votes(proposal.number_of_votes)
                        ))
                        .strong(),
                    );
                });
            });

            ui.add_space(5.0);
            ui.label(&proposal.proposal_info);
            ui.add_space(8.0);

            egui::Grid::new(format!("proposal_grid_{}", proposal.proposal_id))
                .num_columns(2)
                .spacing([10.0, 4.0])
                .show(ui, |ui| {
                    ui.label(egui::RichText::new("Deadline:").weak());
                    ui.horizontal(|ui| {
                        ui.label(ui::format_deadline_utc(proposal.deadline));
                        ui.label(
                            egui::RichText::new(ui::format_time_remaining(
                                proposal.deadline,
                                now,
                            ))
                            .weak(),
                        );
                    });
                    ui.end_row();

                    ui.label(egui::RichText::new("Author:").weak());
                    ui::address_link(ui, &cluster, &proposal.authority.to_string(), None);
                    ui.end_row();

                    ui.label(egui::RichText::new("Account:").weak());
                    ui::address_link(ui, &cluster, &summary.address.to_string(), None);
                    ui.end_row();
                });

            if with_vote_form {
                ui.add_space(8.0);
                if summary.active {
                    ui.horizontal(|ui| {
                        ui.label("Stake:");
                        ui::number_input(
                            ui,
                            self.proposals.stake_input(proposal.proposal_id),
                            "VOTE",
                        );
                        if ui::primary_button_enabled(ui, "🗳 Vote", can_vote).clicked() {
                            let raw = self.proposals.stake_input(proposal.proposal_id).clone();
                            match state::parse_token_amount(&raw) {
                                Ok(stake) => {
                                    *vote_request = Some((proposal.proposal_id, stake));
                                }
                                Err(e) => self.proposals.error = Some(e),
                            }
                        }
                    });
                } else {
                    ui.label(egui::RichText::new("Voting closed.").weak());
                }
            }
        });
    }

    fn render_tokens_tab(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui::styled_heading(ui, "Buy Tokens");
        ui.label("Each purchase swaps a fixed amount of SOL for freshly minted VOTE tokens.");
        ui.add_space(15.0);

        let known_uninitialized = self
            .treasury
            .overview
            .as_ref()
            .is_some_and(|o| !o.is_initialized());

        if let Some(config) = self
            .treasury
            .overview
            .as_ref()
            .and_then(|o| o.config.as_ref())
        {
            ui::card_highlighted(ui, |ui| {
                ui.label(egui::RichText::new("Exchange rate").strong());
                ui.add_space(5.0);
                ui.label(format!(
                    "{} SOL buys {} VOTE",
                    ui::format_sol(config.sol_price),
                    ui::format_token_amount(config.tokens_per_purchase, TOKEN_DECIMALS),
                ));
            });
            ui.add_space(10.0);
        } else if known_uninitialized {
            ui::warning_message(
                ui,
                "The treasury has not been initialized on this cluster yet.",
                egui::Color32::from_rgb(220, 180, 50),
            );
            ui.add_space(10.0);
        }

        ui::card(ui, |ui| {
            ui.label(egui::RichText::new("Your balances").strong());
            ui.add_space(5.0);
            egui::Grid::new("token_balances")
                .num_columns(2)
                .spacing([10.0, 4.0])
                .show(ui, |ui| {
                    ui.label(egui::RichText::new("SOL:").weak());
                    match self.balances.sol_lamports {
                        Some(lamports) => {
                            ui.label(egui::RichText::new(ui::format_sol(lamports)).monospace());
                        }
                        None => {
                            ui.label(egui::RichText::new("—").weak());
                        }
                    }
                    ui.end_row();

                    ui.label(egui::RichText::new("VOTE:").weak());
                    match &self.balances.token {
                        Some(token) => {
                            ui.label(
                                egui::RichText::new(ui::format_token_balance(
                                    token.amount,
                                    token.decimals,
                                ))
                                .monospace(),
                            );
                        }
                        None => {
                            ui.label(egui::RichText::new("—").weak());
                        }
                    }
                    ui.end_row();

                    if let Some(token) = &self.balances.token {
                        ui.label(egui::RichText::new("Token account:").weak());
                        ui::address_link(
                            ui,
                            &self.config.cluster.clone(),
                            &token.token_account.to_string(),
                            None,
                        );
                        ui.end_row();
                    }
                });
            if let Some(error) = &self.balances.error {
                ui.add_space(5.0);
                ui::error_message(ui, error);
            }
        });

        ui.add_space(15.0);
        let can_buy =
            self.wallet_pubkey.is_some() && !self.actions.is_busy() && !known_uninitialized;
        if ui::primary_button_enabled(ui, "💰 Buy Tokens", can_buy).clicked() {
            self.submit_action(ctx, "token purchase", |client| client.buy_tokens());
        }
        ui.add_space(5.0);
        ui.label(
            egui::RichText::new("Your token account is created automatically on first purchase.")
                .weak()
                .small(),
        );
    }

    fn render_voter_tab(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui::styled_heading(ui, "Voter Account");
        ui.label("Voting requires a one-time on-chain voter registration.");
        ui.add_space(15.0);

        if let Some(error) = self.voter.error.clone() {
            ui::error_message(ui, &error);
            ui.add_space(10.0);
        }

        if self.voter.is_loading {
            ui::loading_spinner(ui);
            return;
        }

        let can_act = self.wallet_pubkey.is_some() && !self.actions.is_busy();

        match self.voter.status.clone() {
            None => {
                ui.label(
                    egui::RichText::new("Voter status loads once a signing wallet is available.")
                        .weak(),
                );
            }
            Some(VoterStatus::NotRegistered) => {
                ui::card(ui, |ui| {
                    ui.label("You are not registered to vote yet.");
                    ui.add_space(10.0);
                    if ui::primary_button_enabled(ui, "🪪 Register Voter", can_act).clicked() {
                        self.submit_action(ctx, "voter registration", |client| {
                            client.register_voter()
                        });
                    }
                });
            }
            Some(VoterStatus::Registered(voter)) => {
                let cluster = self.config.cluster.clone();
                ui::card(ui, |ui| {
                    egui::Grid::new("voter_grid")
                        .num_columns(2)
                        .spacing([10.0, 6.0])
                        .show(ui, |ui| {
                            ui.label(egui::RichText::new("Wallet:").weak());
                            ui::address_link(ui, &cluster, &voter.voter_id.to_string(), None);
                            ui.end_row();

                            ui.label(egui::RichText::new("Last vote:").weak());
                            if voter.has_voted() {
                                // The stored value is offset by one so 0 can
                                // mean "never voted".
                                ui.label(format!("Proposal #{}", voter.proposal_voted - 1));
                            } else {
                                ui.label(egui::RichText::new("Not voted yet").weak());
                            }
                            ui.end_row();
                        });

                    ui.add_space(10.0);
                    if ui::primary_button_enabled(ui, "🚪 Close Voter Account", can_act).clicked()
                    {
                        self.submit_action(ctx, "voter account closure", |client| {
                            client.close_voter()
                        });
                    }
                    ui.add_space(5.0);
                    ui.label(
                        egui::RichText::new("Closing returns the account rent to your wallet.")
                            .weak()
                            .small(),
                    );
                });
            }
        }
    }

    fn render_governance_tab(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui::styled_heading(ui, "Governance");
        ui.label("Register proposals and settle them after their deadlines.");
        ui.add_space(15.0);

        if let Some(error) = self.governance.error.clone() {
            ui::error_message(ui, &error);
            ui.add_space(10.0);
        }

        let can_act = self.wallet_pubkey.is_some() && !self.actions.is_busy();

        ui::section_header(ui, "📝 Register Proposal");
        ui.label("Registering stakes VOTE tokens and assigns the next free proposal id.");
        ui.add_space(8.0);

        ui.label("Description:");
        ui::multiline_input(
            ui,
            &mut self.governance.description,
            "What should the community decide?",
            3,
        );
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            ui.label("Deadline (UTC):");
            ui.add(
                egui::TextEdit::singleline(&mut self.governance.deadline)
                    .hint_text("2026-09-01 18:00")
                    .desired_width(180.0)
                    .font(egui::TextStyle::Monospace),
            );
            ui.label(
                egui::RichText::new(format!(
                    "now: {}",
                    chrono::Utc::now().format("%Y-%m-%d %H:%M")
                ))
                .weak()
                .small(),
            );
        });
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            ui.label("Stake:");
            ui::number_input(ui, &mut self.governance.stake, "VOTE");
        });
        ui.add_space(10.0);

        if ui::primary_button_enabled(ui, "📝 Register Proposal", can_act).clicked() {
            self.governance.error = None;
            let deadline = state::parse_deadline_utc(&self.governance.deadline);
            let stake = state::parse_token_amount(&self.governance.stake);
            match (deadline, stake) {
                (Ok(deadline), Ok(stake)) => {
                    let description = self.governance.description.clone();
                    self.submit_action(ctx, "proposal registration", move |client| {
                        client.register_proposal(&description, deadline, stake)
                    });
                }
                (Err(e), _) | (_, Err(e)) => self.governance.error = Some(e),
            }
        }

        ui::section_header(ui, "🏆 Pick Winner");
        ui.label(
            egui::RichText::new(
                "Marks the proposal as the winner once its deadline has passed. Treasury \
                 authority only.",
            )
            .weak(),
        );
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.label("Proposal id:");
            ui::number_input(ui, &mut self.governance.winner_id, "0");
            if ui::primary_button_enabled(ui, "🏆 Pick Winner", can_act).clicked() {
                self.governance.error = None;
                match state::parse_proposal_id(&self.governance.winner_id) {
                    Ok(id) => {
                        self.submit_action(
                            ctx,
                            &format!("winner pick for proposal #{}", id),
                            move |client| client.pick_winner(id),
                        );
                    }
                    Err(e) => self.governance.error = Some(e),
                }
            }
        });

        ui::section_header(ui, "❌ Close Proposal");
        ui.label(
            egui::RichText::new(
                "Closes an ended proposal and refunds its rent. Only the proposal author can \
                 close it.",
            )
            .weak(),
        );
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.label("Proposal id:");
            ui::number_input(ui, &mut self.governance.close_id, "0");
            if ui::primary_button_enabled(ui, "❌ Close Proposal", can_act).clicked() {
                self.governance.error = None;
                match state::parse_proposal_id(&self.governance.close_id) {
                    Ok(id) => {
                        self.submit_action(
                            ctx,
                            &format!("closure of proposal #{}", id),
                            move |client| client.close_proposal(id),
                        );
                    }
                    Err(e) => self.governance.error = Some(e),
                }
            }
        });
    }

    fn render_treasury_tab(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui::styled_heading(ui, "Treasury");
        ui.label("Program treasury that mints VOTE tokens and escrows the purchase SOL.");
        ui.add_space(15.0);

        if let Some(error) = self.treasury.error.clone() {
            ui::error_message(ui, &error);
            ui.add_space(10.0);
        }

        ui.horizontal(|ui| {
            if ui.button("⟳ Refresh").clicked() {
                self.refresh_overview(ctx);
            }
            if self.treasury.is_loading {
                ui.spinner();
            }
        });
        ui.add_space(10.0);

        let cluster = self.config.cluster.clone();
        let overview = self.treasury.overview.clone();
        let initialized = overview.as_ref().is_some_and(|o| o.is_initialized());

        match &overview {
            Some(overview) => {
                ui::card(ui, |ui| {
                    ui.label(egui::RichText::new("Treasury details").strong());
                    ui.add_space(5.0);
                    egui::Grid::new("treasury_grid")
                        .num_columns(2)
                        .spacing([10.0, 6.0])
                        .show(ui, |ui| {
                            ui.label(egui::RichText::new("Config account:").weak());
                            ui::address_link(
                                ui,
                                &cluster,
                                &overview.treasury_config_address.to_string(),
                                None,
                            );
                            ui.end_row();

                            ui.label(egui::RichText::new("SOL vault:").weak());
                            ui::address_link(
                                ui,
                                &cluster,
                                &overview.sol_vault_address.to_string(),
                                None,
                            );
                            ui.end_row();

                            ui.label(egui::RichText::new("Vault balance:").weak());
                            ui.label(
                                egui::RichText::new(format!(
                                    "{} SOL",
                                    ui::format_sol(overview.sol_vault_lamports)
                                ))
                                .monospace(),
                            );
                            ui.end_row();

                            if let Some(config) = &overview.config {
                                ui.label(egui::RichText::new("Authority:").weak());
                                ui::address_link(
                                    ui,
                                    &cluster,
                                    &config.authority.to_string(),
                                    None,
                                );
                                ui.end_row();

                                ui.label(egui::RichText::new("Token mint:").weak());
                                ui::address_link(ui, &cluster, &config.x_mint.to_string(), None);
                                ui.end_row();

                                ui.label(egui::RichText::new("Treasury tokens:").weak());
                                ui::address_link(
                                    ui,
                                    &cluster,
                                    &config.treasury_token_account.to_string(),
                                    None,
                                );
                                ui.end_row();

                                ui.label(egui::RichText::new("Purchase price:").weak());
                                ui.label(format!("{} SOL", ui::format_sol(config.sol_price)));
                                ui.end_row();

                                ui.label(egui::RichText::new("Tokens per purchase:").weak());
                                ui.label(format!(
                                    "{} VOTE",
                                    ui::format_token_amount(
                                        config.tokens_per_purchase,
                                        TOKEN_DECIMALS
                                    )
                                ));
                                ui.end_row();
                            }
                        });

                    if !overview.is_initialized() {
                        ui.add_space(8.0);
                        ui::warning_message(
                            ui,
                            "Not initialized on this cluster yet.",
                            egui::Color32::from_rgb(220, 180, 50),
                        );
                    }
                });
            }
            None => {
                if self.treasury.is_loading {
                    ui::loading_spinner(ui);
                }
            }
        }

        let can_act = self.wallet_pubkey.is_some() && !self.actions.is_busy();

        ui::section_header(ui, "🏦 Initialize Treasury");
        if initialized {
            ui.label(
                egui::RichText::new(
                    "The treasury is initialized; its exchange rate is fixed for the life of \
                     the program.",
                )
                .weak(),
            );
        } else {
            ui.label(
                egui::RichText::new(
                    "Runs once per cluster. The initializing wallet becomes the treasury \
                     authority.",
                )
                .weak(),
            );
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.label("Purchase price:");
                ui::number_input(ui, &mut self.treasury.sol_price, "SOL");
                ui.add_space(10.0);
                ui.label("Tokens per purchase:");
                ui::number_input(ui, &mut self.treasury.tokens_per_purchase, "VOTE");
            });
            ui.add_space(10.0);
            if ui::primary_button_enabled(ui, "🏦 Initialize Treasury", can_act).clicked() {
                self.treasury.error = None;
                let price = state::parse_sol_amount(&self.treasury.sol_price);
                let tokens = state::parse_token_amount(&self.treasury.tokens_per_purchase);
                match (price, tokens) {
                    (Ok(price), Ok(tokens)) => {
                        self.submit_action(ctx, "treasury initialization", move |client| {
                            client.initialize_treasury(price, tokens)
                        });
                    }
                    (Err(e), _) | (_, Err(e)) => self.treasury.error = Some(e),
                }
            }
        }

        ui::section_header(ui, "💸 Withdraw SOL");
        ui.label(
            egui::RichText::new(
                "Moves SOL from the vault to your wallet. Treasury authority only.",
            )
            .weak(),
        );
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.label("Amount:");
            ui::number_input(ui, &mut self.treasury.withdraw_sol, "SOL");
            if ui::primary_button_enabled(ui, "💸 Withdraw", can_act).clicked() {
                self.treasury.error = None;
                match state::parse_sol_amount(&self.treasury.withdraw_sol) {
                    Ok(lamports) => {
                        self.submit_action(ctx, "treasury withdrawal", move |client| {
                            client.withdraw_sol(lamports)
                        });
                    }
                    Err(e) => self.treasury.error = Some(e),
                }
            }
        });
    }
}
