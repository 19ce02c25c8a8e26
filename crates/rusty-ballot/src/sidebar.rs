//! Sidebar component for wallet and cluster context

use eframe::egui;

use crate::state::{self, SidebarState, WalletState};
use crate::ui;

/// Sidebar action returned after rendering
pub enum SidebarAction {
    None,
    Refresh,
    Airdrop { lamports: u64 },
}

/// Render the sidebar panel
#[allow(clippy::too_many_arguments)]
pub fn render(
    ctx: &egui::Context,
    sidebar: &mut SidebarState,
    wallet: &WalletState,
    wallet_address: Option<&str>,
    wallet_note: &str,
    cluster: &str,
    rpc_url: &str,
    program_id: &str,
    node_version: Option<&str>,
) -> SidebarAction {
    let mut action = SidebarAction::None;

    egui::SidePanel::left("wallet_context_panel")
        .resizable(true)
        .default_width(280.0)
        .min_width(60.0)
        .show_animated(ctx, !sidebar.collapsed, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(10.0);

                // Header with collapse button
                ui.horizontal(|ui| {
                    ui.heading(egui::RichText::new("Wallet").size(16.0).strong());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("◀").on_hover_text("Collapse sidebar").clicked() {
                            sidebar.collapsed = true;
                        }
                    });
                });
                ui.separator();
                ui.add_space(5.0);

                ui.label(egui::RichText::new(wallet_note).weak().small());
                ui.add_space(5.0);

                match wallet_address {
                    Some(address) => {
                        ui.horizontal(|ui| {
                            let url = ui::explorer_address_url(cluster, address);
                            let response = ui
                                .link(
                                    egui::RichText::new(ui::shorten_address_tight(address))
                                        .monospace()
                                        .size(14.0),
                                )
                                .on_hover_text("Open in Solana Explorer");
                            if response.clicked() {
                                ui::open_url_new_tab(&url);
                            }
                            if ui.small_button("📋").on_hover_text("Copy address").clicked() {
                                ui::copy_to_clipboard(address);
                            }
                        });
                    }
                    None => {
                        ui::warning_message(
                            ui,
                            "No signing wallet available",
                            egui::Color32::from_rgb(220, 180, 50),
                        );
                    }
                }

                ui.add_space(10.0);

                // Balances
                egui::Grid::new("sidebar_balances")
                    .num_columns(2)
                    .spacing([10.0, 6.0])
                    .show(ui, |ui| {
                        ui.label(egui::RichText::new("SOL:").weak());
                        match wallet.sol_lamports {
                            Some(lamports) => {
                                ui.label(
                                    egui::RichText::new(ui::format_sol(lamports)).monospace(),
                                );
                            }
                            None => {
                                ui.label(egui::RichText::new("—").weak());
                            }
                        }
                        ui.end_row();

                        ui.label(egui::RichText::new("VOTE:").weak());
                        match &wallet.token {
                            Some(balance) => {
                                ui.label(
                                    egui::RichText::new(ui::format_token_balance(
                                        balance.amount,
                                        balance.decimals,
                                    ))
                                    .monospace(),
                                );
                            }
                            None => {
                                ui.label(egui::RichText::new("—").weak());
                            }
                        }
                        ui.end_row();
                    });

                if let Some(error) = &wallet.error {
                    ui.add_space(5.0);
                    ui::error_message(ui, error);
                }

                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui
                        .add_enabled(
                            wallet_address.is_some() && !wallet.is_loading,
                            egui::Button::new("⟳ Refresh"),
                        )
                        .on_hover_text("Reload balances, proposals and voter status")
                        .clicked()
                    {
                        action = SidebarAction::Refresh;
                    }
                    if wallet.is_loading {
                        ui.spinner();
                    }
                });

                // Airdrops only exist on test clusters
                if cluster != "mainnet" && cluster != "mainnet-beta" {
                    ui.add_space(15.0);
                    ui.separator();
                    ui.add_space(5.0);
                    ui.label(egui::RichText::new("Faucet").strong());
                    ui.add_space(5.0);

                    ui.horizontal(|ui| {
                        ui::number_input(ui, &mut sidebar.airdrop_sol, "SOL");
                        if ui
                            .add_enabled(
                                wallet_address.is_some() && !sidebar.airdrop_loading,
                                egui::Button::new("🚰 Airdrop"),
                            )
                            .on_hover_text("Request SOL from the cluster faucet")
                            .clicked()
                        {
                            match state::parse_sol_amount(&sidebar.airdrop_sol) {
                                Ok(0) => {
                                    sidebar.airdrop_result =
                                        Some(Err("enter a SOL amount above zero".to_string()));
                                }
                                Ok(lamports) => {
                                    sidebar.airdrop_result = None;
                                    action = SidebarAction::Airdrop { lamports };
                                }
                                Err(e) => {
                                    sidebar.airdrop_result = Some(Err(e));
                                }
                            }
                        }
                        if sidebar.airdrop_loading {
                            ui.spinner();
                        }
                    });

                    match &sidebar.airdrop_result {
                        Some(Ok(signature)) => {
                            ui.add_space(5.0);
                            ui::success_message(ui, "Airdrop sent");
                            ui::tx_link(ui, cluster, signature);
                        }
                        Some(Err(error)) => {
                            ui.add_space(5.0);
                            ui::error_message(ui, error);
                        }
                        None => {}
                    }
                }

                ui.add_space(15.0);
                ui.separator();
                ui.add_space(5.0);
                ui.label(egui::RichText::new("Cluster").strong());
                ui.add_space(5.0);

                egui::Grid::new("sidebar_cluster")
                    .num_columns(2)
                    .spacing([10.0, 6.0])
                    .show(ui, |ui| {
                        ui.label(egui::RichText::new("Name:").weak());
                        ui.label(cluster);
                        ui.end_row();

                        ui.label(egui::RichText::new("Node:").weak());
                        match node_version {
                            Some(version) => {
                                ui.label(egui::RichText::new(version).monospace());
                            }
                            None => {
                                ui.label(egui::RichText::new("—").weak());
                            }
                        }
                        ui.end_row();
                    });

                ui.add_space(5.0);
                ui.label(egui::RichText::new("RPC endpoint:").weak());
                ui.label(egui::RichText::new(rpc_url).monospace().small());

                ui.add_space(5.0);
                ui.label(egui::RichText::new("Voting program:").weak());
                ui::address_link(ui, cluster, program_id, None);

                ui.add_space(20.0);
            });
        });

    // Show expand button when collapsed
    if sidebar.collapsed {
        egui::SidePanel::left("collapsed_sidebar")
            .resizable(false)
            .exact_width(30.0)
            .show(ctx, |ui| {
                ui.add_space(10.0);
                if ui.button("▶").on_hover_text("Expand sidebar").clicked() {
                    sidebar.collapsed = false;
                }
            });
    }

    action
}
