//! UI helper components

use eframe::egui;

/// Get Solana Explorer URL for an address on a given cluster.
/// Clusters: mainnet-beta (no query param), devnet, testnet, custom
/// (localnet; the explorer defaults its custom RPC to 127.0.0.1:8899).
pub fn explorer_address_url(cluster: &str, address: &str) -> String {
    format!(
        "https://explorer.solana.com/address/{}{}",
        address,
        cluster_query(cluster)
    )
}

/// Get Solana Explorer URL for a transaction signature on a given cluster
pub fn explorer_tx_url(cluster: &str, signature: &str) -> String {
    format!(
        "https://explorer.solana.com/tx/{}{}",
        signature,
        cluster_query(cluster)
    )
}

fn cluster_query(cluster: &str) -> &'static str {
    match cluster.to_lowercase().as_str() {
        "mainnet" | "mainnet-beta" => "",
        "devnet" => "?cluster=devnet",
        "testnet" => "?cluster=testnet",
        _ => "?cluster=custom",
    }
}

/// Open URL in a new browser tab
pub fn open_url_new_tab(url: &str) {
    let _ = open::that(url);
}

/// Shorten a base58 address for display: first 8 and last 8 characters
pub fn shorten_address(address: &str) -> String {
    if address.len() <= 16 {
        return address.to_string();
    }
    format!("{}...{}", &address[..8], &address[address.len() - 8..])
}

/// Tighter 4-and-4 form used in the chrome where space is scarce
pub fn shorten_address_tight(address: &str) -> String {
    if address.len() <= 8 {
        return address.to_string();
    }
    format!("{}...{}", &address[..4], &address[address.len() - 4..])
}

/// Render an address as a clickable hyperlink that opens in Solana Explorer
pub fn address_link(
    ui: &mut egui::Ui,
    cluster: &str,
    address: &str,
    name: Option<String>,
) -> egui::Response {
    let explorer_url = explorer_address_url(cluster, address);

    ui.horizontal(|ui| {
        let label_text = if let Some(n) = name {
            format!("{} ({})", shorten_address(address), n)
        } else {
            shorten_address(address)
        };

        let response = ui
            .link(
                egui::RichText::new(label_text)
                    .monospace()
                    .color(ui.visuals().hyperlink_color),
            )
            .on_hover_text("Open in Solana Explorer");

        if response.clicked() {
            open_url_new_tab(&explorer_url);
        }

        if ui.small_button("📋").on_hover_text("Copy address").clicked() {
            copy_to_clipboard(address);
        }

        response
    })
    .inner
}

/// Render a transaction signature as a clickable explorer link
pub fn tx_link(ui: &mut egui::Ui, cluster: &str, signature: &str) -> egui::Response {
    let explorer_url = explorer_tx_url(cluster, signature);

    ui.horizontal(|ui| {
        let response = ui
            .link(
                egui::RichText::new(shorten_address(signature))
                    .monospace()
                    .color(ui.visuals().hyperlink_color),
            )
            .on_hover_text("Open transaction in Solana Explorer");

        if response.clicked() {
            open_url_new_tab(&explorer_url);
        }

        if ui.small_button("📋").on_hover_text("Copy signature").clicked() {
            copy_to_clipboard(signature);
        }

        response
    })
    .inner
}

/// Styled heading with accent color
pub fn styled_heading(ui: &mut egui::Ui, text: &str) {
    ui.heading(egui::RichText::new(text).color(egui::Color32::from_rgb(0, 212, 170)));
}

/// Section header with separator
pub fn section_header(ui: &mut egui::Ui, text: &str) {
    ui.add_space(10.0);
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(text).strong().size(14.0));
    });
    ui.separator();
}

/// Copy to clipboard
pub fn copy_to_clipboard(text: &str) {
    if let Ok(mut clipboard) = arboard::Clipboard::new() {
        let _ = clipboard.set_text(text);
    }
}

/// Create a styled text edit for number input
pub fn number_input(ui: &mut egui::Ui, value: &mut String, hint: &str) -> egui::Response {
    ui.add(
        egui::TextEdit::singleline(value)
            .hint_text(hint)
            .desired_width(150.0)
            .font(egui::TextStyle::Monospace),
    )
}

/// Create a styled multiline text edit with fixed height and internal scrolling
pub fn multiline_input(
    ui: &mut egui::Ui,
    value: &mut String,
    hint: &str,
    rows: usize,
) -> egui::Response {
    // Calculate height based on row count (approximate line height)
    let row_height = ui.text_style_height(&egui::TextStyle::Monospace);
    let height = row_height * rows as f32 + ui.spacing().item_spacing.y * 5.0;

    let mut response = None;
    egui::ScrollArea::vertical()
        .max_height(height)
        .show(ui, |ui| {
            response = Some(
                ui.add(
                    egui::TextEdit::multiline(value)
                        .hint_text(hint)
                        .desired_width(f32::INFINITY)
                        .font(egui::TextStyle::Monospace),
                ),
            );
        });
    response.unwrap()
}

/// Loading spinner
pub fn loading_spinner(ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        ui.spinner();
        ui.label("Loading...");
    });
}

/// Error message display
pub fn error_message(ui: &mut egui::Ui, message: &str) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("❌").size(16.0));
        ui.label(egui::RichText::new(message).color(egui::Color32::from_rgb(220, 80, 80)));
    });
}

/// Success message display
pub fn success_message(ui: &mut egui::Ui, message: &str) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("✅").size(16.0));
        ui.label(egui::RichText::new(message).color(egui::Color32::from_rgb(80, 200, 120)));
    });
}

/// Warning message display
pub fn warning_message(ui: &mut egui::Ui, message: &str, color: egui::Color32) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("⚠️").size(14.0));
        ui.label(egui::RichText::new(message).color(color));
    });
}

/// Active/ended status badge for a proposal
pub fn status_badge(ui: &mut egui::Ui, active: bool) {
    if active {
        ui.label(
            egui::RichText::new("🟢 Active")
                .color(egui::Color32::from_rgb(80, 200, 120))
                .strong(),
        );
    } else {
        ui.label(
            egui::RichText::new("🔴 Ended")
                .color(egui::Color32::from_rgb(220, 80, 80))
                .strong(),
        );
    }
}

// =============================================================================
// STYLED BUTTONS
// =============================================================================

/// Primary action button - teal/accent colored, prominent
pub fn primary_button_enabled(ui: &mut egui::Ui, text: &str, enabled: bool) -> egui::Response {
    let accent = egui::Color32::from_rgb(0, 180, 150);
    let btn = egui::Button::new(egui::RichText::new(text).size(14.0).color(egui::Color32::WHITE))
        .min_size(egui::vec2(130.0, 34.0))
        .fill(accent);
    ui.add_enabled(enabled, btn)
}

// =============================================================================
// VISUAL GROUPING
// =============================================================================

/// Render content in a subtle card/frame
pub fn card(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::none()
        .fill(ui.visuals().faint_bg_color)
        .rounding(6.0)
        .inner_margin(12.0)
        .show(ui, add_contents);
}

/// Render content in a highlighted card (slightly brighter)
pub fn card_highlighted(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui)) {
    let bg = ui.visuals().faint_bg_color.linear_multiply(1.3);
    egui::Frame::none()
        .fill(bg)
        .rounding(6.0)
        .inner_margin(12.0)
        .show(ui, add_contents);
}

// =============================================================================
// AMOUNT AND TIME FORMATTING
// =============================================================================

/// Format a lamport amount as SOL with 4 decimal places
pub fn format_sol(lamports: u64) -> String {
    let whole = lamports / 1_000_000_000;
    let frac = (lamports % 1_000_000_000) / 100_000;
    format!("{}.{:04}", add_thousand_separators(&whole.to_string()), frac)
}

/// Format a raw token amount as whole tokens with 2 decimal places
/// (purchase lots and exchange rates)
pub fn format_token_amount(amount: u64, decimals: u8) -> String {
    if decimals == 0 {
        return format!("{}.00", add_thousand_separators(&amount.to_string()));
    }
    let scale = 10u64.pow(decimals as u32);
    let whole = amount / scale;
    // Keep the two leading fractional digits, truncating the rest
    let frac = if decimals >= 2 {
        (amount % scale) / 10u64.pow(decimals as u32 - 2)
    } else {
        (amount % scale) * 10
    };
    format!("{}.{:02}", add_thousand_separators(&whole.to_string()), frac)
}

/// Format a raw token balance at the mint's full precision
pub fn format_token_balance(amount: u64, decimals: u8) -> String {
    if decimals == 0 {
        return add_thousand_separators(&amount.to_string());
    }
    let scale = 10u64.pow(decimals as u32);
    let whole = amount / scale;
    let frac = amount % scale;
    format!(
        "{}.{:0width$}",
        add_thousand_separators(&whole.to_string()),
        frac,
        width = decimals as usize
    )
}

/// Format a vote count with thousand separators
pub fn format_votes(votes: u64) -> String {
    add_thousand_separators(&votes.to_string())
}

/// Add thousand separators to a numeric string
fn add_thousand_separators(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::new();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result
}

/// Human-readable time left until a deadline, coarsening with distance
pub fn format_time_remaining(deadline: i64, now: i64) -> String {
    let diff = deadline - now;
    if diff <= 0 {
        return "Ended".to_string();
    }

    let days = diff / 86_400;
    let hours = (diff % 86_400) / 3_600;
    let minutes = (diff % 3_600) / 60;
    let seconds = diff % 60;

    if days > 0 {
        format!("{}d {}h remaining", days, hours)
    } else if hours > 0 {
        format!("{}h {}m remaining", hours, minutes)
    } else if minutes > 0 {
        format!("{}m {}s remaining", minutes, seconds)
    } else {
        format!("{}s remaining", seconds)
    }
}

/// Render a unix deadline as a UTC date string
pub fn format_deadline_utc(deadline: i64) -> String {
    match chrono::DateTime::from_timestamp(deadline, 0) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M UTC").to_string(),
        None => format!("unix {}", deadline),
    }
}
