use solana_sdk::native_token::LAMPORTS_PER_SOL;

pub const TOKEN_DECIMALS: u8 = 6;
pub const RAW_PER_TOKEN: u64 = 1_000_000;

pub fn sol_to_lamports(sol: f64) -> u64 {
    (sol * LAMPORTS_PER_SOL as f64).floor() as u64
}

pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL as f64
}

pub fn tokens_to_raw(tokens: f64) -> u64 {
    (tokens * RAW_PER_TOKEN as f64).floor() as u64
}

pub fn raw_to_tokens(raw: u64) -> f64 {
    raw as f64 / RAW_PER_TOKEN as f64
}
