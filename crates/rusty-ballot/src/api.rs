//! Async cluster helpers driven from the GUI
//!
//! The dashboard client talks to the node through its own blocking
//! gateway; these calls are the GUI-only extras (faucet, node banner)
//! that run on a worker runtime instead.

use std::str::FromStr;

use eyre::{Result, WrapErr};
use serde::Deserialize;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;

#[derive(Debug, Deserialize)]
struct RpcEnvelope {
    result: Option<serde_json::Value>,
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

async fn rpc_call(
    rpc_url: &str,
    method: &str,
    params: serde_json::Value,
) -> Result<serde_json::Value> {
    let body = serde_json::json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": method,
        "params": params,
    });

    let response = reqwest::Client::new()
        .post(rpc_url)
        .json(&body)
        .send()
        .await
        .wrap_err_with(|| format!("Failed to reach the RPC node at {}", rpc_url))?;

    if !response.status().is_success() {
        eyre::bail!("RPC node returned {}", response.status());
    }

    let envelope: RpcEnvelope = response
        .json()
        .await
        .wrap_err_with(|| format!("Failed to parse the {} response", method))?;

    if let Some(err) = envelope.error {
        eyre::bail!("{} refused ({}): {}", method, err.code, err.message);
    }

    envelope
        .result
        .ok_or_else(|| eyre::eyre!("{} response carried no result", method))
}

/// Request an airdrop of `lamports` to `address`.
///
/// Only test-cluster nodes honor this; mainnet RPC rejects it and the
/// error surfaces in the sidebar.
pub async fn request_airdrop(
    rpc_url: &str,
    address: &Pubkey,
    lamports: u64,
) -> Result<Signature> {
    let result = rpc_call(
        rpc_url,
        "requestAirdrop",
        serde_json::json!([address.to_string(), lamports]),
    )
    .await?;

    let signature = result
        .as_str()
        .ok_or_else(|| eyre::eyre!("Airdrop response carried no signature"))?;
    Signature::from_str(signature).wrap_err("Airdrop signature did not parse")
}

/// Fetch the node's solana-core version for the sidebar banner
pub async fn fetch_node_version(rpc_url: &str) -> Result<String> {
    let result = rpc_call(rpc_url, "getVersion", serde_json::json!([])).await?;
    result
        .get("solana-core")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| eyre::eyre!("getVersion response carried no solana-core field"))
}
