use std::str::FromStr;
use std::time::Duration;

use base64::Engine as _;
use serde_json::{json, Value};
use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::Transaction;

use rusty_ballot_client_core::{AccountData, ChainPort, PortError, TokenBalance};

use crate::ClientConfig;

#[derive(Debug, Clone)]
pub struct HttpRpcGateway {
    endpoint: String,
    commitment: String,
    client: reqwest::blocking::Client,
}

impl HttpRpcGateway {
    pub fn with_config(config: &ClientConfig) -> Result<Self, PortError> {
        let timeout = Duration::from_millis(config.request_timeout_ms);
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PortError::Transport(format!("rpc client init failed: {e}")))?;
        Ok(Self {
            endpoint: config.rpc_url.clone(),
            commitment: config.commitment.clone(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn rpc_call(&self, method: &str, params: Value) -> Result<Value, PortError> {
        let payload = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });
        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .map_err(|e| PortError::Transport(format!("rpc request failed: {e}")))?;
        let status = response.status();
        let body: Value = response
            .json()
            .map_err(|e| PortError::Transport(format!("rpc json decode failed: {e}")))?;
        if !status.is_success() {
            return Err(PortError::Transport(format!(
                "rpc status {}: {}",
                status, body
            )));
        }
        if let Some(err) = body.get("error") {
            let code = err.get("code").and_then(Value::as_i64).unwrap_or(0);
            let message = err
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown rpc error")
                .to_owned();
            return Err(PortError::Rpc { code, message });
        }
        body.get("result")
            .cloned()
            .ok_or_else(|| PortError::Transport("rpc response missing result".to_owned()))
    }
}

impl ChainPort for HttpRpcGateway {
    fn get_account(&self, address: &Pubkey) -> Result<Option<AccountData>, PortError> {
        let params = json!([
            address.to_string(),
            { "encoding": "base64", "commitment": self.commitment },
        ]);
        let result = self.rpc_call("getAccountInfo", params)?;
        let value = result.get("value").cloned().unwrap_or(Value::Null);
        if value.is_null() {
            return Ok(None);
        }
        let lamports = value
            .get("lamports")
            .and_then(Value::as_u64)
            .ok_or_else(|| PortError::Transport("account info missing lamports".to_owned()))?;
        let owner_raw = value
            .get("owner")
            .and_then(Value::as_str)
            .ok_or_else(|| PortError::Transport("account info missing owner".to_owned()))?;
        let owner = Pubkey::from_str(owner_raw)
            .map_err(|e| PortError::Transport(format!("invalid account owner: {e}")))?;
        let data_b64 = value
            .get("data")
            .and_then(Value::as_array)
            .and_then(|pair| pair.first())
            .and_then(Value::as_str)
            .ok_or_else(|| PortError::Transport("account info missing data".to_owned()))?;
        let data = base64::engine::general_purpose::STANDARD
            .decode(data_b64)
            .map_err(|e| PortError::Transport(format!("account data decode failed: {e}")))?;
        Ok(Some(AccountData {
            lamports,
            owner,
            data,
        }))
    }

    fn get_balance(&self, address: &Pubkey) -> Result<u64, PortError> {
        let params = json!([address.to_string(), { "commitment": self.commitment }]);
        let result = self.rpc_call("getBalance", params)?;
        result
            .get("value")
            .and_then(Value::as_u64)
            .ok_or_else(|| PortError::Transport("balance missing from response".to_owned()))
    }

    fn get_token_balance(&self, token_account: &Pubkey) -> Result<Option<TokenBalance>, PortError> {
        let params = json!([token_account.to_string(), { "commitment": self.commitment }]);
        let result = match self.rpc_call("getTokenAccountBalance", params) {
            Ok(result) => result,
            // A never-created token account comes back as an invalid-param
            // error rather than a null value.
            Err(PortError::Rpc { code: -32602, .. }) => return Ok(None),
            Err(e) => return Err(e),
        };
        let value = result.get("value").cloned().unwrap_or(Value::Null);
        let amount_raw = value
            .get("amount")
            .and_then(Value::as_str)
            .ok_or_else(|| PortError::Transport("token balance missing amount".to_owned()))?;
        let amount = amount_raw
            .parse::<u64>()
            .map_err(|e| PortError::Transport(format!("token amount parse failed: {e}")))?;
        let decimals = value
            .get("decimals")
            .and_then(Value::as_u64)
            .ok_or_else(|| PortError::Transport("token balance missing decimals".to_owned()))?
            as u8;
        Ok(Some(TokenBalance { amount, decimals }))
    }

    fn latest_blockhash(&self) -> Result<Hash, PortError> {
        let params = json!([{ "commitment": self.commitment }]);
        let result = self.rpc_call("getLatestBlockhash", params)?;
        let blockhash = result
            .get("value")
            .and_then(|value| value.get("blockhash"))
            .and_then(Value::as_str)
            .ok_or_else(|| PortError::Transport("blockhash missing from response".to_owned()))?;
        Hash::from_str(blockhash)
            .map_err(|e| PortError::Transport(format!("invalid blockhash: {e}")))
    }

    fn send_transaction(&self, tx: &Transaction) -> Result<Signature, PortError> {
        let wire = bincode::serialize(tx)
            .map_err(|e| PortError::Validation(format!("transaction encode failed: {e}")))?;
        let encoded = base64::engine::general_purpose::STANDARD.encode(wire);
        let params = json!([
            encoded,
            { "encoding": "base64", "preflightCommitment": self.commitment },
        ]);
        let result = self.rpc_call("sendTransaction", params)?;
        let signature = result
            .as_str()
            .ok_or_else(|| PortError::Transport("signature missing from response".to_owned()))?;
        Signature::from_str(signature)
            .map_err(|e| PortError::Transport(format!("invalid signature: {e}")))
    }
}
