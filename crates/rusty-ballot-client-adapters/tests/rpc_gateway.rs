use std::sync::{Arc, Mutex};
use std::thread;

use base64::Engine as _;
use serde_json::{json, Value};
use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature, Signer};
use solana_sdk::transaction::Transaction;
use tiny_http::{Response, Server, StatusCode};

use rusty_ballot_client_adapters::{ClientConfig, HttpRpcGateway};
use rusty_ballot_client_core::{
    decode_account, encode_account, ChainPort, PortError, TreasuryConfig, VoteProgram,
};

#[derive(Clone)]
struct NodeFixture {
    config_address: String,
    config_data_b64: String,
    program_id: String,
    token_account: String,
    broken_address: String,
    blockhash: String,
    signature: String,
}

impl Default for NodeFixture {
    fn default() -> Self {
        Self {
            config_address: Pubkey::new_unique().to_string(),
            config_data_b64: String::new(),
            program_id: Pubkey::new_unique().to_string(),
            token_account: Pubkey::new_unique().to_string(),
            broken_address: Pubkey::new_unique().to_string(),
            blockhash: Hash::new_from_array([9; 32]).to_string(),
            signature: Signature::from([3; 64]).to_string(),
        }
    }
}

#[test]
fn gateway_fetches_and_decodes_program_accounts() {
    let program_id = Pubkey::new_unique();
    let config_address = Pubkey::new_unique();
    let config = TreasuryConfig {
        authority: Pubkey::new_unique(),
        x_mint: Pubkey::new_unique(),
        treasury_token_account: Pubkey::new_unique(),
        sol_price: 2_000_000_000,
        tokens_per_purchase: 500_000_000,
        bump: 254,
    };
    let data = encode_account(&config).expect("encode config");

    let fixture = NodeFixture {
        config_address: config_address.to_string(),
        config_data_b64: base64::engine::general_purpose::STANDARD.encode(&data),
        program_id: program_id.to_string(),
        ..NodeFixture::default()
    };
    let calls = Arc::new(Mutex::new(Vec::new()));
    let (url, _join) = spawn_mock_node(fixture, Arc::clone(&calls));
    let gateway = new_gateway(url);

    let account = gateway
        .get_account(&config_address)
        .expect("get account")
        .expect("account present");
    assert_eq!(account.lamports, 1_461_600);
    assert_eq!(account.owner, program_id);
    let decoded = decode_account::<TreasuryConfig>(&account.data).expect("decode config");
    assert_eq!(decoded, config);

    let missing = gateway
        .get_account(&Pubkey::new_unique())
        .expect("missing account lookup");
    assert!(missing.is_none());

    let calls = calls.lock().expect("calls lock");
    assert!(calls.iter().any(|c| {
        c["method"] == "getAccountInfo"
            && c["params"][1]["encoding"] == "base64"
            && c["params"][1]["commitment"] == "processed"
    }));
}

#[test]
fn gateway_reads_balances_and_blockhash() {
    let token_account = Pubkey::new_unique();
    let broken_address = Pubkey::new_unique();
    let blockhash = Hash::new_from_array([9; 32]);

    let fixture = NodeFixture {
        token_account: token_account.to_string(),
        broken_address: broken_address.to_string(),
        blockhash: blockhash.to_string(),
        ..NodeFixture::default()
    };
    let calls = Arc::new(Mutex::new(Vec::new()));
    let (url, _join) = spawn_mock_node(fixture, Arc::clone(&calls));
    let gateway = new_gateway(url);

    assert_eq!(
        gateway.get_balance(&Pubkey::new_unique()).expect("balance"),
        5_000_000_000
    );

    let balance = gateway
        .get_token_balance(&token_account)
        .expect("token balance")
        .expect("balance present");
    assert_eq!(balance.amount, 2_500_000);
    assert_eq!(balance.decimals, 6);

    let missing = gateway
        .get_token_balance(&Pubkey::new_unique())
        .expect("missing token account maps to none");
    assert!(missing.is_none());

    assert_eq!(gateway.latest_blockhash().expect("blockhash"), blockhash);

    let err = gateway.get_balance(&broken_address).expect_err("node error");
    assert!(matches!(err, PortError::Rpc { code: -32002, .. }));
    assert!(err.to_string().contains("Transaction simulation failed"));
}

#[test]
fn gateway_ships_signed_transactions_over_the_wire() {
    let keypair = Keypair::new();
    let signature = Signature::from([3; 64]);
    let fixture = NodeFixture::default();

    let calls = Arc::new(Mutex::new(Vec::new()));
    let (url, _join) = spawn_mock_node(fixture, Arc::clone(&calls));
    let gateway = new_gateway(url);

    let program = VoteProgram::new(Pubkey::new_unique());
    let ix = program.register_voter(&keypair.pubkey());
    let mut tx = Transaction::new_with_payer(&[ix], Some(&keypair.pubkey()));
    tx.try_sign(&[&keypair], Hash::new_from_array([9; 32]))
        .expect("sign");

    let returned = gateway.send_transaction(&tx).expect("send transaction");
    assert_eq!(returned, signature);

    let calls = calls.lock().expect("calls lock");
    let send = calls
        .iter()
        .find(|c| c["method"] == "sendTransaction")
        .expect("send call recorded");
    assert_eq!(send["params"][1]["encoding"], "base64");
    let wire = send["params"][0].as_str().expect("wire payload");
    let raw = base64::engine::general_purpose::STANDARD
        .decode(wire)
        .expect("base64 wire");
    let decoded: Transaction = bincode::deserialize(&raw).expect("decode transaction");
    assert_eq!(decoded, tx);
}

#[test]
fn gateway_surfaces_transport_failures() {
    let server = Server::http("127.0.0.1:0").expect("start server");
    let url = format!("http://{}", server.server_addr());
    let _join = thread::spawn(move || {
        if let Ok(req) = server.recv() {
            let response = Response::from_string(json!({"error": "boom"}).to_string())
                .with_status_code(StatusCode(500));
            let _ = req.respond(response);
        }
    });
    let gateway = new_gateway(url);

    let err = gateway
        .get_balance(&Pubkey::new_unique())
        .expect_err("transport error");
    assert!(matches!(err, PortError::Transport(_)));
    assert!(err.to_string().contains("500"));
}

fn new_gateway(url: String) -> HttpRpcGateway {
    let config = ClientConfig {
        rpc_url: url,
        request_timeout_ms: 5_000,
        ..ClientConfig::default()
    };
    HttpRpcGateway::with_config(&config).expect("gateway")
}

fn spawn_mock_node(
    fixture: NodeFixture,
    calls: Arc<Mutex<Vec<Value>>>,
) -> (String, thread::JoinHandle<()>) {
    let server = Server::http("127.0.0.1:0").expect("start server");
    let addr = format!("http://{}", server.server_addr());

    let join = thread::spawn(move || {
        for _ in 0..16 {
            let mut req = match server.recv() {
                Ok(r) => r,
                Err(_) => break,
            };
            let mut raw = String::new();
            if req.as_reader().read_to_string(&mut raw).is_err() {
                break;
            }
            let body: Value = serde_json::from_str(&raw).unwrap_or(Value::Null);
            if let Ok(mut g) = calls.lock() {
                g.push(body.clone());
            }

            let method = body.get("method").and_then(Value::as_str).unwrap_or("");
            let first_param = body
                .get("params")
                .and_then(Value::as_array)
                .and_then(|params| params.first())
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_owned();

            let payload = match (method, first_param.as_str()) {
                ("getAccountInfo", address) if address == fixture.config_address => json!({
                    "jsonrpc": "2.0", "id": 1,
                    "result": {
                        "context": {"slot": 341},
                        "value": {
                            "lamports": 1_461_600u64,
                            "owner": fixture.program_id,
                            "data": [fixture.config_data_b64, "base64"],
                            "executable": false,
                            "rentEpoch": 0
                        }
                    }
                }),
                ("getAccountInfo", _) => json!({
                    "jsonrpc": "2.0", "id": 1,
                    "result": {"context": {"slot": 341}, "value": null}
                }),
                ("getBalance", address) if address == fixture.broken_address => json!({
                    "jsonrpc": "2.0", "id": 1,
                    "error": {"code": -32002, "message": "Transaction simulation failed"}
                }),
                ("getBalance", _) => json!({
                    "jsonrpc": "2.0", "id": 1,
                    "result": {"context": {"slot": 341}, "value": 5_000_000_000u64}
                }),
                ("getTokenAccountBalance", address) if address == fixture.token_account => json!({
                    "jsonrpc": "2.0", "id": 1,
                    "result": {
                        "context": {"slot": 341},
                        "value": {
                            "amount": "2500000",
                            "decimals": 6,
                            "uiAmount": 2.5,
                            "uiAmountString": "2.5"
                        }
                    }
                }),
                ("getTokenAccountBalance", _) => json!({
                    "jsonrpc": "2.0", "id": 1,
                    "error": {"code": -32602, "message": "Invalid param: could not find account"}
                }),
                ("getLatestBlockhash", _) => json!({
                    "jsonrpc": "2.0", "id": 1,
                    "result": {
                        "context": {"slot": 341},
                        "value": {"blockhash": fixture.blockhash, "lastValidBlockHeight": 350}
                    }
                }),
                ("sendTransaction", _) => json!({
                    "jsonrpc": "2.0", "id": 1, "result": fixture.signature
                }),
                _ => json!({
                    "jsonrpc": "2.0", "id": 1,
                    "error": {"code": -32601, "message": "Method not found"}
                }),
            };

            let response =
                Response::from_string(payload.to_string()).with_status_code(StatusCode(200));
            let _ = req.respond(response);
        }
    });

    (addr, join)
}
