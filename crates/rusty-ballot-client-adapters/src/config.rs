#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeProfile {
    Production,
    Test,
}

impl RuntimeProfile {
    pub fn deterministic_wallet_allowed(self) -> bool {
        matches!(self, RuntimeProfile::Test)
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub rpc_url: String,
    pub commitment: String,
    pub program_id: String,
    pub keypair_path: String,
    pub cluster: String,
    pub request_timeout_ms: u64,
    pub profile: RuntimeProfile,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://127.0.0.1:8899".to_owned(),
            commitment: "processed".to_owned(),
            program_id: "EjdSNqQr9ZrKzuT7TY6E9zXvMcYNQptJewTZA3B3DWJB".to_owned(),
            keypair_path: default_keypair_path(),
            cluster: "custom".to_owned(),
            request_timeout_ms: 15_000,
            profile: RuntimeProfile::Production,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            rpc_url: env_or("RUSTY_BALLOT_RPC_URL", &defaults.rpc_url),
            commitment: env_or("RUSTY_BALLOT_COMMITMENT", &defaults.commitment),
            program_id: env_or("RUSTY_BALLOT_PROGRAM_ID", &defaults.program_id),
            keypair_path: env_or("RUSTY_BALLOT_KEYPAIR", &defaults.keypair_path),
            cluster: env_or("RUSTY_BALLOT_CLUSTER", &defaults.cluster),
            request_timeout_ms: std::env::var("RUSTY_BALLOT_TIMEOUT_MS")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(defaults.request_timeout_ms),
            profile: match std::env::var("RUSTY_BALLOT_PROFILE").as_deref() {
                Ok("test") => RuntimeProfile::Test,
                _ => RuntimeProfile::Production,
            },
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn default_keypair_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_owned());
    format!("{home}/.config/solana/id.json")
}
