pub mod clock;
pub mod config;
pub mod memory;
pub mod rpc;
pub mod wallet;

pub use clock::SystemClock;
pub use config::{ClientConfig, RuntimeProfile};
pub use memory::InMemoryLedger;
pub use rpc::HttpRpcGateway;
pub use wallet::KeypairWallet;
