pub mod domain;
pub mod flows;
pub mod interface;
pub mod ports;
pub mod units;

pub use domain::{
    AccountData, Proposal, ProposalCounter, ProposalSummary, TokenBalance, TokenBalanceView,
    TreasuryConfig, TreasuryOverview, Voter, VoterStatus,
};
pub use flows::DashboardClient;
pub use interface::{decode_account, encode_account, CodecError, ProgramAccount, VoteProgram};
pub use ports::{ChainPort, ClockPort, PortError, WalletPort};
