use rusty_ballot_client_core::interface::CodecError;
use rusty_ballot_client_core::{
    decode_account, encode_account, units, Proposal, ProposalCounter, TreasuryConfig, Voter,
};
use solana_sdk::pubkey::Pubkey;

fn sample_config() -> TreasuryConfig {
    TreasuryConfig {
        authority: Pubkey::new_unique(),
        x_mint: Pubkey::new_unique(),
        treasury_token_account: Pubkey::new_unique(),
        sol_price: 1_000_000_000,
        tokens_per_purchase: 1_000_000_000,
        bump: 254,
    }
}

fn sample_proposal() -> Proposal {
    Proposal {
        proposal_id: 3,
        proposal_info: "new library wing".to_owned(),
        number_of_votes: 42_000_000,
        deadline: 1_760_000_000,
        authority: Pubkey::new_unique(),
        bump: 255,
    }
}

#[test]
fn treasury_config_roundtrips_through_account_bytes() {
    let config = sample_config();
    let data = encode_account(&config).expect("encode config");
    let decoded: TreasuryConfig = decode_account(&data).expect("decode config");
    assert_eq!(decoded, config);
}

#[test]
fn decode_tolerates_allocation_padding_after_body() {
    // On-chain accounts are sized for the maximum description length, so a
    // short description leaves trailing zeros after the borsh body.
    let proposal = sample_proposal();
    let mut data = encode_account(&proposal).expect("encode proposal");
    data.extend_from_slice(&[0u8; 64]);
    let decoded: Proposal = decode_account(&data).expect("decode padded proposal");
    assert_eq!(decoded, proposal);
}

#[test]
fn decode_rejects_short_buffers() {
    let err = decode_account::<TreasuryConfig>(&[0x7c, 0x36, 0xd4]).unwrap_err();
    assert!(matches!(err, CodecError::TooShort("TreasuryConfig")));
}

#[test]
fn decode_rejects_foreign_discriminator() {
    let voter = Voter {
        voter_id: Pubkey::new_unique(),
        proposal_voted: 0,
        bump: 253,
    };
    let data = encode_account(&voter).expect("encode voter");
    let err = decode_account::<ProposalCounter>(&data).unwrap_err();
    assert!(matches!(err, CodecError::BadDiscriminator("ProposalCounter")));
}

#[test]
fn decode_rejects_truncated_body() {
    let data = encode_account(&sample_proposal()).expect("encode proposal");
    let err = decode_account::<Proposal>(&data[..14]).unwrap_err();
    assert!(matches!(err, CodecError::Body { kind: "Proposal", .. }));
}

#[test]
fn proposal_activity_is_strict_on_the_deadline() {
    let proposal = sample_proposal();
    assert!(proposal.is_active(proposal.deadline - 1));
    assert!(!proposal.is_active(proposal.deadline));
    assert!(!proposal.is_active(proposal.deadline + 1));
}

#[test]
fn voter_sentinel_marks_unvoted() {
    let mut voter = Voter {
        voter_id: Pubkey::new_unique(),
        proposal_voted: 0,
        bump: 252,
    };
    assert!(!voter.has_voted());
    voter.proposal_voted = 3;
    assert!(voter.has_voted());
}

#[test]
fn unit_conversions_floor_toward_zero() {
    assert_eq!(units::sol_to_lamports(1.5), 1_500_000_000);
    assert_eq!(units::sol_to_lamports(0.000000001), 1);
    assert_eq!(units::tokens_to_raw(10.5), 10_500_000);
    assert_eq!(units::tokens_to_raw(0.1234567), 123_456);
    assert_eq!(units::tokens_to_raw(0.0), 0);
}

#[test]
fn unit_conversions_display_values() {
    assert_eq!(units::lamports_to_sol(2_000_000_000), 2.0);
    assert_eq!(units::raw_to_tokens(2_500_000), 2.5);
    assert_eq!(units::raw_to_tokens(0), 0.0);
}
