use solana_sdk::instruction::Instruction;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::Transaction;

use crate::domain::{
    Proposal, ProposalCounter, ProposalSummary, TokenBalanceView, TreasuryConfig,
    TreasuryOverview, Voter, VoterStatus,
};
use crate::interface::{decode_account, ProgramAccount, VoteProgram};
use crate::ports::{ChainPort, ClockPort, PortError, WalletPort};
use crate::units::TOKEN_DECIMALS;

pub struct DashboardClient<C, W, K>
where
    C: ChainPort,
    W: WalletPort,
    K: ClockPort,
{
    pub chain: C,
    pub wallet: W,
    pub clock: K,
    pub program: VoteProgram,
}

impl<C, W, K> DashboardClient<C, W, K>
where
    C: ChainPort,
    W: WalletPort,
    K: ClockPort,
{
    pub fn new(chain: C, wallet: W, clock: K, program_id: Pubkey) -> Self {
        Self {
            chain,
            wallet,
            clock,
            program: VoteProgram::new(program_id),
        }
    }

    fn submit(&self, instructions: &[Instruction]) -> Result<Signature, PortError> {
        let payer = self.wallet.address()?;
        let mut tx = Transaction::new_with_payer(instructions, Some(&payer));
        let recent_blockhash = self.chain.latest_blockhash()?;
        self.wallet.sign_transaction(&mut tx, recent_blockhash)?;
        self.chain.send_transaction(&tx)
    }

    fn fetch_decoded<T: ProgramAccount>(&self, address: &Pubkey) -> Result<Option<T>, PortError> {
        match self.chain.get_account(address)? {
            Some(account) => decode_account::<T>(&account.data)
                .map(Some)
                .map_err(|e| PortError::Validation(e.to_string())),
            None => Ok(None),
        }
    }

    fn treasury_config_or_err(&self) -> Result<TreasuryConfig, PortError> {
        self.fetch_decoded::<TreasuryConfig>(&self.program.treasury_config_address())?
            .ok_or_else(|| PortError::NotFound("treasury is not initialized".to_owned()))
    }

    fn proposal_counter_or_err(&self) -> Result<ProposalCounter, PortError> {
        self.fetch_decoded::<ProposalCounter>(&self.program.proposal_counter_address())?
            .ok_or_else(|| {
                PortError::NotFound(
                    "proposal counter not initialized; initialize treasury first".to_owned(),
                )
            })
    }

    pub fn initialize_treasury(
        &self,
        sol_price: u64,
        tokens_per_purchase: u64,
    ) -> Result<Signature, PortError> {
        let authority = self.wallet.address()?;
        let ix = self
            .program
            .initialize_treasury(&authority, sol_price, tokens_per_purchase);
        self.submit(&[ix])
    }

    pub fn buy_tokens(&self) -> Result<Signature, PortError> {
        let buyer = self.wallet.address()?;
        let config = self.treasury_config_or_err()?;
        let token_account = self.program.token_account_for(&buyer);
        let mut instructions = Vec::with_capacity(2);
        if self.chain.get_account(&token_account)?.is_none() {
            instructions.push(self.program.create_token_account(&buyer, &buyer));
        }
        instructions.push(
            self.program
                .buy_tokens(&buyer, &config.treasury_token_account),
        );
        self.submit(&instructions)
    }

    pub fn register_voter(&self) -> Result<Signature, PortError> {
        let signer = self.wallet.address()?;
        self.submit(&[self.program.register_voter(&signer)])
    }

    pub fn register_proposal(
        &self,
        description: &str,
        deadline: i64,
        token_stake: u64,
    ) -> Result<Signature, PortError> {
        if description.trim().is_empty() {
            return Err(PortError::Validation(
                "proposal description must not be empty".to_owned(),
            ));
        }
        if token_stake == 0 {
            return Err(PortError::Validation(
                "token stake must be greater than zero".to_owned(),
            ));
        }
        if deadline <= self.clock.unix_now()? {
            return Err(PortError::Validation(
                "deadline must be in the future".to_owned(),
            ));
        }
        let signer = self.wallet.address()?;
        let config = self.treasury_config_or_err()?;
        let counter = self.proposal_counter_or_err()?;
        let ix = self.program.register_proposal(
            &signer,
            counter.proposal_count,
            &config.treasury_token_account,
            description,
            deadline,
            token_stake,
        );
        self.submit(&[ix])
    }

    pub fn proposal_to_vote(
        &self,
        proposal_id: u8,
        token_stake: u64,
    ) -> Result<Signature, PortError> {
        if token_stake == 0 {
            return Err(PortError::Validation(
                "token stake must be greater than zero".to_owned(),
            ));
        }
        let signer = self.wallet.address()?;
        let config = self.treasury_config_or_err()?;
        let ix = self.program.proposal_to_vote(
            &signer,
            proposal_id,
            &config.treasury_token_account,
            token_stake,
        );
        self.submit(&[ix])
    }

    pub fn pick_winner(&self, proposal_id: u8) -> Result<Signature, PortError> {
        let signer = self.wallet.address()?;
        self.submit(&[self.program.pick_winner(&signer, proposal_id)])
    }

    // Rent from the closed proposal account goes back to the signer.
    pub fn close_proposal(&self, proposal_id: u8) -> Result<Signature, PortError> {
        let signer = self.wallet.address()?;
        self.submit(&[self.program.close_proposal(&signer, &signer, proposal_id)])
    }

    pub fn close_voter(&self) -> Result<Signature, PortError> {
        let signer = self.wallet.address()?;
        self.submit(&[self.program.close_voter(&signer)])
    }

    pub fn withdraw_sol(&self, amount: u64) -> Result<Signature, PortError> {
        if amount == 0 {
            return Err(PortError::Validation(
                "withdraw amount must be greater than zero".to_owned(),
            ));
        }
        let authority = self.wallet.address()?;
        self.submit(&[self.program.withdraw_sol(&authority, amount)])
    }

    pub fn treasury_overview(&self) -> Result<TreasuryOverview, PortError> {
        let treasury_config_address = self.program.treasury_config_address();
        let sol_vault_address = self.program.sol_vault_address();
        let config = self.fetch_decoded::<TreasuryConfig>(&treasury_config_address)?;
        let sol_vault_lamports = self.chain.get_balance(&sol_vault_address)?;
        Ok(TreasuryOverview {
            treasury_config_address,
            sol_vault_address,
            sol_vault_lamports,
            config,
        })
    }

    pub fn token_balance(&self) -> Result<TokenBalanceView, PortError> {
        let owner = self.wallet.address()?;
        let token_account = self.program.token_account_for(&owner);
        Ok(match self.chain.get_token_balance(&token_account)? {
            Some(balance) => TokenBalanceView {
                token_account,
                amount: balance.amount,
                decimals: balance.decimals,
            },
            None => TokenBalanceView {
                token_account,
                amount: 0,
                decimals: TOKEN_DECIMALS,
            },
        })
    }

    pub fn voter_status(&self) -> Result<VoterStatus, PortError> {
        let owner = self.wallet.address()?;
        match self.fetch_decoded::<Voter>(&self.program.voter_address(&owner))? {
            Some(voter) => Ok(VoterStatus::Registered(voter)),
            None => Ok(VoterStatus::NotRegistered),
        }
    }

    pub fn fetch_proposal(&self, proposal_id: u8) -> Result<ProposalSummary, PortError> {
        let address = self.program.proposal_address(proposal_id);
        let proposal = self
            .fetch_decoded::<Proposal>(&address)?
            .ok_or_else(|| PortError::NotFound(format!("proposal #{proposal_id} not found")))?;
        let now = self.clock.unix_now()?;
        Ok(ProposalSummary {
            address,
            active: proposal.is_active(now),
            proposal,
        })
    }

    pub fn list_proposals(&self) -> Result<Vec<ProposalSummary>, PortError> {
        let counter = self.proposal_counter_or_err()?;
        let now = self.clock.unix_now()?;
        let mut proposals = Vec::new();
        for proposal_id in 0..counter.proposal_count {
            let address = self.program.proposal_address(proposal_id);
            let account = match self.chain.get_account(&address)? {
                Some(account) => account,
                None => continue,
            };
            // Closed proposals leave gaps in the id range; skip anything
            // that no longer decodes.
            let proposal = match decode_account::<Proposal>(&account.data) {
                Ok(proposal) => proposal,
                Err(_) => continue,
            };
            proposals.push(ProposalSummary {
                address,
                active: proposal.is_active(now),
                proposal,
            });
        }
        proposals.sort_by(|a, b| {
            b.active
                .cmp(&a.active)
                .then(b.proposal.deadline.cmp(&a.proposal.deadline))
        });
        Ok(proposals)
    }
}
