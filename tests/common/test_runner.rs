use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{
    program_option::COption, program_pack::Pack, pubkey::Pubkey, rent::Rent,
    system_instruction, system_program, sysvar,
};
use solana_program_test::{processor, BanksClientError, ProgramTest, ProgramTestContext};
use solana_sdk::{
    account::Account,
    instruction::Instruction,
    native_token::LAMPORTS_PER_SOL,
    signature::{Keypair, Signer},
};

use ico_access::{
    entrypoint::process_instruction,
    instruction::{
        access_resource, buy, initialize, register_resource, sell, withdraw_from_escrow,
    },
    pda::{find_escrow_address, find_resource_address, find_sale_state_address},
    state::{OverpaymentPolicy, ResourceRecord, SaleState},
};

use crate::common::utils::{add_mint, add_token_account, mint_bootstrap, sign_send_instructions};
use spl_token::state::Mint;

pub struct TestRunner {
    pub program_id: Pubkey,
    prg_test_ctx: ProgramTestContext,
    pub owner: Keypair,
    pub mint: Pubkey,
    // A mint the sale state has no authority over
    pub foreign_mint: Pubkey,
    // Sale state authority, but units already in circulation
    pub supplied_mint: Pubkey,
    // Sale state authority, but someone else can freeze
    pub freezable_mint: Pubkey,
    pub sale_state: Pubkey,
    pub escrow: Pubkey,
    // Token accounts by wallet, for the sale mint
    token_accounts: std::collections::HashMap<Pubkey, Pubkey>,
}

/// A sale written straight into the ledger before the test starts
struct SalePreset {
    total_supply: u64,
    base_price: u64,
    scaling_factor: u64,
    units_sold: u64,
}

impl TestRunner {
    pub async fn new() -> Result<Self, BanksClientError> {
        let (tr, _) = Self::start(None).await?;
        Ok(tr)
    }

    /// Starts with a running sale whose `units_sold` units are all held by the returned wallet
    pub async fn new_with_sale(
        total_supply: u64,
        base_price: u64,
        scaling_factor: u64,
        units_sold: u64,
    ) -> Result<(Self, Keypair), BanksClientError> {
        let (tr, holder) = Self::start(Some(SalePreset {
            total_supply,
            base_price,
            scaling_factor,
            units_sold,
        }))
        .await?;
        Ok((tr, holder.unwrap()))
    }

    async fn start(preset: Option<SalePreset>) -> Result<(Self, Option<Keypair>), BanksClientError> {
        // Create program and test environment
        let program_id = ico_access::ID;

        let mut program_test = ProgramTest::new(
            "ico_access",
            program_id,
            processor!(process_instruction),
        );

        //
        // Derive the sale addresses of the owner
        //
        let owner = Keypair::new();
        let (sale_state, nonce) = find_sale_state_address(&owner.pubkey(), &program_id).unwrap();
        let (escrow, escrow_nonce) = find_escrow_address(&owner.pubkey(), &program_id).unwrap();

        //
        // Create mints
        //
        let mint = Pubkey::new_unique();
        let supply = preset.as_ref().map(|p| p.units_sold).unwrap_or(0);
        add_mint(
            &mint,
            &mut program_test,
            Mint {
                mint_authority: COption::Some(sale_state),
                supply,
                decimals: 0,
                is_initialized: true,
                freeze_authority: COption::None,
            },
        );
        let foreign_mint = Pubkey::new_unique();
        mint_bootstrap(&foreign_mint, 0, &mut program_test, &Pubkey::new_unique());
        let supplied_mint = Pubkey::new_unique();
        add_mint(
            &supplied_mint,
            &mut program_test,
            Mint {
                mint_authority: COption::Some(sale_state),
                supply: 1_000,
                decimals: 0,
                is_initialized: true,
                freeze_authority: COption::None,
            },
        );
        let freezable_mint = Pubkey::new_unique();
        add_mint(
            &freezable_mint,
            &mut program_test,
            Mint {
                mint_authority: COption::Some(sale_state),
                supply: 0,
                decimals: 0,
                is_initialized: true,
                freeze_authority: COption::Some(Pubkey::new_unique()),
            },
        );

        program_test.add_account(
            owner.pubkey(),
            Account {
                lamports: 100 * LAMPORTS_PER_SOL,
                ..Account::default()
            },
        );

        //
        // Write the preset sale, its escrow and the holder of every sold unit
        //
        let mut token_accounts = std::collections::HashMap::new();
        let holder = preset.map(|preset| {
            let rent = Rent::default();
            let mut state = SaleState::new(
                owner.pubkey(),
                mint,
                preset.total_supply,
                preset.base_price,
                preset.scaling_factor,
                escrow,
                nonce,
                escrow_nonce,
            );
            state.units_sold = preset.units_sold;
            let data = state.try_to_vec().unwrap();
            program_test.add_account(
                sale_state,
                Account {
                    lamports: rent.minimum_balance(data.len()),
                    data,
                    owner: program_id,
                    ..Account::default()
                },
            );
            program_test.add_account(
                escrow,
                Account {
                    lamports: rent.minimum_balance(0),
                    owner: program_id,
                    ..Account::default()
                },
            );

            let holder = Keypair::new();
            program_test.add_account(
                holder.pubkey(),
                Account {
                    lamports: LAMPORTS_PER_SOL,
                    ..Account::default()
                },
            );
            let holder_token = Pubkey::new_unique();
            add_token_account(
                &holder_token,
                &mut program_test,
                &mint,
                &holder.pubkey(),
                preset.units_sold,
            );
            token_accounts.insert(holder.pubkey(), holder_token);
            holder
        });

        ////
        // Create test context
        ////
        let prg_test_ctx = program_test.start_with_context().await;

        Ok((
            Self {
                program_id,
                prg_test_ctx,
                owner,
                mint,
                foreign_mint,
                supplied_mint,
                freezable_mint,
                sale_state,
                escrow,
                token_accounts,
            },
            holder,
        ))
    }

    pub async fn send(
        &mut self,
        instructions: Vec<Instruction>,
        signers: Vec<&Keypair>,
    ) -> Result<(), BanksClientError> {
        sign_send_instructions(&mut self.prg_test_ctx, instructions, signers).await
    }

    /// Funds a new wallet and gives it a token account for the sale mint
    pub async fn create_user(&mut self, lamports: u64) -> Result<Keypair, BanksClientError> {
        let user = Keypair::new();
        self.fund(&user.pubkey(), lamports).await?;
        let mint = self.mint;
        let token_account = self.create_token_account(&user.pubkey(), &mint).await?;
        self.token_accounts.insert(user.pubkey(), token_account);
        Ok(user)
    }

    /// Sends lamports from the payer to any address, derived ones included
    pub async fn fund(&mut self, address: &Pubkey, lamports: u64) -> Result<(), BanksClientError> {
        let fund_ix = system_instruction::transfer(
            &self.prg_test_ctx.payer.pubkey(),
            address,
            lamports,
        );
        sign_send_instructions(&mut self.prg_test_ctx, vec![fund_ix], vec![]).await
    }

    pub async fn create_token_account(
        &mut self,
        owner: &Pubkey,
        mint: &Pubkey,
    ) -> Result<Pubkey, BanksClientError> {
        let token_account = Keypair::new();
        let rent = self.prg_test_ctx.banks_client.get_rent().await?;
        let create_ix = system_instruction::create_account(
            &self.prg_test_ctx.payer.pubkey(),
            &token_account.pubkey(),
            rent.minimum_balance(spl_token::state::Account::LEN),
            spl_token::state::Account::LEN as u64,
            &spl_token::ID,
        );
        let init_ix = spl_token::instruction::initialize_account(
            &spl_token::ID,
            &token_account.pubkey(),
            mint,
            owner,
        )
        .unwrap();
        sign_send_instructions(
            &mut self.prg_test_ctx,
            vec![create_ix, init_ix],
            vec![&token_account],
        )
        .await?;
        Ok(token_account.pubkey())
    }

    pub fn token_account(&self, wallet: &Pubkey) -> Pubkey {
        self.token_accounts[wallet]
    }

    pub fn initialize_ix(&self, total_supply: u64, base_price: u64, scaling_factor: u64) -> Instruction {
        initialize(
            self.program_id,
            initialize::Accounts {
                sale_state: &self.sale_state,
                owner: &self.owner.pubkey(),
                escrow: &self.escrow,
                mint: &self.mint,
                system_program: &system_program::ID,
                rent_sysvar: &sysvar::rent::ID,
            },
            initialize::Params {
                total_supply,
                base_price,
                scaling_factor,
            },
        )
    }

    pub async fn initialize(
        &mut self,
        total_supply: u64,
        base_price: u64,
        scaling_factor: u64,
    ) -> Result<(), BanksClientError> {
        let ix = self.initialize_ix(total_supply, base_price, scaling_factor);
        sign_send_instructions(&mut self.prg_test_ctx, vec![ix], vec![&self.owner]).await
    }

    pub fn buy_ix(&self, buyer: &Pubkey, lamports_in: u64) -> Instruction {
        buy(
            self.program_id,
            buy::Accounts {
                sale_state: &self.sale_state,
                buyer,
                escrow: &self.escrow,
                mint: &self.mint,
                buyer_token: &self.token_account(buyer),
                system_program: &system_program::ID,
                spl_token_program: &spl_token::ID,
            },
            buy::Params { lamports_in },
        )
    }

    pub async fn buy(&mut self, buyer: &Keypair, lamports_in: u64) -> Result<(), BanksClientError> {
        let ix = self.buy_ix(&buyer.pubkey(), lamports_in);
        sign_send_instructions(&mut self.prg_test_ctx, vec![ix], vec![buyer]).await
    }

    pub fn sell_ix(&self, seller: &Pubkey, units_in: u64) -> Instruction {
        sell(
            self.program_id,
            sell::Accounts {
                sale_state: &self.sale_state,
                seller,
                escrow: &self.escrow,
                mint: &self.mint,
                seller_token: &self.token_account(seller),
                spl_token_program: &spl_token::ID,
            },
            sell::Params { units_in },
        )
    }

    pub async fn sell(&mut self, seller: &Keypair, units_in: u64) -> Result<(), BanksClientError> {
        let ix = self.sell_ix(&seller.pubkey(), units_in);
        sign_send_instructions(&mut self.prg_test_ctx, vec![ix], vec![seller]).await
    }

    pub fn withdraw_ix(&self, signer: &Pubkey, amount: u64) -> Instruction {
        withdraw_from_escrow(
            self.program_id,
            withdraw_from_escrow::Accounts {
                sale_state: &self.sale_state,
                owner: signer,
                escrow: &self.escrow,
            },
            withdraw_from_escrow::Params { amount },
        )
    }

    pub async fn withdraw_as(&mut self, signer: &Keypair, amount: u64) -> Result<(), BanksClientError> {
        let ix = self.withdraw_ix(&signer.pubkey(), amount);
        sign_send_instructions(&mut self.prg_test_ctx, vec![ix], vec![signer]).await
    }

    pub async fn withdraw(&mut self, amount: u64) -> Result<(), BanksClientError> {
        let ix = self.withdraw_ix(&self.owner.pubkey(), amount);
        sign_send_instructions(&mut self.prg_test_ctx, vec![ix], vec![&self.owner]).await
    }

    pub fn register_resource_ix(
        &self,
        server: &Pubkey,
        resource_id: &str,
        access_fee: u64,
        overpayment_policy: OverpaymentPolicy,
    ) -> Instruction {
        let (resource_state, _) = find_resource_address(resource_id, &self.program_id).unwrap();
        register_resource(
            self.program_id,
            register_resource::Accounts {
                resource_state: &resource_state,
                server,
                system_program: &system_program::ID,
                rent_sysvar: &sysvar::rent::ID,
            },
            register_resource::Params {
                resource_id: resource_id.to_string(),
                access_fee,
                overpayment_policy,
            },
        )
    }

    pub async fn register_resource(
        &mut self,
        server: &Keypair,
        resource_id: &str,
        access_fee: u64,
        overpayment_policy: OverpaymentPolicy,
    ) -> Result<(), BanksClientError> {
        let ix = self.register_resource_ix(&server.pubkey(), resource_id, access_fee, overpayment_policy);
        sign_send_instructions(&mut self.prg_test_ctx, vec![ix], vec![server]).await
    }

    pub fn access_resource_ix(
        &self,
        user: &Pubkey,
        resource_id: &str,
        server: &Pubkey,
        amount_offered: u64,
    ) -> Instruction {
        let (resource_state, _) = find_resource_address(resource_id, &self.program_id).unwrap();
        access_resource(
            self.program_id,
            access_resource::Accounts {
                resource_state: &resource_state,
                user,
                server,
                system_program: &system_program::ID,
            },
            access_resource::Params {
                resource_id: resource_id.to_string(),
                amount_offered,
            },
        )
    }

    pub async fn access_resource(
        &mut self,
        user: &Keypair,
        resource_id: &str,
        server: &Pubkey,
        amount_offered: u64,
    ) -> Result<(), BanksClientError> {
        let ix = self.access_resource_ix(&user.pubkey(), resource_id, server, amount_offered);
        sign_send_instructions(&mut self.prg_test_ctx, vec![ix], vec![user]).await
    }

    pub async fn sale_stats(&mut self) -> Result<SaleState, BanksClientError> {
        let account = self
            .prg_test_ctx
            .banks_client
            .get_account(self.sale_state)
            .await?
            .ok_or(BanksClientError::ClientError("Sale state not found"))?;
        Ok(SaleState::deserialize(&mut &account.data[..]).unwrap())
    }

    pub async fn resource_stats(&mut self, resource_id: &str) -> Result<ResourceRecord, BanksClientError> {
        let (resource_state, _) = find_resource_address(resource_id, &self.program_id).unwrap();
        let account = self
            .prg_test_ctx
            .banks_client
            .get_account(resource_state)
            .await?
            .ok_or(BanksClientError::ClientError("Resource not found"))?;
        Ok(ResourceRecord::deserialize(&mut &account.data[..]).unwrap())
    }

    pub async fn lamports(&mut self, address: &Pubkey) -> Result<u64, BanksClientError> {
        self.prg_test_ctx.banks_client.get_balance(*address).await
    }

    /// Lamports above the rent exempt reserve of the escrow
    pub async fn escrow_balance(&mut self) -> Result<u64, BanksClientError> {
        let rent = self.prg_test_ctx.banks_client.get_rent().await?;
        let escrow = self.escrow;
        let lamports = self.lamports(&escrow).await?;
        Ok(lamports - rent.minimum_balance(0))
    }

    pub async fn token_balance(&mut self, wallet: &Pubkey) -> Result<u64, BanksClientError> {
        let token_account = self.token_account(wallet);
        let account = self
            .prg_test_ctx
            .banks_client
            .get_account(token_account)
            .await?
            .ok_or(BanksClientError::ClientError("Token account not found"))?;
        Ok(spl_token::state::Account::unpack(&account.data).unwrap().amount)
    }

    pub async fn mint_supply(&mut self) -> Result<u64, BanksClientError> {
        let account = self
            .prg_test_ctx
            .banks_client
            .get_account(self.mint)
            .await?
            .ok_or(BanksClientError::ClientError("Mint not found"))?;
        Ok(spl_token::state::Mint::unpack(&account.data).unwrap().supply)
    }
}
