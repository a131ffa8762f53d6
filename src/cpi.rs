use solana_program::{
    account_info::AccountInfo,
    entrypoint::ProgramResult,
    program::{invoke, invoke_signed},
    pubkey::Pubkey,
    rent::Rent,
    system_instruction::{allocate, assign, create_account, transfer},
    sysvar::Sysvar,
};

pub struct Cpi {}

impl Cpi {
    pub fn create_account<'a>(
        program_id: &Pubkey,
        system_program: &AccountInfo<'a>,
        fee_payer: &AccountInfo<'a>,
        account_to_create: &AccountInfo<'a>,
        rent_sysvar_account: &AccountInfo<'a>,
        signer_seeds: &[&[u8]],
        space: usize,
    ) -> ProgramResult {
        let rent = Rent::from_account_info(rent_sysvar_account)?;
        let lamports = rent.minimum_balance(space);

        if account_to_create.lamports() == 0 {
            let create_state_instruction = create_account(
                fee_payer.key,
                account_to_create.key,
                lamports,
                space as u64,
                program_id,
            );

            return invoke_signed(
                &create_state_instruction,
                &[
                    system_program.clone(),
                    fee_payer.clone(),
                    account_to_create.clone(),
                ],
                &[signer_seeds],
            );
        }

        // Someone already sent lamports to the address, the system program
        // refuses `create_account` on it
        let top_up = lamports.saturating_sub(account_to_create.lamports());
        if top_up > 0 {
            Cpi::transfer_lamports(system_program, fee_payer, account_to_create, top_up)?;
        }

        invoke_signed(
            &allocate(account_to_create.key, space as u64),
            &[system_program.clone(), account_to_create.clone()],
            &[signer_seeds],
        )?;
        invoke_signed(
            &assign(account_to_create.key, program_id),
            &[system_program.clone(), account_to_create.clone()],
            &[signer_seeds],
        )
    }

    pub fn transfer_lamports<'a>(
        system_program: &AccountInfo<'a>,
        source: &AccountInfo<'a>,
        destination: &AccountInfo<'a>,
        amount: u64,
    ) -> ProgramResult {
        let transfer_instruction = transfer(source.key, destination.key, amount);

        invoke(
            &transfer_instruction,
            &[
                system_program.clone(),
                source.clone(),
                destination.clone(),
            ],
        )
    }

    pub fn mint_to<'a>(
        spl_token_program: &AccountInfo<'a>,
        mint: &AccountInfo<'a>,
        destination: &AccountInfo<'a>,
        mint_authority: &AccountInfo<'a>,
        signer_seeds: &[&[u8]],
        amount: u64,
    ) -> ProgramResult {
        let mint_instruction = spl_token::instruction::mint_to(
            &spl_token::ID,
            mint.key,
            destination.key,
            mint_authority.key,
            &[],
            amount,
        )?;

        invoke_signed(
            &mint_instruction,
            &[
                spl_token_program.clone(),
                mint.clone(),
                destination.clone(),
                mint_authority.clone(),
            ],
            &[signer_seeds],
        )
    }

    pub fn burn<'a>(
        spl_token_program: &AccountInfo<'a>,
        source: &AccountInfo<'a>,
        mint: &AccountInfo<'a>,
        owner: &AccountInfo<'a>,
        amount: u64,
    ) -> ProgramResult {
        let burn_instruction = spl_token::instruction::burn(
            &spl_token::ID,
            source.key,
            mint.key,
            owner.key,
            &[],
            amount,
        )?;

        invoke(
            &burn_instruction,
            &[
                spl_token_program.clone(),
                source.clone(),
                mint.clone(),
                owner.clone(),
            ],
        )
    }
}
