//! `chainvote voter ...`

use anyhow::bail;
use chainvote_admin::{can_remove_voter, paginate, EditForm, VoterForm};
use chainvote_contracts::{ContractError, VoterWrite};
use chainvote_types::{Address, Gender, VoterDetails};
use clap::{Args, Subcommand};
use futures_util::future::try_join_all;

use super::{display_date, invalid, print_page_footer, submit, Context, GenderArg};

#[derive(Subcommand)]
pub enum VoterCommand {
    /// Register a voter (yourself, or `--wallet` on someone's behalf as admin).
    Register(VoterFields),
    /// Change registration details; unspecified fields keep their value.
    Update(VoterFields),
    /// Show your registration, or another voter's with `--wallet` (admin).
    Show {
        #[arg(long)]
        wallet: Option<Address>,
    },
    /// List registered voters (admin).
    List {
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Remove a voter who has not voted yet (admin).
    Remove { wallet: Address },
    /// Cancel your own registration.
    Unregister,
}

#[derive(Args)]
pub struct VoterFields {
    /// Act on this wallet instead of your own (admin).
    #[arg(long)]
    pub wallet: Option<Address>,
    #[arg(long)]
    pub name: Option<String>,
    /// Date of birth, YYYY-MM-DD.
    #[arg(long)]
    pub dob: Option<String>,
    #[arg(long, value_enum)]
    pub gender: Option<GenderArg>,
    /// Present address.
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
}

impl VoterFields {
    fn apply(self, form: &mut VoterForm) {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(dob) = self.dob {
            form.date_of_birth = dob;
        }
        if let Some(gender) = self.gender {
            form.gender = Gender::from(gender).code();
        }
        if let Some(address) = self.address {
            form.present_address = address;
        }
        if let Some(email) = self.email {
            form.email = email;
        }
    }
}

fn form_from(details: &VoterDetails, wallet: Option<Address>) -> VoterForm {
    VoterForm {
        wallet_address: wallet.map(|w| w.to_string()),
        name: details.name.clone(),
        date_of_birth: display_date(details.date_of_birth_epoch),
        gender: details.gender.code(),
        present_address: details.present_address.clone(),
        email: details.email.clone(),
    }
}

fn print_voter(wallet: Option<&Address>, v: &VoterDetails) {
    if let Some(wallet) = wallet {
        println!("wallet:         {wallet}");
    }
    println!("name:           {}", v.name);
    println!("date of birth:  {}", display_date(v.date_of_birth_epoch));
    println!("gender:         {}", v.gender.as_str());
    println!("address:        {}", v.present_address);
    println!("email:          {}", v.email);
    println!("times voted:    {}", v.times_voted);
    println!("registered at:  {}", v.registration_timestamp);
}

pub async fn run(ctx: &Context, command: VoterCommand) -> anyhow::Result<()> {
    let voters = &ctx.client.voters;
    match command {
        VoterCommand::Register(fields) => {
            let caller = ctx.caller()?;
            if fields.gender.is_none() {
                bail!("--gender is required");
            }
            let mut form = VoterForm {
                wallet_address: fields.wallet.map(|w| w.to_string()),
                ..VoterForm::default()
            };
            fields.apply(&mut form);
            let valid = form.validate(ctx.today()).map_err(invalid)?;
            let op = match valid.wallet_address {
                Some(voter) => VoterWrite::AdminAddVoter {
                    voter,
                    params: valid.params,
                    times_voted: 0,
                },
                None => VoterWrite::AddVoter(valid.params),
            };
            submit(&mut voters.writer(), &caller, op).await?;
        }
        VoterCommand::Update(fields) => {
            let caller = ctx.caller()?;
            let wallet = fields.wallet;
            let current = match wallet {
                Some(w) => voters.admin_get_voter_details(&caller, &w).load().await?,
                None => voters.get_my_details(&caller).load().await?,
            };
            let mut edit = EditForm::new(form_from(&current, wallet));
            fields.apply(edit.current_mut());
            if !edit.can_submit(false) {
                println!("nothing to update");
                return Ok(());
            }
            let valid = edit.current().validate(ctx.today()).map_err(invalid)?;
            let op = match valid.wallet_address {
                Some(voter) => VoterWrite::AdminUpdateVoter {
                    voter,
                    params: valid.params,
                    times_voted: current.times_voted,
                },
                None => VoterWrite::UpdateVoter(valid.params),
            };
            submit(&mut voters.writer(), &caller, op).await?;
        }
        VoterCommand::Show { wallet } => {
            let caller = ctx.caller()?;
            match wallet {
                Some(w) => {
                    let details = voters.admin_get_voter_details(&caller, &w).load().await?;
                    print_voter(Some(&w), &details);
                }
                None => {
                    if !voters.get_my_registration_status(&caller).load().await? {
                        println!("{caller} is not registered as a voter");
                        return Ok(());
                    }
                    let (details, age) = tokio::try_join!(
                        voters.get_my_details(&caller).load(),
                        voters.get_my_age(&caller).load(),
                    )?;
                    print_voter(Some(&caller), &details);
                    println!("age:            {age}");
                }
            }
        }
        VoterCommand::List { page } => {
            let caller = ctx.caller()?;
            let all = voters.admin_get_all_voters(&caller).load().await?;
            let page = paginate(&all, page);
            let rows = try_join_all(page.items.iter().map(|w| async move {
                let details = voters.admin_get_voter_details(&caller, w).load().await?;
                Ok::<_, ContractError>((*w, details))
            }))
            .await?;
            if rows.is_empty() {
                println!("no voters registered");
            }
            for (wallet, v) in &rows {
                println!(
                    "{wallet}  {:<24}  {}  voted {}x{}",
                    v.name,
                    v.email,
                    v.times_voted,
                    if can_remove_voter(v) { "" } else { "  (locked)" }
                );
            }
            print_page_footer(&page);
        }
        VoterCommand::Remove { wallet } => {
            let caller = ctx.caller()?;
            let details = voters.admin_get_voter_details(&caller, &wallet).load().await?;
            if !can_remove_voter(&details) {
                bail!("{wallet} has already voted and cannot be removed");
            }
            submit(&mut voters.writer(), &caller, VoterWrite::AdminRemoveVoter(wallet)).await?;
        }
        VoterCommand::Unregister => {
            let caller = ctx.caller()?;
            submit(&mut voters.writer(), &caller, VoterWrite::DeleteVoter).await?;
        }
    }
    Ok(())
}
