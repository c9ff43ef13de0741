//! `chainvote candidate ...`

use anyhow::bail;
use chainvote_admin::{paginate, CandidateForm, EditForm};
use chainvote_contracts::{CandidateWrite, ContractError};
use chainvote_types::{Address, CandidateDetails, Gender};
use clap::{Args, Subcommand};
use futures_util::future::try_join_all;

use super::{display_date, invalid, print_page_footer, submit, Context, GenderArg};

#[derive(Subcommand)]
pub enum CandidateCommand {
    /// Register a candidate (yourself, or `--wallet` as admin).
    Register(CandidateFields),
    /// Change candidate details; unspecified fields keep their value.
    Update(CandidateFields),
    /// Show your candidate profile, or any candidate's with `--wallet`.
    Show {
        #[arg(long)]
        wallet: Option<Address>,
    },
    List {
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Remove a candidate (admin).
    Remove { wallet: Address },
    /// Withdraw your own candidate registration.
    Unregister,
}

#[derive(Args)]
pub struct CandidateFields {
    #[arg(long)]
    pub wallet: Option<Address>,
    #[arg(long)]
    pub name: Option<String>,
    /// Date of birth, YYYY-MM-DD.
    #[arg(long)]
    pub dob: Option<String>,
    #[arg(long, value_enum)]
    pub gender: Option<GenderArg>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub qualifications: Option<String>,
    #[arg(long)]
    pub manifesto: Option<String>,
}

impl CandidateFields {
    fn apply(self, form: &mut CandidateForm) {
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
        if let Some(q) = self.qualifications {
            form.qualifications = q;
        }
        if let Some(m) = self.manifesto {
            form.manifesto = m;
        }
    }
}

fn form_from(details: &CandidateDetails, wallet: Option<Address>) -> CandidateForm {
    CandidateForm {
        wallet_address: wallet.map(|w| w.to_string()),
        name: details.name.clone(),
        date_of_birth: display_date(details.date_of_birth_epoch),
        gender: details.gender.code(),
        present_address: details.present_address.clone(),
        email: details.email.clone(),
        qualifications: details.qualifications.clone(),
        manifesto: details.manifesto.clone(),
    }
}

fn print_candidate(wallet: &Address, c: &CandidateDetails) {
    println!("wallet:          {wallet}");
    println!("name:            {}", c.name);
    println!("date of birth:   {}", display_date(c.date_of_birth_epoch));
    println!("gender:          {}", c.gender.as_str());
    println!("address:         {}", c.present_address);
    println!("email:           {}", c.email);
    println!("qualifications:  {}", c.qualifications);
    println!("manifesto:       {}", c.manifesto);
    println!("registered at:   {}", c.registration_timestamp);
}

pub async fn run(ctx: &Context, command: CandidateCommand) -> anyhow::Result<()> {
    let candidates = &ctx.client.candidates;
    match command {
        CandidateCommand::Register(fields) => {
            let caller = ctx.caller()?;
            if fields.gender.is_none() {
                bail!("--gender is required");
            }
            let mut form = CandidateForm {
                wallet_address: fields.wallet.map(|w| w.to_string()),
                ..CandidateForm::default()
            };
            fields.apply(&mut form);
            let valid = form.validate(ctx.today()).map_err(invalid)?;
            let op = match valid.wallet_address {
                Some(candidate) => CandidateWrite::AdminAddCandidate {
                    candidate,
                    params: valid.params,
                },
                None => CandidateWrite::AddCandidate(valid.params),
            };
            submit(&mut candidates.writer(), &caller, op).await?;
        }
        CandidateCommand::Update(fields) => {
            let caller = ctx.caller()?;
            let wallet = fields.wallet;
            let current = match wallet {
                Some(w) => candidates.get_candidate_details(&caller, &w).load().await?,
                None => candidates.get_my_details(&caller).load().await?,
            };
            let mut edit = EditForm::new(form_from(&current, wallet));
            fields.apply(edit.current_mut());
            if !edit.can_submit(false) {
                println!("nothing to update");
                return Ok(());
            }
            let valid = edit.current().validate(ctx.today()).map_err(invalid)?;
            let op = match valid.wallet_address {
                Some(candidate) => CandidateWrite::AdminUpdateCandidate {
                    candidate,
                    params: valid.params,
                },
                None => CandidateWrite::UpdateCandidate(valid.params),
            };
            submit(&mut candidates.writer(), &caller, op).await?;
        }
        CandidateCommand::Show { wallet } => match wallet {
            Some(w) => {
                let reader = ctx.reader();
                let details = candidates.get_candidate_details(&reader, &w).load().await?;
                print_candidate(&w, &details);
            }
            None => {
                let caller = ctx.caller()?;
                if !candidates.get_my_registration_status(&caller).load().await? {
                    println!("{caller} is not registered as a candidate");
                    return Ok(());
                }
                let (details, age) = tokio::try_join!(
                    candidates.get_my_details(&caller).load(),
                    candidates.get_my_age(&caller).load(),
                )?;
                print_candidate(&caller, &details);
                println!("age:             {age}");
            }
        },
        CandidateCommand::List { page } => {
            let reader = ctx.reader();
            let all = candidates.get_all_candidates(&reader).load().await?;
            let page = paginate(&all, page);
            let rows = try_join_all(page.items.iter().map(|w| async move {
                let details = candidates.get_candidate_details(&reader, w).load().await?;
                Ok::<_, ContractError>((*w, details))
            }))
            .await?;
            if rows.is_empty() {
                println!("no candidates registered");
            }
            for (wallet, c) in &rows {
                println!("{wallet}  {:<24}  {}", c.name, c.email);
            }
            print_page_footer(&page);
        }
        CandidateCommand::Remove { wallet } => {
            let caller = ctx.caller()?;
            submit(
                &mut candidates.writer(),
                &caller,
                CandidateWrite::AdminRemoveCandidate(wallet),
            )
            .await?;
        }
        CandidateCommand::Unregister => {
            let caller = ctx.caller()?;
            submit(&mut candidates.writer(), &caller, CandidateWrite::DeleteCandidate).await?;
        }
    }
    Ok(())
}
