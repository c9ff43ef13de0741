//! `chainvote admin ...`

use anyhow::bail;
use chainvote_admin::{AdminError, AdminGuard, AdminRoleManagement, DatabaseStats};
use chainvote_contracts::ContractKind;
use chainvote_types::Address;
use clap::{Subcommand, ValueEnum};

use super::{invalid, Context};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ContractArg {
    Voter,
    Candidate,
    Election,
}

impl From<ContractArg> for ContractKind {
    fn from(c: ContractArg) -> Self {
        match c {
            ContractArg::Voter => ContractKind::VoterDatabase,
            ContractArg::Candidate => ContractKind::CandidateDatabase,
            ContractArg::Election => ContractKind::ElectionDatabase,
        }
    }
}

#[derive(Subcommand)]
pub enum AdminCommand {
    /// Which contracts the connected wallet administers.
    Whoami,
    /// Voter, candidate and election counts.
    Stats,
    /// Owner and admins of one contract.
    List {
        #[arg(long, value_enum)]
        contract: ContractArg,
    },
    /// Grant admin rights on one contract (owner only).
    Add {
        address: String,
        #[arg(long, value_enum)]
        contract: ContractArg,
    },
    /// Revoke admin rights on one contract (owner only).
    Remove {
        address: Address,
        #[arg(long, value_enum)]
        contract: ContractArg,
    },
}

fn flag(on: bool) -> &'static str {
    if on {
        "admin"
    } else {
        "-"
    }
}

pub async fn run(ctx: &Context, command: AdminCommand) -> anyhow::Result<()> {
    let caller = ctx.caller()?;
    match command {
        AdminCommand::Whoami => {
            let access = AdminGuard::new(ctx.client.clone()).check(&caller).await;
            println!("wallet:              {caller}");
            println!("voter database:      {}", flag(access.voter_database));
            println!("candidate database:  {}", flag(access.candidate_database));
            println!("election database:   {}", flag(access.election_database));
            if !access.is_admin() {
                println!("no administrator privileges; contact the contract owner for access");
            }
        }
        AdminCommand::Stats => {
            require_admin(ctx, &caller).await?;
            let stats = DatabaseStats::refresh(&ctx.client, &caller).await?;
            println!("voters:      {}", stats.voters);
            println!("candidates:  {}", stats.candidates);
            println!("elections:   {}", stats.elections);
        }
        AdminCommand::List { contract } => {
            let roles = AdminRoleManagement::new(ctx.client.clone(), contract.into(), caller);
            let overview = roles.overview().await?;
            println!("{}", overview.contract);
            println!(
                "owner:  {}{}",
                overview.owner,
                if overview.is_current_user_owner { "  (you)" } else { "" }
            );
            if overview.admins.is_empty() {
                println!("no administrators assigned to this contract");
            }
            for admin in &overview.admins {
                println!(
                    "admin:  {admin}{}",
                    if *admin == caller { "  (you)" } else { "" }
                );
            }
        }
        AdminCommand::Add { address, contract } => {
            let mut roles = owner_roles(ctx, contract, caller).await?;
            match roles.add_admin(&address).await {
                Err(AdminError::Validation(errors)) => return Err(invalid(errors)),
                Err(e) => return Err(e.into()),
                Ok(None) => bail!(
                    "failed to add admin: {}",
                    roles.last_error().map(|e| e.short_message()).unwrap_or("unknown error")
                ),
                Ok(Some(_)) => println!("admin added to {}", roles.contract()),
            }
        }
        AdminCommand::Remove { address, contract } => {
            let mut roles = owner_roles(ctx, contract, caller).await?;
            match roles.remove_admin(&address).await? {
                Some(_) => println!("admin removed from {}", roles.contract()),
                None => bail!(
                    "failed to remove admin: {}",
                    roles.last_error().map(|e| e.short_message()).unwrap_or("unknown error")
                ),
            }
        }
    }
    Ok(())
}

async fn require_admin(ctx: &Context, caller: &Address) -> anyhow::Result<()> {
    if !AdminGuard::new(ctx.client.clone()).is_admin(caller).await {
        bail!("{caller} does not have administrator privileges");
    }
    Ok(())
}

/// Role changes are offered to the contract owner only.
async fn owner_roles(
    ctx: &Context,
    contract: ContractArg,
    caller: Address,
) -> anyhow::Result<AdminRoleManagement> {
    let roles = AdminRoleManagement::new(ctx.client.clone(), contract.into(), caller);
    let overview = roles.overview().await?;
    if !overview.can_manage() {
        bail!("only the owner of {} can change its admins", overview.contract);
    }
    Ok(roles)
}
