//! `chainvote election ...`

use anyhow::bail;
use chainvote_admin::{
    can_archive_election, can_complete_election, can_delete_election, can_modify_candidates,
    can_open_election, paginate, EditForm, ElectionActions, ElectionForm,
};
use chainvote_contracts::{ContractError, ElectionWrite};
use chainvote_types::{Address, ElectionDetails, ElectionId};
use chainvote_voting::VotingBooth;
use clap::Subcommand;
use futures_util::future::try_join_all;

use super::{invalid, print_page_footer, submit, Context};

#[derive(Subcommand)]
pub enum ElectionCommand {
    /// Create a new election (admin).
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
    },
    /// Rename or re-describe an election (admin).
    Update {
        id: ElectionId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    Show {
        id: ElectionId,
    },
    List {
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// NEW → ACTIVE (admin).
    Open { id: ElectionId },
    /// ACTIVE → COMPLETED, once at least one vote is in (admin).
    Complete { id: ElectionId },
    Archive { id: ElectionId },
    /// Delete a NEW election nobody has voted in (admin).
    Delete { id: ElectionId },
    /// Enroll yourself, or `--candidate` as admin, while the election is NEW.
    Enroll {
        id: ElectionId,
        #[arg(long)]
        candidate: Option<Address>,
    },
    Withdraw {
        id: ElectionId,
        #[arg(long)]
        candidate: Option<Address>,
    },
    /// Per-candidate vote counts and the winner.
    Results { id: ElectionId },
}

fn print_actions(actions: &ElectionActions) {
    let enabled: Vec<&str> = [
        ("edit", actions.edit),
        ("delete", actions.delete),
        ("enroll/withdraw", actions.manage_candidates),
        ("open", actions.open),
        ("complete", actions.complete),
        ("archive", actions.archive),
    ]
    .into_iter()
    .filter_map(|(name, on)| on.then_some(name))
    .collect();
    if enabled.is_empty() {
        println!("actions:      none");
    } else {
        println!("actions:      {}", enabled.join(", "));
    }
}

fn print_election(id: ElectionId, e: &ElectionDetails) {
    println!("election:     #{id} {}", e.name);
    println!("description:  {}", e.description);
    println!("status:       {}", e.status_display());
    println!("votes:        {}", e.total_votes);
    println!("created at:   {}", e.registration_timestamp);
    println!("candidates:   {}", e.candidates.len());
    for c in &e.candidates {
        println!("  - {c}");
    }
    print_actions(&ElectionActions::for_election(e, false));
}

/// Loads the election and refuses the action when `allowed` says no.
async fn gated(
    ctx: &Context,
    caller: &Address,
    id: ElectionId,
    allowed: fn(&ElectionDetails) -> bool,
    refusal: &str,
) -> anyhow::Result<ElectionDetails> {
    let details = ctx
        .client
        .elections
        .get_election_details(caller, id)
        .load()
        .await?;
    if !allowed(&details) {
        bail!(
            "election #{id} is {}: {refusal}",
            details.status_display()
        );
    }
    Ok(details)
}

pub async fn run(ctx: &Context, command: ElectionCommand) -> anyhow::Result<()> {
    let elections = &ctx.client.elections;
    match command {
        ElectionCommand::Create { name, description } => {
            let caller = ctx.caller()?;
            let form = ElectionForm { name, description }
                .validate()
                .map_err(invalid)?;
            submit(
                &mut elections.writer(),
                &caller,
                ElectionWrite::AdminCreateElection {
                    name: form.name,
                    description: form.description,
                },
            )
            .await?;
        }
        ElectionCommand::Update {
            id,
            name,
            description,
        } => {
            let caller = ctx.caller()?;
            let current = elections.get_election_details(&caller, id).load().await?;
            if current.is_archived() {
                bail!("election #{id} is archived and can no longer be edited");
            }
            let mut edit = EditForm::new(ElectionForm {
                name: current.name.clone(),
                description: current.description.clone(),
            });
            if let Some(name) = name {
                edit.current_mut().name = name;
            }
            if let Some(description) = description {
                edit.current_mut().description = description;
            }
            if !edit.can_submit(false) {
                println!("nothing to update");
                return Ok(());
            }
            let form = edit.current().validate().map_err(invalid)?;
            submit(
                &mut elections.writer(),
                &caller,
                ElectionWrite::AdminUpdateElection {
                    id,
                    name: form.name,
                    description: form.description,
                },
            )
            .await?;
        }
        ElectionCommand::Show { id } => {
            let details = elections
                .get_election_details(&ctx.reader(), id)
                .load()
                .await?;
            print_election(id, &details);
        }
        ElectionCommand::List { page } => {
            let reader = ctx.reader();
            let ids = elections.get_all_election_ids(&reader).load().await?;
            let page = paginate(&ids, page);
            let rows = try_join_all(page.items.iter().map(|&id| async move {
                let details = elections.get_election_details(&reader, id).load().await?;
                Ok::<_, ContractError>((id, details))
            }))
            .await?;
            if rows.is_empty() {
                println!("no elections yet");
            }
            for (id, e) in &rows {
                println!(
                    "#{id:<4} {:<32} {:<10} {} candidates, {} votes",
                    e.name,
                    e.status_display(),
                    e.candidates.len(),
                    e.total_votes
                );
            }
            print_page_footer(&page);
        }
        ElectionCommand::Open { id } => {
            let caller = ctx.caller()?;
            gated(ctx, &caller, id, can_open_election, "only NEW elections can be opened").await?;
            submit(&mut elections.writer(), &caller, ElectionWrite::AdminOpenElection(id)).await?;
        }
        ElectionCommand::Complete { id } => {
            let caller = ctx.caller()?;
            gated(
                ctx,
                &caller,
                id,
                can_complete_election,
                "only ACTIVE elections with at least one vote can be completed",
            )
            .await?;
            submit(
                &mut elections.writer(),
                &caller,
                ElectionWrite::AdminCompleteElection(id),
            )
            .await?;
        }
        ElectionCommand::Archive { id } => {
            let caller = ctx.caller()?;
            gated(ctx, &caller, id, can_archive_election, "already archived").await?;
            submit(
                &mut elections.writer(),
                &caller,
                ElectionWrite::AdminArchiveElection(id),
            )
            .await?;
        }
        ElectionCommand::Delete { id } => {
            let caller = ctx.caller()?;
            gated(
                ctx,
                &caller,
                id,
                can_delete_election,
                "only NEW elections without votes can be deleted",
            )
            .await?;
            submit(
                &mut elections.writer(),
                &caller,
                ElectionWrite::AdminDeleteElection(id),
            )
            .await?;
        }
        ElectionCommand::Enroll { id, candidate } => {
            let caller = ctx.caller()?;
            gated(
                ctx,
                &caller,
                id,
                can_modify_candidates,
                "candidates can only be enrolled while NEW",
            )
            .await?;
            let op = match candidate {
                Some(candidate) => ElectionWrite::AdminEnrollCandidate { id, candidate },
                None => ElectionWrite::EnrollCandidate(id),
            };
            submit(&mut elections.writer(), &caller, op).await?;
        }
        ElectionCommand::Withdraw { id, candidate } => {
            let caller = ctx.caller()?;
            gated(
                ctx,
                &caller,
                id,
                can_modify_candidates,
                "candidates can only be withdrawn while NEW",
            )
            .await?;
            let op = match candidate {
                Some(candidate) => ElectionWrite::AdminWithdrawCandidate { id, candidate },
                None => ElectionWrite::WithdrawCandidate(id),
            };
            submit(&mut elections.writer(), &caller, op).await?;
        }
        ElectionCommand::Results { id } => {
            let mut booth = VotingBooth::new(elections.clone(), ctx.reader(), id);
            booth.load().await?;
            super::vote::print_tally(&booth.results().await?);
        }
    }
    Ok(())
}
