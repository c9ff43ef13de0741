//! `chainvote vote <election-id> [--candidate ADDR]`

use anyhow::{anyhow, bail};
use chainvote_admin::format_address;
use chainvote_types::{Address, ElectionId};
use chainvote_voting::{ElectionTally, VotingBooth, VotingStep};
use futures_util::future::join_all;

use super::Context;

pub fn print_tally(tally: &ElectionTally) {
    println!("{}", tally.headline());
    if let Some(winner) = tally.winner {
        println!("winner: {winner}");
    }
    for r in &tally.results {
        println!(
            "  {}  {:>6} votes  {:>6.2}%{}{}",
            r.candidate,
            r.votes,
            r.percentage,
            if r.is_winner { "  [winner]" } else { "" },
            if r.is_my_choice { "  [your vote]" } else { "" },
        );
    }
}

async fn print_ballot(ctx: &Context, candidates: &[Address]) {
    let reader = ctx.reader();
    let names = join_all(candidates.iter().map(|c| async move {
        ctx.client
            .candidates
            .get_candidate_details(&reader, c)
            .load()
            .await
            .map(|d| d.name)
            .unwrap_or_else(|_| format_address(c))
    }))
    .await;
    println!("ballot:");
    for (candidate, name) in candidates.iter().zip(names) {
        println!("  {candidate}  {name}");
    }
    println!("vote with: --candidate <ADDR>");
}

pub async fn run(
    ctx: &Context,
    election_id: ElectionId,
    candidate: Option<Address>,
) -> anyhow::Result<()> {
    let caller = ctx.caller()?;
    let mut booth = VotingBooth::new(ctx.client.elections.clone(), caller, election_id);

    let step = booth.load().await?.clone();
    match step {
        VotingStep::Unavailable => bail!("election #{election_id} does not exist"),
        VotingStep::NotActive => {
            let status = booth
                .session()
                .election()
                .map(|e| e.status_display())
                .unwrap_or("Unknown");
            bail!("election #{election_id} is not open for voting (status: {status})");
        }
        VotingStep::Results => {
            println!("you have already voted in election #{election_id}");
            print_tally(&booth.results().await?);
            return Ok(());
        }
        _ => {}
    }

    let Some(candidate) = candidate else {
        let enrolled = booth
            .session()
            .election()
            .map(|e| e.candidates.clone())
            .unwrap_or_default();
        print_ballot(ctx, &enrolled).await;
        return Ok(());
    };

    booth.select(candidate)?;
    println!("casting vote for {candidate} in election #{election_id}");
    if *booth.confirm().await? != VotingStep::Results {
        return Err(booth
            .last_error()
            .map(|e| anyhow!("vote not recorded: {}", e.short_message()))
            .unwrap_or_else(|| anyhow!("vote not recorded")));
    }
    print_tally(&booth.results().await?);
    Ok(())
}
