//! Subcommand implementations and the context they share.

pub mod admin;
pub mod candidate;
pub mod election;
pub mod vote;
pub mod voter;

use anyhow::anyhow;
use chainvote_admin::{Page, ValidationErrors};
use chainvote_contracts::{ChainvoteClient, TxReceipt, WriteCall, WriteOperation};
use chainvote_types::{Address, Gender};
use chainvote_utils::dates::epoch_to_date_string;
use chainvote_utils::{Clock, SystemClock};
use chrono::NaiveDate;
use std::sync::Arc;

use crate::config::CliConfig;

/// Everything a subcommand needs: the contract clients, the wallet and a clock.
pub struct Context {
    pub client: ChainvoteClient,
    caller: Option<Address>,
    clock: Arc<dyn Clock>,
}

impl Context {
    pub fn new(client: ChainvoteClient, config: &CliConfig) -> Self {
        Self {
            client,
            caller: config.caller,
            clock: Arc::new(SystemClock),
        }
    }

    /// The connected wallet; required for writes and `getMy*` reads.
    pub fn caller(&self) -> anyhow::Result<Address> {
        self.caller.ok_or_else(|| {
            anyhow!("no wallet address configured (pass --caller or set CHAINVOTE_CALLER)")
        })
    }

    /// Public reads work without a wallet.
    pub fn reader(&self) -> Address {
        self.caller.unwrap_or(Address::ZERO)
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum GenderArg {
    Male,
    Female,
}

impl From<GenderArg> for Gender {
    fn from(g: GenderArg) -> Self {
        match g {
            GenderArg::Male => Gender::Male,
            GenderArg::Female => Gender::Female,
        }
    }
}

/// Submit `op` and wait for it to be mined.
pub async fn submit<Op: WriteOperation>(
    writer: &mut WriteCall<Op>,
    caller: &Address,
    op: Op,
) -> anyhow::Result<TxReceipt> {
    match writer.submit(caller, op).await {
        Some(receipt) => {
            println!("confirmed in block {} ({})", receipt.block_number, receipt.hash);
            Ok(receipt)
        }
        None => Err(writer
            .last_error()
            .map(|e| anyhow!("{}", e.short_message()))
            .unwrap_or_else(|| anyhow!("transaction failed"))),
    }
}

/// Field errors are shown one per line, then the command fails.
pub fn invalid(errors: ValidationErrors) -> anyhow::Error {
    for e in &errors.0 {
        eprintln!("  {}: {}", e.field, e.message);
    }
    anyhow!("{} invalid field(s)", errors.0.len())
}

pub fn print_page_footer<T>(page: &Page<T>) {
    if page.total_items == 0 {
        return;
    }
    let mut footer = format!(
        "page {}/{} ({} total)",
        page.page, page.total_pages, page.total_items
    );
    if page.has_next() {
        footer.push_str(&format!(", next: --page {}", page.page + 1));
    }
    println!("{footer}");
}

pub fn display_date(epoch: u64) -> String {
    epoch_to_date_string(epoch).unwrap_or_else(|_| "-".to_string())
}
