//! Owner and admin management for one contract at a time.

use chainvote_contracts::{
    AdminControlled, AdminWrite, ChainvoteClient, ContractError, ContractKind, TxReceipt, WriteCall,
};
use chainvote_types::Address;
use serde::Serialize;
use tracing::info;

use crate::error::AdminError;
use crate::forms::validate_admin_address;

/// Reads that change when the admin set changes.
const ADMIN_READS: &[&str] = &["getAllAdmins", "getAdminCount", "isAdmin", "amIAdmin"];

/// Owner and admin listing of one contract, as seen by `caller`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RoleOverview {
    pub contract: ContractKind,
    pub owner: Address,
    pub admins: Vec<Address>,
    pub is_current_user_owner: bool,
    pub is_current_user_admin: bool,
}

impl RoleOverview {
    /// Only the owner may add or remove admins.
    pub fn can_manage(&self) -> bool {
        self.is_current_user_owner
    }
}

/// `0x1234...abcd`.
pub fn format_address(address: &Address) -> String {
    let full = address.to_string();
    format!("{}...{}", &full[..6], &full[full.len() - 4..])
}

pub struct AdminRoleManagement {
    client: ChainvoteClient,
    contract: ContractKind,
    caller: Address,
    writer: WriteCall<AdminWrite>,
}

impl AdminRoleManagement {
    pub fn new(client: ChainvoteClient, contract: ContractKind, caller: Address) -> Self {
        let writer = target(&client, contract).admin_writer();
        Self {
            client,
            contract,
            caller,
            writer,
        }
    }

    pub fn contract(&self) -> ContractKind {
        self.contract
    }

    pub fn is_busy(&self) -> bool {
        self.writer.is_busy()
    }

    pub fn last_error(&self) -> Option<&ContractError> {
        self.writer.last_error()
    }

    pub async fn overview(&self) -> Result<RoleOverview, ContractError> {
        let contract = target(&self.client, self.contract);
        let (owner, admins, is_admin) = tokio::try_join!(
            contract.get_owner(&self.caller).load(),
            contract.get_all_admins(&self.caller).load(),
            contract.am_i_admin(&self.caller).load(),
        )?;
        Ok(RoleOverview {
            contract: self.contract,
            is_current_user_owner: owner == self.caller,
            is_current_user_admin: is_admin,
            owner,
            admins,
        })
    }

    /// Validates `input` and submits `addAdmin`. `Ok(None)` means the write
    /// was rejected or failed; the notifier has already been told.
    pub async fn add_admin(&mut self, input: &str) -> Result<Option<TxReceipt>, AdminError> {
        let address = validate_admin_address(input)?;
        self.submit(AdminWrite::AddAdmin(address)).await
    }

    pub async fn remove_admin(&mut self, admin: &Address) -> Result<Option<TxReceipt>, AdminError> {
        self.submit(AdminWrite::RemoveAdmin(*admin)).await
    }

    async fn submit(&mut self, op: AdminWrite) -> Result<Option<TxReceipt>, AdminError> {
        if self.writer.is_busy() {
            return Err(AdminError::Busy);
        }
        let receipt = self.writer.submit(&self.caller, op).await;
        if self.writer.take_confirmation() {
            let handle = target(&self.client, self.contract).handle();
            for function in ADMIN_READS {
                handle.invalidate(function).await;
            }
            info!(contract = %self.contract, "admin set changed");
        }
        Ok(receipt)
    }
}

fn target(client: &ChainvoteClient, contract: ContractKind) -> &dyn AdminControlled {
    match contract {
        ContractKind::VoterDatabase => &client.voters,
        ContractKind::CandidateDatabase => &client.candidates,
        ContractKind::ElectionDatabase => &client.elections,
    }
}
