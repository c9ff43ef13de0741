//! Owner and admin surface shared by all three contracts.
//!
//! Each contract tracks its own owner and admin set independently; an address
//! that is admin on the voter contract need not be admin on the others.

use chainvote_types::Address;
use serde_json::Value;

use crate::call::args;
use crate::error::ContractError;
use crate::handle::ContractHandle;
use crate::notify::ToastMessages;
use crate::read::ReadCall;
use crate::write::{WriteCall, WriteOperation};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdminWrite {
    AddAdmin(Address),
    RemoveAdmin(Address),
}

impl WriteOperation for AdminWrite {
    fn function_name(&self) -> &'static str {
        match self {
            Self::AddAdmin(_) => "addAdmin",
            Self::RemoveAdmin(_) => "removeAdmin",
        }
    }

    fn args(&self) -> Vec<Value> {
        match self {
            Self::AddAdmin(a) | Self::RemoveAdmin(a) => vec![args::address(a)],
        }
    }

    fn messages(&self) -> ToastMessages {
        match self {
            Self::AddAdmin(_) => ToastMessages::new(
                "Adding admin...",
                "Admin addition submitted! Waiting for blockchain confirmation...",
                "Failed to add admin",
                "Admin has been added successfully!",
            ),
            Self::RemoveAdmin(_) => ToastMessages::new(
                "Removing admin...",
                "Admin removal submitted! Waiting for blockchain confirmation...",
                "Failed to remove admin",
                "Admin has been removed successfully!",
            ),
        }
    }
}

/// Reads and writes every contract exposes for ownership and admin management.
pub trait AdminControlled {
    fn handle(&self) -> &ContractHandle;

    fn get_owner(&self, caller: &Address) -> ReadCall<Address> {
        self.handle().read("getOwner", vec![], caller)
    }

    fn get_all_admins(&self, caller: &Address) -> ReadCall<Vec<Address>> {
        self.handle().read("getAllAdmins", vec![], caller)
    }

    fn get_admin_count(&self, caller: &Address) -> ReadCall<u64> {
        self.handle().read("getAdminCount", vec![], caller)
    }

    fn is_admin(&self, caller: &Address, address: &Address) -> ReadCall<bool> {
        self.handle()
            .read("isAdmin", vec![args::address(address)], caller)
    }

    fn am_i_admin(&self, caller: &Address) -> ReadCall<bool> {
        self.handle().read("amIAdmin", vec![], caller)
    }

    fn admin_writer(&self) -> WriteCall<AdminWrite> {
        self.handle().writer()
    }
}

/// Whether `address` may perform privileged writes on this contract: it is
/// the owner or one of the admins.
pub async fn is_privileged<C: AdminControlled + ?Sized>(
    contract: &C,
    caller: &Address,
    address: &Address,
) -> Result<bool, ContractError> {
    let (owner, admin) = tokio::join!(
        contract.get_owner(caller).load(),
        contract.is_admin(caller, address).load()
    );
    Ok(owner? == *address || admin?)
}
