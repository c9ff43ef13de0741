//! Admin area support for chainvote.
//!
//! Pure helpers ([`pagination`], [`gating`], [`forms`], [`edit`]) plus the
//! async pieces that talk to the contracts: [`AdminGuard`], [`DatabaseStats`]
//! and [`AdminRoleManagement`].

pub mod edit;
pub mod error;
pub mod forms;
pub mod gating;
pub mod guard;
pub mod pagination;
pub mod roles;
pub mod stats;

pub use edit::EditForm;
pub use error::{AdminError, FieldError, ValidationErrors};
pub use forms::{
    is_valid_email, validate_admin_address, CandidateForm, ElectionForm, Validated, VoterForm,
};
pub use gating::{
    can_archive_election, can_complete_election, can_delete_election, can_modify_candidates,
    can_open_election, can_remove_voter, ElectionActions,
};
pub use guard::{AdminAccess, AdminGuard};
pub use pagination::{paginate, paginate_by, total_pages, Page, PAGE_SIZE};
pub use roles::{format_address, AdminRoleManagement, RoleOverview};
pub use stats::DatabaseStats;
