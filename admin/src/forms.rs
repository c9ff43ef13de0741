//! Form schemas for voters, candidates, elections and admin addresses.
//!
//! Each form holds raw user input and validates it into the parameters a
//! write call takes. All failures are collected, not just the first.

use chainvote_types::{is_valid_address, Address, CandidateParams, Gender, VoterParams};
use chainvote_utils::dates::{date_to_epoch, is_at_least_18, string_to_date};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationErrors;

// ── Field rules ─────────────────────────────────────────────────────────

fn check_length(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &str,
    label: &str,
    min: usize,
    max: usize,
) {
    let len = value.chars().count();
    if len < min {
        errors.push(field, format!("{label} must be at least {min} characters"));
    } else if len > max {
        errors.push(field, format!("{label} must be less than {max} characters"));
    }
}

/// Loose `local@domain.tld` shape check.
pub fn is_valid_email(input: &str) -> bool {
    let Some((local, domain)) = input.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !input.chars().any(char::is_whitespace)
        && domain.split('.').count() >= 2
        && domain.split('.').all(|part| !part.is_empty())
}

fn check_wallet(errors: &mut ValidationErrors, input: Option<&str>) -> Option<Address> {
    let input = input?.trim();
    if input.is_empty() {
        errors.push("wallet_address", "Wallet address is required");
        return None;
    }
    if !is_valid_address(input) {
        errors.push("wallet_address", "Invalid Ethereum address format");
        return None;
    }
    input.parse().ok()
}

fn check_date_of_birth(errors: &mut ValidationErrors, input: &str, today: NaiveDate) -> u64 {
    let input = input.trim();
    if input.is_empty() {
        errors.push("date_of_birth", "Date of birth is required");
        return 0;
    }
    if string_to_date(input).is_none() {
        errors.push("date_of_birth", "Date of birth must be a valid YYYY-MM-DD date");
        return 0;
    }
    if !is_at_least_18(input, today) {
        errors.push("date_of_birth", "You must be at least 18 years old");
        return 0;
    }
    match date_to_epoch(input) {
        Ok(epoch) => epoch,
        Err(e) => {
            errors.push("date_of_birth", e.to_string());
            0
        }
    }
}

fn check_gender(errors: &mut ValidationErrors, code: u8) -> Gender {
    Gender::try_from(code).unwrap_or_else(|_| {
        errors.push("gender", "Invalid gender value");
        Gender::Male
    })
}

fn check_email(errors: &mut ValidationErrors, email: &str, max: Option<usize>) {
    if !is_valid_email(email) {
        errors.push("email", "Please enter a valid email address");
    } else if let Some(max) = max {
        if email.chars().count() > max {
            errors.push("email", format!("Email must be less than {max} characters"));
        }
    }
}

// ── Voter ───────────────────────────────────────────────────────────────

/// Raw voter form input. `wallet_address` is only present on the admin form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterForm {
    pub wallet_address: Option<String>,
    pub name: String,
    /// `YYYY-MM-DD`.
    pub date_of_birth: String,
    pub gender: u8,
    pub present_address: String,
    pub email: String,
}

/// A validated form: the target wallet (admin forms only) and the write parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validated<P> {
    pub wallet_address: Option<Address>,
    pub params: P,
}

impl VoterForm {
    pub fn validate(&self, today: NaiveDate) -> Result<Validated<VoterParams>, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let wallet_address = check_wallet(&mut errors, self.wallet_address.as_deref());

        let name = self.name.trim();
        if name.is_empty() {
            errors.push("name", "Full name is required");
        } else {
            check_length(&mut errors, "name", name, "Name", 2, 100);
        }

        let date_of_birth_epoch = check_date_of_birth(&mut errors, &self.date_of_birth, today);
        let gender = check_gender(&mut errors, self.gender);

        let present_address = self.present_address.trim();
        if present_address.is_empty() {
            errors.push("present_address", "Address is required");
        } else {
            check_length(
                &mut errors,
                "present_address",
                present_address,
                "Address",
                5,
                500,
            );
        }

        let email = self.email.trim();
        check_email(&mut errors, email, None);

        errors.into_result(Validated {
            wallet_address,
            params: VoterParams {
                name: name.to_string(),
                date_of_birth_epoch,
                gender,
                present_address: present_address.to_string(),
                email: email.to_string(),
            },
        })
    }
}

// ── Candidate ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateForm {
    pub wallet_address: Option<String>,
    pub name: String,
    pub date_of_birth: String,
    pub gender: u8,
    pub present_address: String,
    pub email: String,
    pub qualifications: String,
    pub manifesto: String,
}

impl CandidateForm {
    pub fn validate(
        &self,
        today: NaiveDate,
    ) -> Result<Validated<CandidateParams>, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let wallet_address = check_wallet(&mut errors, self.wallet_address.as_deref());

        check_length(&mut errors, "name", &self.name, "Name", 3, 100);
        let date_of_birth_epoch = check_date_of_birth(&mut errors, &self.date_of_birth, today);
        let gender = check_gender(&mut errors, self.gender);
        check_length(
            &mut errors,
            "present_address",
            &self.present_address,
            "Address",
            5,
            200,
        );
        check_email(&mut errors, &self.email, Some(100));
        check_length(
            &mut errors,
            "qualifications",
            &self.qualifications,
            "Qualifications",
            10,
            1000,
        );
        check_length(&mut errors, "manifesto", &self.manifesto, "Manifesto", 50, 2000);

        errors.into_result(Validated {
            wallet_address,
            params: CandidateParams {
                name: self.name.clone(),
                date_of_birth_epoch,
                gender,
                present_address: self.present_address.clone(),
                email: self.email.clone(),
                qualifications: self.qualifications.clone(),
                manifesto: self.manifesto.clone(),
            },
        })
    }
}

// ── Election ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionForm {
    pub name: String,
    pub description: String,
}

impl ElectionForm {
    pub fn validate(&self) -> Result<ElectionForm, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if self.name.is_empty() {
            errors.push("name", "Election name cannot be empty");
        } else {
            check_length(&mut errors, "name", &self.name, "Election name", 3, 100);
        }
        if self.description.is_empty() {
            errors.push("description", "Election description cannot be empty");
        } else {
            check_length(
                &mut errors,
                "description",
                &self.description,
                "Election description",
                10,
                500,
            );
        }
        errors.into_result(self.clone())
    }
}

// ── Admin address ───────────────────────────────────────────────────────

pub fn validate_admin_address(input: &str) -> Result<Address, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let input = input.trim();
    if input.is_empty() {
        errors.push("address", "Wallet address is required");
    } else if !is_valid_address(input) {
        errors.push("address", "Invalid Ethereum address format");
    } else if let Ok(address) = input.parse() {
        return Ok(address);
    }
    Err(errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn voter() -> VoterForm {
        VoterForm {
            wallet_address: None,
            name: "  Alice  ".into(),
            date_of_birth: "2000-01-01".into(),
            gender: 1,
            present_address: "12 Main St".into(),
            email: "alice@example.com".into(),
        }
    }

    fn candidate() -> CandidateForm {
        CandidateForm {
            wallet_address: Some("0x1111111111111111111111111111111111111111".into()),
            name: "Bob".into(),
            date_of_birth: "1980-03-04".into(),
            gender: 0,
            present_address: "Elm Rd 4".into(),
            email: "bob@example.com".into(),
            qualifications: "Ten years on the council".into(),
            manifesto: "Lower fees, better parks and an open budget for everyone.".into(),
        }
    }

    #[test]
    fn valid_voter_is_trimmed_and_converted() {
        let v = voter().validate(today()).unwrap();
        assert_eq!(v.params.name, "Alice");
        assert_eq!(v.params.date_of_birth_epoch, 946_684_800);
        assert_eq!(v.params.gender, Gender::Female);
        assert!(v.wallet_address.is_none());
    }

    #[test]
    fn voter_errors_are_collected_per_field() {
        let form = VoterForm {
            name: "A".into(),
            date_of_birth: "2010-01-01".into(),
            gender: 7,
            present_address: "   ".into(),
            email: "not-an-email".into(),
            ..voter()
        };
        let errors = form.validate(today()).unwrap_err();
        assert_eq!(errors.field("name"), Some("Name must be at least 2 characters"));
        assert_eq!(
            errors.field("date_of_birth"),
            Some("You must be at least 18 years old")
        );
        assert_eq!(errors.field("gender"), Some("Invalid gender value"));
        assert_eq!(errors.field("present_address"), Some("Address is required"));
        assert_eq!(
            errors.field("email"),
            Some("Please enter a valid email address")
        );
    }

    #[test]
    fn admin_voter_form_checks_wallet() {
        let form = VoterForm {
            wallet_address: Some("0x123".into()),
            ..voter()
        };
        let errors = form.validate(today()).unwrap_err();
        assert_eq!(
            errors.field("wallet_address"),
            Some("Invalid Ethereum address format")
        );
    }

    #[test]
    fn valid_candidate() {
        let c = candidate().validate(today()).unwrap();
        assert_eq!(c.wallet_address, Some(Address::new([0x11; 20])));
        assert_eq!(c.params.qualifications, "Ten years on the council");
    }

    #[test]
    fn candidate_text_bounds() {
        let form = CandidateForm {
            name: "Bo".into(),
            qualifications: "short".into(),
            manifesto: "too short".into(),
            email: format!("{}@example.com", "x".repeat(100)),
            ..candidate()
        };
        let errors = form.validate(today()).unwrap_err();
        assert!(errors.field("name").is_some());
        assert!(errors.field("qualifications").is_some());
        assert_eq!(
            errors.field("manifesto"),
            Some("Manifesto must be at least 50 characters")
        );
        assert_eq!(
            errors.field("email"),
            Some("Email must be less than 100 characters")
        );
    }

    #[test]
    fn election_form() {
        let ok = ElectionForm {
            name: "Board".into(),
            description: "Annual board election".into(),
        };
        assert!(ok.validate().is_ok());

        let errors = ElectionForm {
            name: String::new(),
            description: "short".into(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors.field("name"), Some("Election name cannot be empty"));
        assert_eq!(
            errors.field("description"),
            Some("Election description must be at least 10 characters")
        );
    }

    #[test]
    fn admin_address() {
        assert!(validate_admin_address("0x1111111111111111111111111111111111111111").is_ok());
        assert_eq!(
            validate_admin_address("").unwrap_err().field("address"),
            Some("Wallet address is required")
        );
        assert!(validate_admin_address("0xZZ").is_err());
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a b@c.de"));
        assert!(!is_valid_email("a@@b.co"));
        assert!(!is_valid_email("a@b..co"));
    }
}
