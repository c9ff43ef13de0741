//! Decoding of positional contract return tuples into typed records.
//!
//! The gateway hands back ABI-decoded values as JSON: uint256 as a decimal
//! string (or a plain number, or `0x` hex), address as a hex string, struct
//! returns as arrays in declaration order.

use chainvote_types::{
    Address, CandidateDetails, ElectionDetails, Gender, Timestamp, VoterDetails,
};
use serde_json::Value;

/// A value that can be built from one JSON-encoded contract return.
pub trait Decode: Sized {
    fn decode(value: &Value) -> Result<Self, String>;
}

impl Decode for u64 {
    fn decode(value: &Value) -> Result<Self, String> {
        match value {
            Value::Number(n) => n
                .as_u64()
                .ok_or_else(|| format!("expected unsigned integer, got {n}")),
            Value::String(s) => {
                let parsed = match s.strip_prefix("0x") {
                    Some(hex) => u64::from_str_radix(hex, 16),
                    None => s.parse(),
                };
                parsed.map_err(|_| format!("expected unsigned integer, got {s:?}"))
            }
            other => Err(format!("expected unsigned integer, got {other}")),
        }
    }
}

impl Decode for u8 {
    fn decode(value: &Value) -> Result<Self, String> {
        let n = u64::decode(value)?;
        u8::try_from(n).map_err(|_| format!("value {n} does not fit in uint8"))
    }
}

impl Decode for bool {
    fn decode(value: &Value) -> Result<Self, String> {
        value
            .as_bool()
            .ok_or_else(|| format!("expected bool, got {value}"))
    }
}

impl Decode for String {
    fn decode(value: &Value) -> Result<Self, String> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| format!("expected string, got {value}"))
    }
}

impl Decode for Address {
    fn decode(value: &Value) -> Result<Self, String> {
        let s = value
            .as_str()
            .ok_or_else(|| format!("expected address, got {value}"))?;
        s.parse().map_err(|e| format!("{e}"))
    }
}

impl Decode for Timestamp {
    fn decode(value: &Value) -> Result<Self, String> {
        u64::decode(value).map(Timestamp::new)
    }
}

impl Decode for Gender {
    fn decode(value: &Value) -> Result<Self, String> {
        Gender::try_from(u8::decode(value)?).map_err(|e| e.to_string())
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode(value: &Value) -> Result<Self, String> {
        value
            .as_array()
            .ok_or_else(|| format!("expected array, got {value}"))?
            .iter()
            .map(T::decode)
            .collect()
    }
}

/// Borrow the elements of a fixed-arity tuple.
fn tuple(value: &Value, arity: usize, what: &str) -> Result<Vec<Value>, String> {
    let items = value
        .as_array()
        .ok_or_else(|| format!("expected {what} tuple, got {value}"))?;
    if items.len() != arity {
        return Err(format!(
            "expected {what} tuple of {arity} fields, got {}",
            items.len()
        ));
    }
    Ok(items.clone())
}

/// `(name, dateOfBirthEpoch, gender, presentAddress, email, timesVoted, registrationTimestamp)`
impl Decode for VoterDetails {
    fn decode(value: &Value) -> Result<Self, String> {
        let f = tuple(value, 7, "voter")?;
        Ok(Self {
            name: String::decode(&f[0])?,
            date_of_birth_epoch: u64::decode(&f[1])?,
            gender: Gender::decode(&f[2])?,
            present_address: String::decode(&f[3])?,
            email: String::decode(&f[4])?,
            times_voted: u64::decode(&f[5])?,
            registration_timestamp: Timestamp::decode(&f[6])?,
        })
    }
}

/// `(name, dateOfBirthEpoch, gender, presentAddress, email, qualifications, manifesto, registrationTimestamp)`
impl Decode for CandidateDetails {
    fn decode(value: &Value) -> Result<Self, String> {
        let f = tuple(value, 8, "candidate")?;
        Ok(Self {
            name: String::decode(&f[0])?,
            date_of_birth_epoch: u64::decode(&f[1])?,
            gender: Gender::decode(&f[2])?,
            present_address: String::decode(&f[3])?,
            email: String::decode(&f[4])?,
            qualifications: String::decode(&f[5])?,
            manifesto: String::decode(&f[6])?,
            registration_timestamp: Timestamp::decode(&f[7])?,
        })
    }
}

/// `(name, description, status, candidates, totalVotes, registrationTimestamp)`
impl Decode for ElectionDetails {
    fn decode(value: &Value) -> Result<Self, String> {
        let f = tuple(value, 6, "election")?;
        Ok(Self {
            name: String::decode(&f[0])?,
            description: String::decode(&f[1])?,
            status: u8::decode(&f[2])?,
            candidates: Vec::<Address>::decode(&f[3])?,
            total_votes: u64::decode(&f[4])?,
            registration_timestamp: Timestamp::decode(&f[5])?,
        })
    }
}

impl<A: Decode, B: Decode> Decode for (A, B) {
    fn decode(value: &Value) -> Result<Self, String> {
        let f = tuple(value, 2, "pair")?;
        Ok((A::decode(&f[0])?, B::decode(&f[1])?))
    }
}
