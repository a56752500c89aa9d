use thiserror::Error;
use crate::models::{NormalizedLead, SubmissionForm};

// fewer digits than this can't be a real phone number
pub const MIN_PHONE_DIGITS: usize = 8;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    // decoy field filled in; answered like a success so bots learn nothing
    #[error("honeypot field was filled")]
    Bot,

    #[error("missing required fields")]
    MissingFields,

    #[error("invalid phone")]
    InvalidPhone,
}

pub fn phone_digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

// honeypot, then required fields, then phone length; first failure wins
pub fn validate(form: &SubmissionForm) -> Result<NormalizedLead, Rejection> {
    if !form.company.trim().is_empty() {
        return Err(Rejection::Bot);
    }

    let full_name = form.full_name.trim();
    let phone_raw = form.phone.trim();
    let digits = phone_digits(phone_raw);

    if full_name.is_empty() || digits.is_empty() {
        return Err(Rejection::MissingFields);
    }
    if digits.len() < MIN_PHONE_DIGITS {
        return Err(Rejection::InvalidPhone);
    }

    Ok(NormalizedLead {
        full_name: full_name.to_string(),
        phone_raw: phone_raw.to_string(),
        phone_digits: digits,
        email: form.email.trim().to_string(),
        message: form.message.trim().to_string(),
    })
}
