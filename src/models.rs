use serde::{Deserialize, Serialize};

// Contact form as posted by the browser
// missing fields come in as empty strings
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct SubmissionForm {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
    // hidden decoy field, real visitors never fill it
    #[serde(default)]
    pub company: String,
}

// Trimmed and checked submission
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct NormalizedLead {
    pub full_name: String,
    pub phone_raw: String,
    pub phone_digits: String,
    pub email: String,
    pub message: String,
}

// One row of the record log, columns in file order
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct LeadRecord {
    pub full_name: String,
    pub phone_digits: String,
    pub phone_raw: String,
    pub email: String,
    pub message: String,
    #[serde(rename = "ip")]
    pub client_id: String,
}

impl LeadRecord {
    pub fn new(lead: &NormalizedLead, client_id: &str) -> Self {
        Self {
            full_name: lead.full_name.clone(),
            phone_digits: lead.phone_digits.clone(),
            phone_raw: lead.phone_raw.clone(),
            email: lead.email.clone(),
            message: lead.message.clone(),
            client_id: client_id.to_string(),
        }
    }
}
