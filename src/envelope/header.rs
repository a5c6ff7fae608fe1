//! The `MWHEADER` block carried on every call.

use serde::{Deserialize, Serialize};

use super::Validate;

/// Maximum length, in characters, of each required header field.
pub const HEADER_FIELD_MAX_LEN: usize = 20;

/// Message header, echoed unchanged into responses.
///
/// Required fields deserialize missing or `null` values as empty strings so
/// that absence surfaces as a validation message rather than a parse error.
/// The optional fields are never validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct MwHeader {
    #[serde(rename = "MSGID", default, deserialize_with = "super::null_as_default")]
    pub msg_id: String,

    #[serde(rename = "SOURCECHANNEL", default, deserialize_with = "super::null_as_default")]
    pub source_channel: String,

    #[serde(rename = "TXNSEQ", default, deserialize_with = "super::null_as_default")]
    pub txn_seq: String,

    #[serde(rename = "RETURNCODE", default, skip_serializing_if = "Option::is_none")]
    pub return_code: Option<String>,

    #[serde(rename = "RETURNDESC", default, skip_serializing_if = "Option::is_none")]
    pub return_desc: Option<String>,

    #[serde(rename = "O360SEQ", default, skip_serializing_if = "Option::is_none")]
    pub o360_seq: Option<String>,
}

fn check_field(name: &str, value: &str, errors: &mut Vec<String>) {
    if value.trim().is_empty() {
        errors.push(format!("{name} is blank"));
    } else if value.chars().count() > HEADER_FIELD_MAX_LEN {
        errors.push(format!("{name} length must not exceed {HEADER_FIELD_MAX_LEN}"));
    }
}

impl Validate for MwHeader {
    fn validate(&self, errors: &mut Vec<String>) {
        check_field("MSGID", &self.msg_id, errors);
        check_field("SOURCECHANNEL", &self.source_channel, errors);
        check_field("TXNSEQ", &self.txn_seq, errors);
    }
}
