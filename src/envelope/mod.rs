//! Request/response envelope shared by every endpoint.
//!
//! # Wire Shape
//! ```text
//! request:  { "MWHEADER": {..}, "TRANRQ": {..} }
//! response: { "MWHEADER": {..}, "TRANRS": {..} }   (absent parts omitted)
//! ```
//!
//! Inbound envelopes are deserialized leniently (every part optional) and
//! then checked by [`Envelope::validate`], which reports every violated
//! constraint at once.

pub mod header;

use serde::{Deserialize, Deserializer, Serialize};

pub use header::{MwHeader, HEADER_FIELD_MAX_LEN};

/// Read an explicit JSON `null` as the type's default value.
///
/// Pair with `#[serde(default)]` so a missing key behaves the same way.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Constraint checks on an inbound payload.
pub trait Validate {
    /// Push one message per violated constraint onto `errors`.
    fn validate(&self, errors: &mut Vec<String>);
}

/// Payload-less requests still parse their `TRANRQ` into this.
impl Validate for serde_json::Value {
    fn validate(&self, _errors: &mut Vec<String>) {}
}

/// Inbound envelope as it arrives on the wire.
///
/// Missing parts deserialize as `None`; `T` needs no `Default`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Envelope<T> {
    #[serde(rename = "MWHEADER")]
    pub header: Option<MwHeader>,

    #[serde(rename = "TRANRQ")]
    pub tranrq: Option<T>,
}

/// Envelope whose header and payload have both passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedEnvelope<T> {
    pub header: MwHeader,
    pub payload: T,
}

impl<T: Validate> Envelope<T> {
    /// Check presence of both parts and every field constraint.
    pub fn validate(self) -> Result<ValidatedEnvelope<T>, Vec<String>> {
        let mut errors = Vec::new();

        match &self.header {
            Some(header) => header.validate(&mut errors),
            None => errors.push("MWHEADER is null".to_string()),
        }
        match &self.tranrq {
            Some(payload) => payload.validate(&mut errors),
            None => errors.push("TRANRQ is null".to_string()),
        }

        match (self.header, self.tranrq) {
            (Some(header), Some(payload)) if errors.is_empty() => {
                Ok(ValidatedEnvelope { header, payload })
            }
            _ => Err(errors),
        }
    }
}

/// Outbound envelope. Parts left as `None` are not serialized.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ResponseEnvelope<T> {
    #[serde(rename = "MWHEADER", skip_serializing_if = "Option::is_none")]
    pub header: Option<MwHeader>,

    #[serde(rename = "TRANRS", skip_serializing_if = "Option::is_none")]
    pub tranrs: Option<T>,
}

impl<T> ResponseEnvelope<T> {
    pub fn new(header: MwHeader, tranrs: T) -> Self {
        Self { header: Some(header), tranrs: Some(tranrs) }
    }

    pub fn header_only(header: MwHeader) -> Self {
        Self { header: Some(header), tranrs: None }
    }

    pub fn payload_only(tranrs: T) -> Self {
        Self { header: None, tranrs: Some(tranrs) }
    }

    pub fn empty() -> Self {
        Self { header: None, tranrs: None }
    }
}

impl<T> Default for ResponseEnvelope<T> {
    fn default() -> Self {
        Self::empty()
    }
}
