use crate::config::ZoneKind;
use crate::error::Error;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationSeconds};
use std::fmt;
use std::time::Duration;

/// Separates the name and type parts of a record identifier.
pub const ID_SEPARATOR: &str = ":::";

/// Zone creation request body.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ZoneInfo {
    pub name: String,
    pub kind: ZoneKind,
    pub nameservers: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    Ns,
    Ptr,
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordType::Ns => write!(f, "NS"),
            RecordType::Ptr => write!(f, "PTR"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeType {
    Replace,
    Delete,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub content: String,
    #[serde(default)]
    pub disabled: bool,
}

/// A set of records sharing a name and type, as sent in a zone `PATCH` request.
#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecordSet {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub changetype: ChangeType,
    #[serde_as(as = "DurationSeconds<u64>")]
    pub ttl: Duration,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub records: Vec<Record>,
}

impl ResourceRecordSet {
    /// A `REPLACE` change setting `name` to hold one record per entry of `contents`.
    pub fn replace<I>(name: String, record_type: RecordType, ttl: Duration, contents: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            name,
            record_type,
            changetype: ChangeType::Replace,
            ttl,
            records: contents
                .into_iter()
                .map(|content| Record {
                    content,
                    disabled: false,
                })
                .collect(),
        }
    }

    /// The record set identifier, `name:::type`.
    #[must_use]
    pub fn id(&self) -> String {
        format!("{}{ID_SEPARATOR}{}", self.name, self.record_type)
    }
}

/// Split a record identifier into its name and type parts.
///
/// # Errors
///
/// Returns [`Error::MalformedRecordID`] unless `id` has exactly one [`ID_SEPARATOR`].
pub fn parse_id(id: &str) -> Result<(&str, &str), Error> {
    let parts: Vec<&str> = id.split(ID_SEPARATOR).collect();
    match parts[..] {
        [name, record_type] => Ok((name, record_type)),
        _ => Err(Error::MalformedRecordID(id.to_string())),
    }
}
