//! Error types.

use crate::arpa::Family;

/// Error enumerates the possible ARPA Crab error states.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Returned when a CIDR string isn't of the form `address/prefix_length`, when the address
    /// doesn't parse, or when the prefix length is out of range for the address family.
    #[error("invalid CIDR format: \"{0}\": {1}")]
    InvalidCIDRFormat(String, String),

    /// Returned when a CIDR prefix length doesn't fall on a boundary that can be expressed as a
    /// reverse zone. See [`Family::allowed_prefixes`].
    #[error("{family} prefix length must be {} (got /{prefix})", .family.allowed_prefixes())]
    UnsupportedPrefixLength { family: Family, prefix: u8 },

    /// Returned when an IP address string doesn't parse as either IPv4 or IPv6.
    #[error("invalid IP address: \"{0}\"")]
    InvalidIPFormat(String),

    /// Returned when a name ends in neither `.in-addr.arpa.` nor `.ip6.arpa.`.
    #[error("unsupported reverse name format: \"{0}\"")]
    UnsupportedSuffix(String),

    /// Returned when a PTR record name doesn't have exactly 4 (IPv4) or 32 (IPv6) labels.
    #[error("invalid {family} PTR record name format: \"{name}\"")]
    MalformedPTRName { family: Family, name: String },

    /// Returned when an `in-addr.arpa.` label isn't a decimal octet in `0..=255`.
    #[error("invalid IPv4 octet: \"{0}\"")]
    InvalidOctet(String),

    /// Returned when an `ip6.arpa.` label isn't a single hex digit.
    #[error("invalid IPv6 nibble: \"{0}\"")]
    InvalidNibble(String),

    /// Returned when a reverse zone name is empty or has too many labels for its family.
    #[error("invalid {family} reverse zone name: \"{name}\"")]
    MalformedZoneName { family: Family, name: String },

    /// Returned when a record identifier isn't of the form `name:::type`.
    #[error("unknown record ID format: \"{0}\"")]
    MalformedRecordID(String),

    /// Returned when a PTR record name doesn't fall inside the reverse zone it's configured for.
    #[error("PTR record \"{record}\" is not inside zone \"{zone}\"")]
    RecordOutsideZone { record: String, zone: String },

    /// Returned when a hostname or nameserver isn't a valid DNS name.
    #[error("invalid DNS name \"{0}\": {1}")]
    InvalidDomainName(String, String),

    /// Returned when one or more fields of a [`Config`][crate::config::Config] fail validation.
    #[error("invalid config: {}", display_field_errors(.0))]
    InvalidConfig(Vec<FieldError>),

    /// Returned when a generic IO error occurs.
    #[error("an IO error occurred: {0}")]
    IO(String),

    /// Returned when [trying to load a `Config`][crate::config::Config::try_from_file] fails
    /// due to invalid JSON content.
    #[error("invalid JSON: {0}")]
    InvalidJSON(String),
}

/// An [`Error`] attributed to the named input field that caused it.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
#[error("{field}: {source}")]
pub struct FieldError {
    pub field: String,
    pub source: Error,
}

impl FieldError {
    pub fn new(field: impl Into<String>, source: Error) -> Self {
        Self {
            field: field.into(),
            source,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IO(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidJSON(err.to_string())
    }
}

fn display_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
