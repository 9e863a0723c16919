use crate::arpa;
use crate::error::{Error, FieldError};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationSeconds};
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use trust_dns_proto::rr::Name;

const DEFAULT_NS_TTL: Duration = Duration::from_secs(3_600);

/// Reverse zones and PTR records to provision.
///
/// Every field is checked when the config is loaded, see [`Config::validate`].
#[serde_as]
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    /// TTL for the NS records of each reverse zone.
    #[serde_as(as = "DurationSeconds<u64>")]
    #[serde(default = "default_ns_ttl")]
    pub ns_ttl: Duration,
    #[serde(default)]
    pub reverse_zones: Vec<ReverseZoneConfig>,
    #[serde(default)]
    pub ptr_records: Vec<PtrRecordConfig>,
}

/// A reverse zone, identified by the network it covers.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub struct ReverseZoneConfig {
    /// Must be a `/8`, `/16` or `/24` IPv4 block, or an IPv6 block on a nibble boundary.
    pub cidr: String,
    pub kind: ZoneKind,
    /// Fully qualified nameserver names.
    pub nameservers: Vec<String>,
}

/// A PTR record for a single address.
#[serde_as]
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub struct PtrRecordConfig {
    pub ip_address: String,
    /// Fully qualified name the address points to.
    pub hostname: String,
    #[serde_as(as = "DurationSeconds<u64>")]
    pub ttl: Duration,
    /// The reverse zone the record is created in. Must contain the record's PTR name.
    pub reverse_zone: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneKind {
    Master,
    Slave,
}

impl fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneKind::Master => write!(f, "Master"),
            ZoneKind::Slave => write!(f, "Slave"),
        }
    }
}

fn default_ns_ttl() -> Duration {
    DEFAULT_NS_TTL
}

impl Config {
    /// Load and validate a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IO`] if the file can't be read, [`Error::InvalidJSON`] if it doesn't
    /// deserialize, and [`Error::InvalidConfig`] if any field fails [`Config::validate`].
    pub fn try_from_file(p: impl AsRef<Path>) -> Result<Self, Error> {
        let f = File::open(p)?;
        let reader = BufReader::new(f);
        let conf: Config = serde_json::from_reader(reader)?;
        conf.validate()?;
        Ok(conf)
    }

    /// Check every field, reporting all failures at once.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] listing a [`FieldError`] for each bad field.
    pub fn validate(&self) -> Result<(), Error> {
        let mut errors: Vec<FieldError> = Vec::default();

        for (i, zone) in self.reverse_zones.iter().enumerate() {
            if let Err(errs) = arpa::validate_cidr(&zone.cidr, &format!("reverse_zones[{i}].cidr"))
            {
                errors.extend(errs);
            }
            for (j, ns) in zone.nameservers.iter().enumerate() {
                if let Err(err) = parse_fqdn(ns) {
                    errors.push(FieldError::new(
                        format!("reverse_zones[{i}].nameservers[{j}]"),
                        err,
                    ));
                }
            }
        }

        for (i, record) in self.ptr_records.iter().enumerate() {
            if let Err(err) = parse_fqdn(&record.hostname) {
                errors.push(FieldError::new(format!("ptr_records[{i}].hostname"), err));
            }
            if let Err(err) = record.check_zone() {
                let field = match err {
                    Error::InvalidIPFormat(_) => "ip_address",
                    _ => "reverse_zone",
                };
                errors.push(FieldError::new(format!("ptr_records[{i}].{field}"), err));
            }
        }

        if errors.is_empty() {
            tracing::debug!(
                "validated {} reverse zones and {} PTR records",
                self.reverse_zones.len(),
                self.ptr_records.len()
            );
            return Ok(());
        }
        for err in &errors {
            tracing::warn!("{err}");
        }
        Err(Error::InvalidConfig(errors))
    }
}

impl PtrRecordConfig {
    /// The fully qualified PTR record name for [`PtrRecordConfig::ip_address`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIPFormat`] if the address doesn't parse.
    pub fn record_name(&self) -> Result<String, Error> {
        arpa::ptr_record_name(&self.ip_address)
    }

    fn check_zone(&self) -> Result<(), Error> {
        let record = self.record_name()?;
        arpa::parse_reverse_zone_name(&self.reverse_zone)?;

        let outside = || Error::RecordOutsideZone {
            record: record.clone(),
            zone: self.reverse_zone.clone(),
        };
        let zone_name = Name::from_str(&self.reverse_zone).map_err(|_| outside())?;
        let record_name = Name::from_str(&record).map_err(|_| outside())?;
        if zone_name.zone_of(&record_name) {
            Ok(())
        } else {
            Err(outside())
        }
    }
}

/// Parse `value` as a fully qualified, non-root DNS name.
pub(crate) fn parse_fqdn(value: &str) -> Result<Name, Error> {
    let invalid = |reason: String| Error::InvalidDomainName(value.to_string(), reason);
    let name = Name::from_str(value).map_err(|err| invalid(err.to_string()))?;
    if !name.is_fqdn() {
        return Err(invalid("not fully qualified".to_string()));
    }
    if name.is_root() {
        return Err(invalid("root is not a host name".to_string()));
    }
    Ok(name)
}
