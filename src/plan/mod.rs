//! Provisioning plans for reverse zones and PTR records.
//!
//! A [`Plan`] is the list of changes a DNS control-plane API needs to create the zones and
//! records of a [`Config`]. Building a plan performs no I/O: sending the requests is left to the
//! caller.
//!
//! E.g. with config:
//! ```json
//! {
//!   "reverse_zones": [
//!     { "cidr": "172.16.0.0/16", "kind": "Master", "nameservers": ["ns1.example.com."] }
//!   ],
//!   "ptr_records": [
//!     { "ip_address": "172.16.1.10", "hostname": "web.example.com.", "ttl": 300,
//!       "reverse_zone": "16.172.in-addr.arpa." }
//!   ]
//! }
//! ```
//!
//! The plan creates zone `16.172.in-addr.arpa.` with an `NS` record set pointing at
//! `ns1.example.com.`, and replaces the record set `10.1.16.172.in-addr.arpa.:::PTR` with a
//! single `PTR` record for `web.example.com.`.
//!
//! # Import
//!
//! Existing zones and records are identified by name. [`import_reverse_zone`] and
//! [`import_ptr_address`] recover the CIDR block or address such a name was built from.

pub mod model;

use crate::arpa;
use crate::config::{Config, PtrRecordConfig, ReverseZoneConfig};
use crate::error::Error;
use ipnetwork::IpNetwork;
use model::{RecordType, ResourceRecordSet, ZoneInfo};
use serde::Serialize;
use std::net::IpAddr;
use std::time::Duration;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub zones: Vec<ZonePlan>,
    pub ptr_records: Vec<PtrPlan>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub struct ZonePlan {
    pub cidr: String,
    pub zone: ZoneInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ns_rrset: Option<ResourceRecordSet>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub struct PtrPlan {
    pub id: String,
    pub zone: String,
    pub rrset: ResourceRecordSet,
}

impl Plan {
    /// Build the plan for a validated config.
    ///
    /// # Errors
    ///
    /// Returns the first codec [`Error`] hit. A config that passed
    /// [`Config::validate`] produces none.
    pub fn from_config(conf: &Config) -> Result<Self, Error> {
        let zones = conf
            .reverse_zones
            .iter()
            .map(|zone| ZonePlan::new(zone, conf.ns_ttl))
            .collect::<Result<Vec<_>, Error>>()?;
        let ptr_records = conf
            .ptr_records
            .iter()
            .map(PtrPlan::new)
            .collect::<Result<Vec<_>, Error>>()?;
        tracing::info!(
            "planned {} reverse zones and {} PTR records",
            zones.len(),
            ptr_records.len()
        );
        Ok(Self { zones, ptr_records })
    }
}

impl ZonePlan {
    fn new(zone: &ReverseZoneConfig, ns_ttl: Duration) -> Result<Self, Error> {
        let name = arpa::reverse_zone_name(&zone.cidr)?;
        tracing::debug!("reverse zone for {} is \"{name}\"", zone.cidr);

        let ns_rrset = (!zone.nameservers.is_empty()).then(|| {
            ResourceRecordSet::replace(
                name.clone(),
                RecordType::Ns,
                ns_ttl,
                zone.nameservers.iter().cloned(),
            )
        });
        Ok(Self {
            cidr: zone.cidr.clone(),
            zone: ZoneInfo {
                name,
                kind: zone.kind,
                nameservers: zone.nameservers.clone(),
            },
            ns_rrset,
        })
    }
}

impl PtrPlan {
    fn new(record: &PtrRecordConfig) -> Result<Self, Error> {
        let name = record.record_name()?;
        tracing::debug!(
            "PTR record for {} is \"{name}\" in \"{}\"",
            record.ip_address,
            record.reverse_zone
        );
        let rrset = ResourceRecordSet::replace(
            name,
            RecordType::Ptr,
            record.ttl,
            [record.hostname.clone()],
        );
        Ok(Self {
            id: rrset.id(),
            zone: record.reverse_zone.clone(),
            rrset,
        })
    }
}

/// The address a PTR record identifier (`name:::type`) was created for.
///
/// # Errors
///
/// Returns [`Error::MalformedRecordID`] if `record_id` isn't an identifier, or any error of
/// [`arpa::parse_ptr_record_name`] for its name part.
pub fn import_ptr_address(record_id: &str) -> Result<IpAddr, Error> {
    let (name, _) = model::parse_id(record_id)?;
    let ip = arpa::parse_ptr_record_name(name)?;
    tracing::debug!("imported PTR record \"{record_id}\" as {ip}");
    Ok(ip)
}

/// The CIDR block an existing reverse zone covers.
///
/// # Errors
///
/// Returns any error of [`arpa::parse_reverse_zone_name`].
pub fn import_reverse_zone(zone_name: &str) -> Result<IpNetwork, Error> {
    let cidr = arpa::parse_reverse_zone_name(zone_name)?;
    tracing::debug!("imported reverse zone \"{zone_name}\" as {cidr}");
    Ok(cidr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ZoneKind;
    use model::ChangeType;

    fn config() -> Config {
        serde_json::from_str(
            r#"{
              "ns_ttl": 7200,
              "reverse_zones": [
                { "cidr": "172.16.0.0/16", "kind": "Master",
                  "nameservers": ["ns1.example.com.", "ns2.example.com."] },
                { "cidr": "2001:db8::/32", "kind": "Slave", "nameservers": [] }
              ],
              "ptr_records": [
                { "ip_address": "172.16.1.10", "hostname": "web.example.com.", "ttl": 300,
                  "reverse_zone": "16.172.in-addr.arpa." }
              ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn zones() {
        let plan = Plan::from_config(&config()).unwrap();
        assert_eq!(plan.zones.len(), 2);

        let v4 = &plan.zones[0];
        assert_eq!(v4.zone.name, "16.172.in-addr.arpa.");
        assert_eq!(v4.zone.kind, ZoneKind::Master);
        let ns = v4.ns_rrset.as_ref().unwrap();
        assert_eq!(ns.name, "16.172.in-addr.arpa.");
        assert_eq!(ns.record_type, RecordType::Ns);
        assert_eq!(ns.changetype, ChangeType::Replace);
        assert_eq!(ns.ttl, Duration::from_secs(7_200));
        assert_eq!(ns.records.len(), 2);

        let v6 = &plan.zones[1];
        assert_eq!(v6.zone.name, "8.b.d.0.1.0.0.2.ip6.arpa.");
        assert!(v6.ns_rrset.is_none());
    }

    #[test]
    fn ptr_records() {
        let plan = Plan::from_config(&config()).unwrap();
        let ptr = &plan.ptr_records[0];
        assert_eq!(ptr.id, "10.1.16.172.in-addr.arpa.:::PTR");
        assert_eq!(ptr.zone, "16.172.in-addr.arpa.");
        assert_eq!(ptr.rrset.records[0].content, "web.example.com.");
        assert_eq!(ptr.rrset.ttl, Duration::from_secs(300));
    }

    #[test]
    fn import_ptr() {
        assert_eq!(
            import_ptr_address("10.1.16.172.in-addr.arpa.:::PTR")
                .unwrap()
                .to_string(),
            "172.16.1.10"
        );
        assert!(matches!(
            import_ptr_address("10.1.16.172.in-addr.arpa."),
            Err(Error::MalformedRecordID(_))
        ));
        assert!(matches!(
            import_ptr_address("16.172.in-addr.arpa.:::PTR"),
            Err(Error::MalformedPTRName { .. })
        ));
    }

    #[test]
    fn import_zone() {
        assert_eq!(
            import_reverse_zone("16.172.in-addr.arpa.")
                .unwrap()
                .to_string(),
            "172.16.0.0/16"
        );
        assert!(import_reverse_zone("example.com.").is_err());
    }

    #[test]
    fn plan_of_invalid_config_fails() {
        let mut conf = config();
        conf.ptr_records[0].ip_address = "not.an.ip".to_string();
        assert_eq!(
            Plan::from_config(&conf),
            Err(Error::InvalidIPFormat("not.an.ip".to_string()))
        );
    }
}
