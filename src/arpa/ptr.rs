//! PTR record names for single host addresses.

use crate::arpa::{self, Family};
use crate::error::Error;
use std::net::{IpAddr, Ipv6Addr};
use std::str::FromStr;

/// The labels of the PTR record name for `ip`, without the `in-addr.arpa.`/`ip6.arpa.` suffix.
///
/// IPv4-mapped IPv6 addresses are encoded as IPv4. Use [`ptr_record_name`] for the full name.
///
/// # Errors
///
/// Returns [`Error::InvalidIPFormat`] if `ip` isn't an IPv4 or IPv6 address.
pub fn ptr_labels(ip: &str) -> Result<String, Error> {
    let parsed = IpAddr::from_str(ip).map_err(|_| Error::InvalidIPFormat(ip.to_string()))?;
    Ok(labels_for(parsed))
}

/// The fully qualified PTR record name for `ip`, e.g. `3.2.1.10.in-addr.arpa.` for `10.1.2.3`.
///
/// # Errors
///
/// Returns [`Error::InvalidIPFormat`] if `ip` isn't an IPv4 or IPv6 address.
pub fn ptr_record_name(ip: &str) -> Result<String, Error> {
    let parsed = IpAddr::from_str(ip).map_err(|_| Error::InvalidIPFormat(ip.to_string()))?;
    Ok(fqdn_for(parsed))
}

/// The fully qualified PTR record name for an already parsed address.
#[must_use]
pub fn fqdn_for(ip: IpAddr) -> String {
    let suffix = Family::of(&ip).suffix();
    format!("{}{suffix}", labels_for(ip))
}

fn labels_for(ip: IpAddr) -> String {
    match arpa::canonical(ip) {
        IpAddr::V4(v4) => arpa::reversed_labels(&v4.octets(), ToString::to_string),
        IpAddr::V6(v6) => {
            arpa::reversed_labels(&arpa::nibbles(&v6.octets()), |n| format!("{n:x}"))
        }
    }
}

/// Recover the host address a fully qualified PTR record name encodes.
///
/// # Errors
///
/// Returns [`Error::UnsupportedSuffix`] if `name` isn't under `in-addr.arpa.` or `ip6.arpa.`,
/// [`Error::MalformedPTRName`] if it doesn't have a label for every octet or nibble of an
/// address, and [`Error::InvalidOctet`]/[`Error::InvalidNibble`] for labels that don't parse.
pub fn parse_ptr_record_name(name: &str) -> Result<IpAddr, Error> {
    let (family, labels) = Family::split_suffix(name)?;
    let labels: Vec<&str> = labels.split('.').collect();
    if labels.len() != family.address_labels() {
        tracing::trace!("rejected PTR name \"{name}\": {} labels", labels.len());
        return Err(Error::MalformedPTRName {
            family,
            name: name.to_string(),
        });
    }

    match family {
        Family::V4 => {
            let octets = labels
                .iter()
                .rev()
                .map(|label| arpa::parse_octet(label))
                .collect::<Result<Vec<u8>, Error>>()?;
            Ok(IpAddr::V4(arpa::ipv4_from_octets(&octets)))
        }
        Family::V6 => {
            let nibbles = labels
                .iter()
                .rev()
                .map(|label| arpa::parse_nibble(label))
                .collect::<Result<Vec<u8>, Error>>()?;
            let mut octets = [0u8; 16];
            arpa::pack_nibbles(&nibbles, &mut octets);
            Ok(IpAddr::V6(Ipv6Addr::from(octets)))
        }
    }
}
