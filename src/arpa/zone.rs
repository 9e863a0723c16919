//! Reverse zone names for CIDR blocks.

use crate::arpa::{self, cidr, Family};
use crate::error::Error;
use ipnetwork::IpNetwork;
use std::net::{IpAddr, Ipv6Addr};
use std::ops::RangeInclusive;

const IPV4_ZONE_LABELS: RangeInclusive<usize> = 1..=3;
const IPV6_ZONE_LABELS: RangeInclusive<usize> = 1..=32;

/// The reverse zone name for the network `cidr`, e.g. `16.172.in-addr.arpa.` for
/// `172.16.0.0/16`.
///
/// One label is emitted per whole octet (IPv4) or nibble (IPv6) covered by the prefix length.
/// Host bits are ignored. The allowed zone cuts of [`validate_cidr`][arpa::validate_cidr] are
/// *not* enforced here: a `/20` yields the same name as a `/16`.
///
/// # Errors
///
/// Returns [`Error::InvalidCIDRFormat`] if `cidr` doesn't parse, and
/// [`Error::UnsupportedPrefixLength`] if the prefix is too short to cover a single label.
pub fn reverse_zone_name(cidr: &str) -> Result<String, Error> {
    let network = cidr::parse_cidr(cidr)?;
    let (family, labels) = match network {
        IpNetwork::V4(v4) => {
            let count = owned_labels(Family::V4, v4.prefix())?;
            let octets = v4.network().octets();
            let labels = arpa::reversed_labels(&octets[..count], ToString::to_string);
            (Family::V4, labels)
        }
        IpNetwork::V6(v6) => {
            let count = owned_labels(Family::V6, v6.prefix())?;
            let nibbles = arpa::nibbles(&v6.network().octets());
            let labels = arpa::reversed_labels(&nibbles[..count], |n| format!("{n:x}"));
            (Family::V6, labels)
        }
    };
    Ok(format!("{labels}{}", family.suffix()))
}

fn owned_labels(family: Family, prefix: u8) -> Result<usize, Error> {
    match prefix / family.label_bits() {
        0 => Err(Error::UnsupportedPrefixLength { family, prefix }),
        count => Ok(usize::from(count)),
    }
}

/// Recover the network a reverse zone name covers, e.g. `172.16.0.0/16` for
/// `16.172.in-addr.arpa.`.
///
/// The prefix length is the label count times 8 (IPv4) or 4 (IPv6); address bits past the
/// labels are zero. IPv4 names take 1 to 3 labels. IPv6 names take 1 to 32 labels, but the
/// resulting prefix length must lie between 4 and 124.
///
/// # Errors
///
/// Returns [`Error::UnsupportedSuffix`] if `name` isn't under `in-addr.arpa.` or `ip6.arpa.`,
/// [`Error::MalformedZoneName`] for an empty name or a label count outside the family's range,
/// [`Error::InvalidOctet`]/[`Error::InvalidNibble`] for labels that don't parse, and
/// [`Error::UnsupportedPrefixLength`] for an IPv6 prefix outside `4..=124`.
pub fn parse_reverse_zone_name(name: &str) -> Result<IpNetwork, Error> {
    let (family, labels) = Family::split_suffix(name)?;
    let malformed = || Error::MalformedZoneName {
        family,
        name: name.to_string(),
    };
    if labels.is_empty() {
        return Err(malformed());
    }

    let labels: Vec<&str> = labels.split('.').collect();
    let allowed = match family {
        Family::V4 => IPV4_ZONE_LABELS,
        Family::V6 => IPV6_ZONE_LABELS,
    };
    if !allowed.contains(&labels.len()) {
        tracing::trace!("rejected zone name \"{name}\": {} labels", labels.len());
        return Err(malformed());
    }
    let prefix = u8::try_from(labels.len()).map_err(|_| malformed())? * family.label_bits();

    let addr = match family {
        Family::V4 => {
            let octets = labels
                .iter()
                .rev()
                .map(|label| arpa::parse_octet(label))
                .collect::<Result<Vec<u8>, Error>>()?;
            IpAddr::V4(arpa::ipv4_from_octets(&octets))
        }
        Family::V6 => {
            let nibbles = labels
                .iter()
                .rev()
                .map(|label| arpa::parse_nibble(label))
                .collect::<Result<Vec<u8>, Error>>()?;
            if !Family::V6.prefix_allowed(prefix) {
                return Err(Error::UnsupportedPrefixLength {
                    family: Family::V6,
                    prefix,
                });
            }
            let mut octets = [0u8; 16];
            arpa::pack_nibbles(&nibbles, &mut octets);
            IpAddr::V6(Ipv6Addr::from(octets))
        }
    };

    IpNetwork::new(addr, prefix).map_err(|_| malformed())
}
