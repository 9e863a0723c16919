//! Reverse DNS name codec.
//!
//! Converts between network addresses and the names used for reverse lookups under the
//! `in-addr.arpa.` ([RFC-1035][RFC-1035]) and `ip6.arpa.` ([RFC-3596][RFC-3596]) trees.
//!
//! # PTR record names
//!
//! A PTR record name encodes a single host address. IPv4 addresses are written as their four
//! decimal octets in reverse order, IPv6 addresses as their 32 hex nibbles in reverse order:
//!
//! ```
//! # use arpacrab::arpa;
//! assert_eq!(arpa::ptr_record_name("10.1.2.3").unwrap(), "3.2.1.10.in-addr.arpa.");
//! assert_eq!(
//!     arpa::parse_ptr_record_name("3.2.1.10.in-addr.arpa.").unwrap().to_string(),
//!     "10.1.2.3",
//! );
//! ```
//!
//! # Reverse zone names
//!
//! A reverse zone name encodes a network: only the octets (IPv4) or nibbles (IPv6) covered by the
//! prefix length appear as labels.
//!
//! ```
//! # use arpacrab::arpa;
//! assert_eq!(arpa::reverse_zone_name("172.16.0.0/16").unwrap(), "16.172.in-addr.arpa.");
//! assert_eq!(arpa::reverse_zone_name("2001:db8::/32").unwrap(), "8.b.d.0.1.0.0.2.ip6.arpa.");
//! assert_eq!(
//!     arpa::parse_reverse_zone_name("16.172.in-addr.arpa.").unwrap().to_string(),
//!     "172.16.0.0/16",
//! );
//! ```
//!
//! IPv4 zones may only be cut at octet boundaries that a delegation can use (`/8`, `/16`, `/24`)
//! and IPv6 zones at nibble boundaries between `/4` and `/124`. [`validate_cidr`] enforces this
//! for user input. [`reverse_zone_name`] and [`parse_reverse_zone_name`] are more permissive and
//! work on any label count the name format can carry.
//!
//! Every function here is a pure transform over its arguments.
//!
//! [RFC-1035]: https://www.rfc-editor.org/rfc/rfc1035#section-3.5
//! [RFC-3596]: https://www.rfc-editor.org/rfc/rfc3596#section-2.5

use crate::error::Error;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr};

pub mod cidr;
pub mod ptr;
pub mod zone;

pub use cidr::{parse_cidr, validate_cidr};
pub use ptr::{parse_ptr_record_name, ptr_labels, ptr_record_name};
pub use zone::{parse_reverse_zone_name, reverse_zone_name};

/// Suffix of every IPv4 reverse name, including the leading label separator.
pub const IPV4_SUFFIX: &str = ".in-addr.arpa.";
/// Suffix of every IPv6 reverse name, including the leading label separator.
pub const IPV6_SUFFIX: &str = ".ip6.arpa.";

/// The address family a reverse name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    V4,
    V6,
}

impl Family {
    /// The family of `ip`. IPv4-mapped IPv6 addresses (`::ffff:a.b.c.d`) count as IPv4.
    #[must_use]
    pub fn of(ip: &IpAddr) -> Self {
        match canonical(*ip) {
            IpAddr::V4(_) => Family::V4,
            IpAddr::V6(_) => Family::V6,
        }
    }

    /// The family whose reverse tree `name` ends in, and `name` with that suffix removed.
    pub(crate) fn split_suffix(name: &str) -> Result<(Self, &str), Error> {
        if let Some(labels) = name.strip_suffix(IPV4_SUFFIX) {
            Ok((Family::V4, labels))
        } else if let Some(labels) = name.strip_suffix(IPV6_SUFFIX) {
            Ok((Family::V6, labels))
        } else {
            tracing::trace!("rejected reverse name \"{name}\": unsupported suffix");
            Err(Error::UnsupportedSuffix(name.to_string()))
        }
    }

    /// The reverse tree suffix for this family, e.g. `.in-addr.arpa.`.
    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            Family::V4 => IPV4_SUFFIX,
            Family::V6 => IPV6_SUFFIX,
        }
    }

    /// Number of address bits carried by one label.
    #[must_use]
    pub fn label_bits(self) -> u8 {
        match self {
            Family::V4 => 8,
            Family::V6 => 4,
        }
    }

    /// Number of labels in a PTR record name, i.e. labels for a full host address.
    #[must_use]
    pub fn address_labels(self) -> usize {
        match self {
            Family::V4 => 4,
            Family::V6 => 32,
        }
    }

    /// Human readable description of the prefix lengths [`validate_cidr`] accepts.
    #[must_use]
    pub fn allowed_prefixes(self) -> &'static str {
        match self {
            Family::V4 => "8, 16, or 24",
            Family::V6 => "a multiple of 4 between 4 and 124",
        }
    }

    /// Whether `prefix` is a zone cut [`validate_cidr`] accepts for this family.
    #[must_use]
    pub fn prefix_allowed(self, prefix: u8) -> bool {
        match self {
            Family::V4 => matches!(prefix, 8 | 16 | 24),
            Family::V6 => prefix % 4 == 0 && (4..=124).contains(&prefix),
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::V4 => write!(f, "IPv4"),
            Family::V6 => write!(f, "IPv6"),
        }
    }
}

/// Unwraps IPv4-mapped IPv6 addresses to their IPv4 form.
pub(crate) fn canonical(ip: IpAddr) -> IpAddr {
    match ip {
        IpAddr::V6(v6) => v6.to_ipv4_mapped().map_or(ip, IpAddr::V4),
        IpAddr::V4(_) => ip,
    }
}

/// Splits every byte of `octets` into its high and low nibble, most significant first.
pub(crate) fn nibbles(octets: &[u8]) -> Vec<u8> {
    octets.iter().flat_map(|&b| [b >> 4, b & 0x0F]).collect()
}

/// Packs nibbles (most significant first) into bytes. A trailing odd nibble becomes a high nibble.
pub(crate) fn pack_nibbles(nibbles: &[u8], out: &mut [u8]) {
    for (i, nibble) in nibbles.iter().enumerate() {
        if i % 2 == 0 {
            out[i / 2] = nibble << 4;
        } else {
            out[i / 2] |= nibble;
        }
    }
}

/// Joins units in reverse order with `.`, rendering each with `render`.
pub(crate) fn reversed_labels<T, F>(units: &[T], render: F) -> String
where
    F: Fn(&T) -> String,
{
    units.iter().rev().map(render).collect::<Vec<_>>().join(".")
}

/// Parses a decimal octet label. Rejects signs, leading zeros and values above 255.
pub(crate) fn parse_octet(label: &str) -> Result<u8, Error> {
    let valid_digits = !label.is_empty()
        && label.len() <= 3
        && label.bytes().all(|b| b.is_ascii_digit())
        && (label == "0" || !label.starts_with('0'));
    if !valid_digits {
        return Err(Error::InvalidOctet(label.to_string()));
    }
    label
        .parse::<u8>()
        .map_err(|_| Error::InvalidOctet(label.to_string()))
}

/// Parses a single hex digit label, in either case.
pub(crate) fn parse_nibble(label: &str) -> Result<u8, Error> {
    let mut chars = label.chars();
    match (chars.next().and_then(|c| c.to_digit(16)), chars.next()) {
        (Some(nibble), None) => {
            u8::try_from(nibble).map_err(|_| Error::InvalidNibble(label.to_string()))
        }
        _ => Err(Error::InvalidNibble(label.to_string())),
    }
}

/// Builds an IPv4 address from up to four octets, zero filling the rest.
pub(crate) fn ipv4_from_octets(octets: &[u8]) -> Ipv4Addr {
    let mut bytes = [0u8; 4];
    bytes[..octets.len()].copy_from_slice(octets);
    Ipv4Addr::from(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case("0", Ok(0))]
    #[case("9", Ok(9))]
    #[case("255", Ok(255))]
    #[case("256", Err(()))]
    #[case("010", Err(()))]
    #[case("+1", Err(()))]
    #[case("", Err(()))]
    #[case("1000", Err(()))]
    #[case("a", Err(()))]
    fn octet_labels(#[case] label: &str, #[case] expected: Result<u8, ()>) {
        assert_eq!(parse_octet(label).map_err(|_| ()), expected);
    }

    #[rstest]
    #[case("0", Ok(0))]
    #[case("a", Ok(10))]
    #[case("F", Ok(15))]
    #[case("g", Err(()))]
    #[case("10", Err(()))]
    #[case("", Err(()))]
    fn nibble_labels(#[case] label: &str, #[case] expected: Result<u8, ()>) {
        assert_eq!(parse_nibble(label).map_err(|_| ()), expected);
    }

    #[test]
    fn nibbles_pack_back() {
        let octets = [0x20, 0x01, 0x0d, 0xb8];
        let split = nibbles(&octets);
        assert_eq!(split, vec![2, 0, 0, 1, 0, 0xd, 0xb, 8]);

        let mut packed = [0u8; 4];
        pack_nibbles(&split, &mut packed);
        assert_eq!(packed, octets);
    }

    #[test]
    fn odd_nibble_is_high() {
        let mut packed = [0u8; 2];
        pack_nibbles(&[2, 0, 0], &mut packed);
        assert_eq!(packed, [0x20, 0x00]);
    }

    #[test]
    fn mapped_addresses_are_ipv4() {
        let mapped = IpAddr::from_str("::ffff:10.1.2.3").unwrap();
        assert_eq!(Family::of(&mapped), Family::V4);
        assert_eq!(canonical(mapped), IpAddr::from_str("10.1.2.3").unwrap());

        let plain = IpAddr::from_str("2001:db8::1").unwrap();
        assert_eq!(Family::of(&plain), Family::V6);
    }

    #[test]
    fn suffix_selects_family() {
        assert_eq!(
            Family::split_suffix("1.10.in-addr.arpa.").unwrap(),
            (Family::V4, "1.10")
        );
        assert_eq!(
            Family::split_suffix("2.ip6.arpa.").unwrap(),
            (Family::V6, "2")
        );
        assert!(matches!(
            Family::split_suffix("10.in-addr.arpa"),
            Err(Error::UnsupportedSuffix(_))
        ));
        assert!(matches!(
            Family::split_suffix("example.com."),
            Err(Error::UnsupportedSuffix(_))
        ));
    }

    #[rstest]
    #[case(Family::V4, 8, true)]
    #[case(Family::V4, 16, true)]
    #[case(Family::V4, 24, true)]
    #[case(Family::V4, 12, false)]
    #[case(Family::V4, 32, false)]
    #[case(Family::V6, 4, true)]
    #[case(Family::V6, 124, true)]
    #[case(Family::V6, 0, false)]
    #[case(Family::V6, 10, false)]
    #[case(Family::V6, 128, false)]
    fn prefix_granularity(#[case] family: Family, #[case] prefix: u8, #[case] allowed: bool) {
        assert_eq!(family.prefix_allowed(prefix), allowed);
    }
}
