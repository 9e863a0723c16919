//! CIDR parsing and reverse zone granularity checks.

use crate::arpa::Family;
use crate::error::{Error, FieldError};
use ipnetwork::IpNetwork;
use std::net::IpAddr;
use std::str::FromStr;

/// Parse `value` as `address/prefix_length`.
///
/// Host bits beyond the prefix are kept; use [`IpNetwork::network`] for the network address.
///
/// # Errors
///
/// Returns [`Error::InvalidCIDRFormat`] if the `/` separator is missing, the address doesn't
/// parse, or the prefix length is not a number within the address family's range.
pub fn parse_cidr(value: &str) -> Result<IpNetwork, Error> {
    let invalid = |reason: String| Error::InvalidCIDRFormat(value.to_string(), reason);

    let (addr, prefix) = value
        .split_once('/')
        .ok_or_else(|| invalid("missing prefix length".to_string()))?;
    let addr = IpAddr::from_str(addr).map_err(|err| invalid(err.to_string()))?;
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(format!("invalid prefix length \"{prefix}\"")));
    }
    let prefix = u8::from_str(prefix).map_err(|err| invalid(err.to_string()))?;
    IpNetwork::new(addr, prefix).map_err(|err| invalid(err.to_string()))
}

/// Check that `value` is a CIDR block a reverse zone can be delegated for.
///
/// IPv4 blocks must be `/8`, `/16` or `/24`. IPv6 blocks must have a prefix length that is a
/// multiple of 4 between 4 and 124. IPv4-mapped IPv6 addresses are held to the IPv4 rules.
///
/// `field` names the input being validated and is attached to every returned error.
///
/// # Errors
///
/// Returns a [`FieldError`] wrapping [`Error::InvalidCIDRFormat`] for malformed input, or
/// [`Error::UnsupportedPrefixLength`] when the prefix length isn't an allowed zone cut.
pub fn validate_cidr(value: &str, field: &str) -> Result<(), Vec<FieldError>> {
    let network = parse_cidr(value).map_err(|err| vec![FieldError::new(field, err)])?;

    let family = Family::of(&network.network());
    let prefix = network.prefix();
    if !family.prefix_allowed(prefix) {
        tracing::trace!("rejected {field} \"{value}\": {family} prefix /{prefix}");
        return Err(vec![FieldError::new(
            field,
            Error::UnsupportedPrefixLength { family, prefix },
        )]);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::ipv4_8("10.0.0.0/8")]
    #[case::ipv4_16("172.16.0.0/16")]
    #[case::ipv4_24("192.168.1.0/24")]
    #[case::ipv4_host_bits("10.1.2.3/8")]
    #[case::ipv6_4("2000::/4")]
    #[case::ipv6_8("2001::/8")]
    #[case::ipv6_12("2001:db8::/12")]
    #[case::ipv6_16("2001:db8::/16")]
    #[case::ipv6_32("2001:db8::/32")]
    #[case::ipv6_124("2001:db8::/124")]
    fn accepts(#[case] cidr: &str) {
        assert_eq!(validate_cidr(cidr, "cidr"), Ok(()));
    }

    #[rstest]
    #[case::ipv4_12("10.0.0.0/12")]
    #[case::ipv4_0("0.0.0.0/0")]
    #[case::ipv4_32("10.0.0.1/32")]
    #[case::ipv6_3("2001::/3")]
    #[case::ipv6_10("2001::/10")]
    #[case::ipv6_125("2001::/125")]
    #[case::ipv6_128("2001::1/128")]
    #[case::mapped_ipv4("::ffff:10.0.0.0/104")]
    fn rejects_prefix(#[case] cidr: &str) {
        let errs = validate_cidr(cidr, "cidr").unwrap_err();
        assert_eq!(errs.len(), 1);
        assert!(matches!(
            errs[0].source,
            Error::UnsupportedPrefixLength { .. }
        ));
    }

    #[rstest]
    #[case::invalid_ipv4("256.0.0.0/8")]
    #[case::no_prefix_ipv4("10.0.0.0")]
    #[case::invalid_ipv6("2001:g::/8")]
    #[case::no_prefix_ipv6("2001::")]
    #[case::prefix_too_long_ipv4("10.0.0.0/33")]
    #[case::prefix_too_long_ipv6("2001::/129")]
    #[case::signed_prefix("10.0.0.0/+8")]
    #[case::empty_prefix("10.0.0.0/")]
    #[case::empty("")]
    fn rejects_format(#[case] cidr: &str) {
        let errs = validate_cidr(cidr, "cidr").unwrap_err();
        assert_eq!(errs.len(), 1);
        assert!(matches!(errs[0].source, Error::InvalidCIDRFormat(_, _)));
    }

    #[test]
    fn error_names_field_and_granularity() {
        let errs = validate_cidr("10.0.0.0/12", "reverse_zones[0].cidr").unwrap_err();
        assert_eq!(errs[0].field, "reverse_zones[0].cidr");
        assert!(errs[0]
            .to_string()
            .contains("prefix length must be 8, 16, or 24"));

        let errs = validate_cidr("2001::/10", "cidr").unwrap_err();
        assert!(errs[0]
            .to_string()
            .contains("prefix length must be a multiple of 4 between 4 and 124"));
    }

    #[test]
    fn parse_keeps_host_bits() {
        let network = parse_cidr("10.1.2.3/8").unwrap();
        assert_eq!(network.ip().to_string(), "10.1.2.3");
        assert_eq!(network.network().to_string(), "10.0.0.0");
        assert_eq!(network.prefix(), 8);
    }
}
