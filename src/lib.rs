//! ARPA Crab
//!
//! Reverse DNS naming for networks and hosts.
//!
//! Translates IPv4/IPv6 addresses and CIDR blocks to and from the `in-addr.arpa.` and
//! `ip6.arpa.` names used for PTR records and reverse zones ([RFC-1035][RFC-1035],
//! [RFC-3596][RFC-3596]), and turns a declarative list of reverse zones and PTR records into the
//! record set changes a DNS control-plane API expects.
//!
//! [RFC-1035]: https://www.rfc-editor.org/rfc/rfc1035#section-3.5
//! [RFC-3596]: https://www.rfc-editor.org/rfc/rfc3596#section-2.5
//!
#![warn(clippy::pedantic)]

pub mod arpa;
pub mod config;
pub mod error;
pub mod plan;

pub use arpa::Family;
pub use config::Config;
pub use error::{Error, FieldError};
pub use plan::Plan;
