//! Shared types used across Lookout.
//!
//! [`IndicatorType`] is the closed vocabulary the classifier, the analyzer
//! registry and the command encoding all agree on.

use crate::error::LookoutError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kinds of indicator the classifier can recognize.
///
/// `Text` is the fallback for selections that match no validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorType {
    /// Free text, no indicator recognized
    Text,
    /// IPv4 or IPv6 address
    Ip,
    /// Domain name
    Domain,
    /// http, https or ftp URL
    Url,
    /// Email address
    Email,
    /// Autonomous system number (`AS13335`)
    Asn,
    /// MD5, SHA1, SHA256 or SHA512 hex digest
    Hash,
    /// CVE identifier (`CVE-2021-44228`)
    Cve,
    /// Bitcoin address
    Btc,
    /// Ethereum address
    Eth,
    /// Monero address
    Xmr,
    /// MAC address
    Mac,
    /// Google Analytics tracking / measurement ID
    GaTrackId,
    /// Google `AdSense` publisher ID
    GaPubId,
}

impl IndicatorType {
    /// Primary-type precedence. When a selection validates as several types,
    /// the first one in this list is the best match.
    pub const PRECEDENCE: [IndicatorType; 13] = [
        Self::Hash,
        Self::Cve,
        Self::Ip,
        Self::Domain,
        Self::Url,
        Self::Email,
        Self::Asn,
        Self::Mac,
        Self::Btc,
        Self::Eth,
        Self::Xmr,
        Self::GaTrackId,
        Self::GaPubId,
    ];

    /// Machine name, identical to the serde representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Ip => "ip",
            Self::Domain => "domain",
            Self::Url => "url",
            Self::Email => "email",
            Self::Asn => "asn",
            Self::Hash => "hash",
            Self::Cve => "cve",
            Self::Btc => "btc",
            Self::Eth => "eth",
            Self::Xmr => "xmr",
            Self::Mac => "mac",
            Self::GaTrackId => "ga_track_id",
            Self::GaPubId => "ga_pub_id",
        }
    }

    /// Human-readable label used in menu titles ("Search this IP on ...").
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Ip => "IP",
            Self::Domain => "domain",
            Self::Url => "URL",
            Self::Email => "email",
            Self::Asn => "ASN",
            Self::Hash => "hash",
            Self::Cve => "CVE",
            Self::Btc => "BTC address",
            Self::Eth => "ETH address",
            Self::Xmr => "XMR address",
            Self::Mac => "MAC address",
            Self::GaTrackId => "GA tracking ID",
            Self::GaPubId => "GA publisher ID",
        }
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndicatorType {
    type Err = LookoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        std::iter::once(Self::Text)
            .chain(Self::PRECEDENCE)
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| LookoutError::Validation(format!("unknown indicator type '{s}'")))
    }
}

/// Digest algorithm of a `hash` indicator, derived from its hex length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashKind {
    /// 32 hex characters
    Md5,
    /// 40 hex characters
    Sha1,
    /// 64 hex characters
    Sha256,
    /// 128 hex characters
    Sha512,
}

impl HashKind {
    /// Map a hex digest length to its algorithm.
    #[must_use]
    pub fn from_hex_len(len: usize) -> Option<Self> {
        match len {
            32 => Some(Self::Md5),
            40 => Some(Self::Sha1),
            64 => Some(Self::Sha256),
            128 => Some(Self::Sha512),
            _ => None,
        }
    }

    /// Hex digest length for this algorithm.
    #[must_use]
    pub fn hex_len(&self) -> usize {
        match self {
            Self::Md5 => 32,
            Self::Sha1 => 40,
            Self::Sha256 => 64,
            Self::Sha512 => 128,
        }
    }
}

impl fmt::Display for HashKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
        })
    }
}

/// A recognized (type, value) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Indicator {
    /// Recognized type
    #[serde(rename = "type")]
    pub ty: IndicatorType,
    /// The indicator text, as it will be queried
    pub value: String,
}

impl Indicator {
    /// Create a new indicator.
    #[must_use]
    pub fn new(ty: IndicatorType, value: impl Into<String>) -> Self {
        Self {
            ty,
            value: value.into(),
        }
    }

    /// Digest algorithm, for `hash` indicators only.
    #[must_use]
    pub fn hash_kind(&self) -> Option<HashKind> {
        if self.ty == IndicatorType::Hash {
            HashKind::from_hex_len(self.value.len())
        } else {
            None
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.ty, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicator_type_round_trips_through_from_str() {
        for ty in std::iter::once(IndicatorType::Text).chain(IndicatorType::PRECEDENCE) {
            let parsed: IndicatorType = ty.as_str().parse().expect("parse indicator type");
            assert_eq!(parsed, ty);
        }
    }

    #[test]
    fn test_indicator_type_unknown() {
        let result = "ssdeep".parse::<IndicatorType>();
        assert!(matches!(result, Err(LookoutError::Validation(_))));
    }

    #[test]
    fn test_indicator_type_serialization() {
        let json = serde_json::to_string(&IndicatorType::GaTrackId).expect("serialize type");
        assert_eq!(json, "\"ga_track_id\"");

        let parsed: IndicatorType = serde_json::from_str("\"cve\"").expect("deserialize type");
        assert_eq!(parsed, IndicatorType::Cve);
    }

    #[test]
    fn test_precedence_excludes_text() {
        assert!(!IndicatorType::PRECEDENCE.contains(&IndicatorType::Text));
        assert_eq!(IndicatorType::PRECEDENCE[0], IndicatorType::Hash);
    }

    #[test]
    fn test_hash_kind_lengths() {
        assert_eq!(HashKind::from_hex_len(32), Some(HashKind::Md5));
        assert_eq!(HashKind::from_hex_len(40), Some(HashKind::Sha1));
        assert_eq!(HashKind::from_hex_len(64), Some(HashKind::Sha256));
        assert_eq!(HashKind::from_hex_len(128), Some(HashKind::Sha512));
        assert_eq!(HashKind::from_hex_len(31), None);
        assert_eq!(HashKind::Sha256.hex_len(), 64);
    }

    #[test]
    fn test_indicator_hash_kind() {
        let md5 = Indicator::new(IndicatorType::Hash, "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(md5.hash_kind(), Some(HashKind::Md5));

        let ip = Indicator::new(IndicatorType::Ip, "8.8.8.8");
        assert_eq!(ip.hash_kind(), None);
        assert_eq!(ip.to_string(), "ip:8.8.8.8");
    }
}
