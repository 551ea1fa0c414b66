//! Precompiled regex patterns for indicator validation and extraction.
//!
//! Every indicator grammar is written once as a fragment and compiled twice:
//! anchored (`^...$`) for validators and word-bounded for extractors. Patterns
//! only shape candidates; checks a regex cannot express (octet ranges,
//! checksums, ASN range) live in [`crate::validate`].

use once_cell::sync::Lazy;
use regex::Regex;

/// One RFC 1123 label: 1-63 alnum/hyphen, no leading or trailing hyphen.
pub const LABEL: &str = r"[a-z0-9](?:[a-z0-9\-]{0,61}[a-z0-9])?";

/// Top-level label: alphabetic, or a punycode label.
pub const TLD: &str = r"(?:[a-z]{2,63}|xn--[a-z0-9\-]{1,59})";

/// Email local part.
pub const EMAIL_LOCAL: &str = r"[a-z0-9._%+\-]+";

/// Base58 alphabet as a character class (no `0`, `O`, `I`, `l`).
pub const BASE58: &str = r"[1-9A-HJ-NP-Za-km-z]";

const MAC: &str = r"[0-9a-f]{2}(?:(?::[0-9a-f]{2}){5}|(?:\-[0-9a-f]{2}){5})";
const BTC_LEGACY: &str = r"[13][1-9A-HJ-NP-Za-km-z]{25,34}";
const BTC_BECH32: &str = r"(?i:bc1[ac-hj-np-z02-9]{11,71})";
const GA_TRACK_ID: &str = r"(?:UA-\d{4,10}-\d{1,4}|G-[A-Z0-9]{10})";

fn domain() -> String {
    format!(r"(?:{LABEL}\.)+{TLD}")
}

fn anchored(body: &str) -> Regex {
    Regex::new(&format!("^(?:{body})$")).expect("valid anchored indicator regex")
}

fn bounded(body: &str) -> Regex {
    Regex::new(&format!(r"\b(?:{body})\b")).expect("valid bounded indicator regex")
}

// Domains and hosts
pub static RE_DOMAIN: Lazy<Regex> = Lazy::new(|| anchored(&format!("(?i:{})", domain())));
pub static RE_DOMAIN_FIND: Lazy<Regex> = Lazy::new(|| bounded(&format!("(?i:{})", domain())));

// Emails
pub static RE_EMAIL: Lazy<Regex> =
    Lazy::new(|| anchored(&format!("(?i:{EMAIL_LOCAL}@{})", domain())));
pub static RE_EMAIL_FIND: Lazy<Regex> =
    Lazy::new(|| bounded(&format!("(?i:{EMAIL_LOCAL}@{})", domain())));

// URLs: candidate shape only, host is checked separately
pub static RE_URL: Lazy<Regex> =
    Lazy::new(|| anchored(r"(?i:(?:https?|ftp)://[^\s/?#]+(?:[/?#]\S*)?)"));
pub static RE_URL_FIND: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\b(?:https?|ftp)://[^\s'"<>`]+"#).expect("valid URL regex")
});

// IPv4 candidates (validate with std::net::Ipv4Addr after match)
pub static RE_IPV4: Lazy<Regex> = Lazy::new(|| anchored(r"\d{1,3}(?:\.\d{1,3}){3}"));
pub static RE_IPV4_FIND: Lazy<Regex> = Lazy::new(|| bounded(r"\d{1,3}(?:\.\d{1,3}){3}"));

// IPv6 candidates: colon-separated hex groups, optional dotted-quad tail
pub static RE_IPV6_FIND: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:[0-9a-f]{0,4}:){2,7}(?:\d{1,3}(?:\.\d{1,3}){3}|[0-9a-f]{0,4})")
        .expect("valid ipv6 candidate regex")
});

// Hex digests, one per length
pub static RE_MD5: Lazy<Regex> = Lazy::new(|| anchored(r"[0-9a-fA-F]{32}"));
pub static RE_SHA1: Lazy<Regex> = Lazy::new(|| anchored(r"[0-9a-fA-F]{40}"));
pub static RE_SHA256: Lazy<Regex> = Lazy::new(|| anchored(r"[0-9a-fA-F]{64}"));
pub static RE_SHA512: Lazy<Regex> = Lazy::new(|| anchored(r"[0-9a-fA-F]{128}"));
pub static RE_HASH_FIND: Lazy<Regex> = Lazy::new(|| {
    bounded(r"[0-9a-fA-F]{128}|[0-9a-fA-F]{64}|[0-9a-fA-F]{40}|[0-9a-fA-F]{32}")
});

// Vulnerability and network identifiers
pub static RE_CVE: Lazy<Regex> = Lazy::new(|| anchored(r"(?i:CVE-\d{4}-\d{4,})"));
pub static RE_CVE_FIND: Lazy<Regex> = Lazy::new(|| bounded(r"(?i:CVE-\d{4}-\d{4,})"));
pub static RE_ASN: Lazy<Regex> = Lazy::new(|| anchored(r"(?i:AS)(\d{1,10})"));
pub static RE_ASN_FIND: Lazy<Regex> = Lazy::new(|| bounded(r"(?i:AS)\d{1,10}"));
pub static RE_MAC: Lazy<Regex> = Lazy::new(|| anchored(&format!("(?i:{MAC})")));
pub static RE_MAC_FIND: Lazy<Regex> = Lazy::new(|| bounded(&format!("(?i:{MAC})")));

// Cryptocurrency addresses
pub static RE_BTC_LEGACY: Lazy<Regex> = Lazy::new(|| anchored(BTC_LEGACY));
pub static RE_BTC_BECH32: Lazy<Regex> = Lazy::new(|| anchored(BTC_BECH32));
pub static RE_BTC_FIND: Lazy<Regex> =
    Lazy::new(|| bounded(&format!("{BTC_BECH32}|{BTC_LEGACY}")));
pub static RE_ETH: Lazy<Regex> = Lazy::new(|| anchored(r"0x[0-9a-fA-F]{40}"));
pub static RE_ETH_FIND: Lazy<Regex> = Lazy::new(|| bounded(r"0x[0-9a-fA-F]{40}"));
pub static RE_XMR: Lazy<Regex> = Lazy::new(|| anchored(&format!("4[0-9AB]{BASE58}{{93}}")));
pub static RE_XMR_FIND: Lazy<Regex> =
    Lazy::new(|| bounded(&format!("4[0-9AB]{BASE58}{{93}}")));

// Google Analytics / AdSense identifiers
pub static RE_GA_TRACK_ID: Lazy<Regex> = Lazy::new(|| anchored(GA_TRACK_ID));
pub static RE_GA_TRACK_ID_FIND: Lazy<Regex> = Lazy::new(|| bounded(GA_TRACK_ID));
pub static RE_GA_PUB_ID: Lazy<Regex> = Lazy::new(|| anchored(r"pub-\d{10,20}"));
pub static RE_GA_PUB_ID_FIND: Lazy<Regex> = Lazy::new(|| bounded(r"pub-\d{10,20}"));
