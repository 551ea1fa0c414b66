//! Extract indicators from longer text.
//!
//! Each extractor scans with the unanchored form of its type's grammar and
//! keeps only the candidates the matching validator accepts. Results are in
//! left-to-right order; extractors of different types do not deduplicate
//! against each other, so a domain inside a URL is reported as both.

use crate::patterns::{
    RE_ASN_FIND, RE_BTC_FIND, RE_CVE_FIND, RE_DOMAIN_FIND, RE_EMAIL_FIND, RE_ETH_FIND,
    RE_GA_PUB_ID_FIND, RE_GA_TRACK_ID_FIND, RE_HASH_FIND, RE_IPV4_FIND, RE_IPV6_FIND,
    RE_MAC_FIND, RE_URL_FIND, RE_XMR_FIND,
};
use crate::validate;
use lookout_core::{Indicator, IndicatorType};
use regex::Regex;
use std::collections::HashSet;

/// Characters stripped from the end of a URL candidate (sentence punctuation
/// and closing brackets).
const URL_TRAILING: &[char] = &['.', ',', ';', ':', '!', '?', '\'', '"', ')', ']', '}', '>'];

/// Run `re` over `text`, keeping `(start, candidate)` pairs that pass `accept`.
fn find_validated(re: &Regex, text: &str, accept: impl Fn(&str) -> bool) -> Vec<(usize, String)> {
    re.find_iter(text)
        .filter(|m| accept(m.as_str()))
        .map(|m| (m.start(), m.as_str().to_string()))
        .collect()
}

/// True when the match at `start..end` is not glued to neighbouring
/// characters from `joiners` or to word characters.
fn is_standalone(text: &str, start: usize, end: usize, joiners: &[char]) -> bool {
    let joined = |c: char| c.is_alphanumeric() || c == '_' || joiners.contains(&c);
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(joined) && !after.is_some_and(joined)
}

/// True when `start..end` continues a longer dotted number, as in `1.2.3.4.5`.
fn in_dotted_run(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start]
        .strip_suffix('.')
        .is_some_and(|rest| rest.ends_with(|c: char| c.is_ascii_digit()));
    let after = text[end..]
        .strip_prefix('.')
        .is_some_and(|rest| rest.starts_with(|c: char| c.is_ascii_digit()));
    before || after
}

fn ipv4_matches(text: &str) -> Vec<(usize, String)> {
    RE_IPV4_FIND
        .find_iter(text)
        .filter(|m| !in_dotted_run(text, m.start(), m.end()) && validate::is_ipv4(m.as_str()))
        .map(|m| (m.start(), m.as_str().to_string()))
        .collect()
}

fn ipv6_matches(text: &str) -> Vec<(usize, String)> {
    RE_IPV6_FIND
        .find_iter(text)
        .filter(|m| {
            let s = m.as_str();
            s.bytes().any(|b| b.is_ascii_hexdigit())
                && !text[..m.start()].ends_with('.')
                && is_standalone(text, m.start(), m.end(), &[':'])
                && validate::is_ipv6(s)
        })
        .map(|m| (m.start(), m.as_str().to_string()))
        .collect()
}

fn values(matches: Vec<(usize, String)>) -> Vec<String> {
    matches.into_iter().map(|(_, s)| s).collect()
}

/// All valid IPv4 addresses in `text`.
#[must_use]
pub fn extract_ipv4(text: &str) -> Vec<String> {
    values(ipv4_matches(text))
}

/// All valid IPv6 addresses in `text`.
#[must_use]
pub fn extract_ipv6(text: &str) -> Vec<String> {
    values(ipv6_matches(text))
}

/// IPv4 and IPv6 addresses, merged in text order.
#[must_use]
pub fn extract_ip(text: &str) -> Vec<String> {
    let mut found = ipv4_matches(text);
    found.extend(ipv6_matches(text));
    found.sort_by_key(|(start, _)| *start);
    values(found)
}

/// Domain names, excluding dotted quads.
#[must_use]
pub fn extract_domain(text: &str) -> Vec<String> {
    values(find_validated(&RE_DOMAIN_FIND, text, validate::is_domain))
}

/// URLs, with trailing sentence punctuation removed.
#[must_use]
pub fn extract_url(text: &str) -> Vec<String> {
    RE_URL_FIND
        .find_iter(text)
        .map(|m| m.as_str().trim_end_matches(URL_TRAILING))
        .filter(|s| validate::is_url(s))
        .map(str::to_string)
        .collect()
}

/// Email addresses.
#[must_use]
pub fn extract_email(text: &str) -> Vec<String> {
    values(find_validated(&RE_EMAIL_FIND, text, validate::is_email))
}

/// MD5, SHA1, SHA256 and SHA512 digests. Runs of other lengths are ignored.
#[must_use]
pub fn extract_hash(text: &str) -> Vec<String> {
    values(find_validated(&RE_HASH_FIND, text, validate::is_hash))
}

/// CVE identifiers.
#[must_use]
pub fn extract_cve(text: &str) -> Vec<String> {
    values(find_validated(&RE_CVE_FIND, text, validate::is_cve))
}

/// Autonomous system numbers (`AS15169`).
#[must_use]
pub fn extract_asn(text: &str) -> Vec<String> {
    values(find_validated(&RE_ASN_FIND, text, validate::is_asn))
}

/// MAC addresses that are not part of a longer colon or hyphen run.
#[must_use]
pub fn extract_mac(text: &str) -> Vec<String> {
    RE_MAC_FIND
        .find_iter(text)
        .filter(|m| {
            is_standalone(text, m.start(), m.end(), &[':', '-']) && validate::is_mac(m.as_str())
        })
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Bitcoin addresses with a valid checksum.
#[must_use]
pub fn extract_btc(text: &str) -> Vec<String> {
    values(find_validated(&RE_BTC_FIND, text, validate::is_btc))
}

/// Ethereum addresses.
#[must_use]
pub fn extract_eth(text: &str) -> Vec<String> {
    values(find_validated(&RE_ETH_FIND, text, validate::is_eth))
}

/// Monero standard addresses.
#[must_use]
pub fn extract_xmr(text: &str) -> Vec<String> {
    values(find_validated(&RE_XMR_FIND, text, validate::is_xmr))
}

/// Google Analytics tracking and measurement IDs.
#[must_use]
pub fn extract_ga_track_id(text: &str) -> Vec<String> {
    values(find_validated(&RE_GA_TRACK_ID_FIND, text, validate::is_ga_track_id))
}

/// AdSense publisher IDs.
#[must_use]
pub fn extract_ga_pub_id(text: &str) -> Vec<String> {
    values(find_validated(&RE_GA_PUB_ID_FIND, text, validate::is_ga_pub_id))
}

/// Extract every instance of `ty` from `text`. `Text` never extracts.
#[must_use]
pub fn extract(ty: IndicatorType, text: &str) -> Vec<String> {
    match ty {
        IndicatorType::Text => Vec::new(),
        IndicatorType::Ip => extract_ip(text),
        IndicatorType::Domain => extract_domain(text),
        IndicatorType::Url => extract_url(text),
        IndicatorType::Email => extract_email(text),
        IndicatorType::Asn => extract_asn(text),
        IndicatorType::Hash => extract_hash(text),
        IndicatorType::Cve => extract_cve(text),
        IndicatorType::Btc => extract_btc(text),
        IndicatorType::Eth => extract_eth(text),
        IndicatorType::Xmr => extract_xmr(text),
        IndicatorType::Mac => extract_mac(text),
        IndicatorType::GaTrackId => extract_ga_track_id(text),
        IndicatorType::GaPubId => extract_ga_pub_id(text),
    }
}

/// Run every extractor in precedence order.
///
/// Repeated `(type, value)` pairs keep their first occurrence only.
#[must_use]
pub fn extract_all(text: &str) -> Vec<Indicator> {
    let mut seen: HashSet<(IndicatorType, String)> = HashSet::new();
    let mut indicators = Vec::new();
    for ty in IndicatorType::PRECEDENCE {
        for value in extract(ty, text) {
            if seen.insert((ty, value.clone())) {
                indicators.push(Indicator::new(ty, value));
            }
        }
    }
    indicators
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_ipv4_in_order() {
        assert_eq!(
            extract_ipv4("from 1.2.3.4 to 5.6.7.8"),
            ["1.2.3.4", "5.6.7.8"]
        );
        assert!(extract_ipv4("version 999.1.1.1").is_empty());
    }

    #[test]
    fn test_extract_ip_merges_families() {
        let text = "v6 2001:db8::1 then v4 10.0.0.1";
        assert_eq!(extract_ip(text), ["2001:db8::1", "10.0.0.1"]);
    }

    #[test]
    fn test_extract_ipv6_ignores_times_and_paths() {
        assert!(extract_ipv6("meeting at 10:30:00").is_empty());
        assert!(extract_ipv6("use std::net here").is_empty());
        assert!(extract_ipv6("a :: b").is_empty());
    }

    #[test]
    fn test_extract_url_trims_punctuation() {
        let text = "Visit https://example.com/login. Or (http://1.2.3.4/x), fine.";
        assert_eq!(
            extract_url(text),
            ["https://example.com/login", "http://1.2.3.4/x"]
        );
    }

    #[test]
    fn test_extract_domain_inside_url_and_email() {
        let text = "mail bob@corp.example about https://evil.example/path";
        assert_eq!(extract_domain(text), ["corp.example", "evil.example"]);
        assert_eq!(extract_email(text), ["bob@corp.example"]);
    }

    #[test]
    fn test_extract_hash_ignores_odd_lengths() {
        let md5 = "d41d8cd98f00b204e9800998ecf8427e";
        let text = format!("{md5} and {}", "a".repeat(33));
        assert_eq!(extract_hash(&text), [md5]);
    }

    #[test]
    fn test_extract_mac_rejects_longer_runs() {
        assert_eq!(
            extract_mac("nic 00:1a:2b:3c:4d:5e up"),
            ["00:1a:2b:3c:4d:5e"]
        );
        assert!(extract_mac("00:1a:2b:3c:4d:5e:6f").is_empty());
    }

    #[test]
    fn test_extract_misc_types() {
        let text = "CVE-2021-44228 via AS13335, wallet 1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa, \
                    tag UA-12345678-1 and pub-1234567890123456";
        assert_eq!(extract_cve(text), ["CVE-2021-44228"]);
        assert_eq!(extract_asn(text), ["AS13335"]);
        assert_eq!(extract_btc(text), ["1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa"]);
        assert_eq!(extract_ga_track_id(text), ["UA-12345678-1"]);
        assert_eq!(extract_ga_pub_id(text), ["pub-1234567890123456"]);
    }

    #[test]
    fn test_extract_text_is_empty() {
        assert!(extract(IndicatorType::Text, "anything").is_empty());
    }

    #[test]
    fn test_extract_all_precedence_and_dedup() {
        let text = "8.8.8.8 example.com 8.8.8.8 https://example.com/";
        let found = extract_all(text);
        assert_eq!(
            found,
            [
                Indicator::new(IndicatorType::Ip, "8.8.8.8"),
                Indicator::new(IndicatorType::Domain, "example.com"),
                Indicator::new(IndicatorType::Url, "https://example.com/"),
            ]
        );
    }
}
