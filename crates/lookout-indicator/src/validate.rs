//! Whole-string validators, one per indicator type.
//!
//! Each `is_x` answers whether the entire candidate is an instance of the
//! type. Surrounding or internal whitespace is always rejected.

use crate::checksum;
use crate::patterns::{
    RE_ASN, RE_BTC_BECH32, RE_BTC_LEGACY, RE_CVE, RE_DOMAIN, RE_EMAIL, RE_ETH, RE_GA_PUB_ID,
    RE_GA_TRACK_ID, RE_IPV4, RE_MAC, RE_MD5, RE_SHA1, RE_SHA256, RE_SHA512, RE_URL, RE_XMR,
};
use lookout_core::IndicatorType;
use std::net::{Ipv4Addr, Ipv6Addr};

const MAX_DOMAIN_LEN: usize = 253;

/// Dotted-quad IPv4 with every octet in 0..=255.
#[must_use]
pub fn is_ipv4(s: &str) -> bool {
    RE_IPV4.is_match(s) && s.parse::<Ipv4Addr>().is_ok()
}

/// Any textual IPv6 form the standard library accepts.
#[must_use]
pub fn is_ipv6(s: &str) -> bool {
    s.parse::<Ipv6Addr>().is_ok()
}

/// IPv4 or IPv6.
#[must_use]
pub fn is_ip(s: &str) -> bool {
    is_ipv4(s) || is_ipv6(s)
}

/// RFC 1123 host name with an alphabetic or punycode TLD.
///
/// A dotted quad never matches because its last label is numeric.
#[must_use]
pub fn is_domain(s: &str) -> bool {
    s.len() <= MAX_DOMAIN_LEN && RE_DOMAIN.is_match(s)
}

/// `http`, `https` or `ftp` URL whose host is a domain, an IPv4 address,
/// a bracketed IPv6 address or `localhost`.
#[must_use]
pub fn is_url(s: &str) -> bool {
    if !RE_URL.is_match(s) || url::Url::parse(s).is_err() {
        return false;
    }
    raw_host(s).is_some_and(is_url_host)
}

/// Host portion of a URL as written, before any IDNA or IP normalization.
pub(crate) fn raw_host(s: &str) -> Option<&str> {
    let (_, rest) = s.split_once("://")?;
    let authority = rest
        .split(|c| matches!(c, '/' | '?' | '#'))
        .next()
        .unwrap_or(rest);
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, h)| h);
    if host_port.starts_with('[') {
        let end = host_port.find(']')?;
        let port = &host_port[end + 1..];
        return is_port(port).then(|| &host_port[..=end]);
    }
    match host_port.rsplit_once(':') {
        Some((host, port)) => port.parse::<u16>().is_ok().then_some(host),
        None => Some(host_port),
    }
}

/// Empty, or `:` followed by a 16-bit port number.
fn is_port(s: &str) -> bool {
    s.is_empty()
        || s.strip_prefix(':')
            .is_some_and(|p| p.parse::<u16>().is_ok())
}

fn is_url_host(host: &str) -> bool {
    if let Some(inner) = host.strip_prefix('[').and_then(|h| h.strip_suffix(']')) {
        return is_ipv6(inner);
    }
    host.eq_ignore_ascii_case("localhost") || is_ipv4(host) || is_domain(host)
}

/// `local@domain` with a valid domain part.
#[must_use]
pub fn is_email(s: &str) -> bool {
    RE_EMAIL.is_match(s)
        && s
            .rsplit_once('@')
            .is_some_and(|(_, domain)| domain.len() <= MAX_DOMAIN_LEN)
}

/// 32 hex digits.
#[must_use]
pub fn is_md5(s: &str) -> bool {
    RE_MD5.is_match(s)
}

/// 40 hex digits.
#[must_use]
pub fn is_sha1(s: &str) -> bool {
    RE_SHA1.is_match(s)
}

/// 64 hex digits.
#[must_use]
pub fn is_sha256(s: &str) -> bool {
    RE_SHA256.is_match(s)
}

/// 128 hex digits.
#[must_use]
pub fn is_sha512(s: &str) -> bool {
    RE_SHA512.is_match(s)
}

/// Hex digest of any supported length (MD5, SHA1, SHA256, SHA512).
#[must_use]
pub fn is_hash(s: &str) -> bool {
    is_md5(s) || is_sha1(s) || is_sha256(s) || is_sha512(s)
}

/// `CVE-YYYY-NNNN`, four or more trailing digits, any case.
#[must_use]
pub fn is_cve(s: &str) -> bool {
    RE_CVE.is_match(s)
}

/// `AS<n>` where `n` fits in 32 bits.
#[must_use]
pub fn is_asn(s: &str) -> bool {
    RE_ASN
        .captures(s)
        .and_then(|caps| caps.get(1))
        .is_some_and(|n| n.as_str().parse::<u32>().is_ok())
}

/// Six hex octets joined consistently by `:` or `-`.
#[must_use]
pub fn is_mac(s: &str) -> bool {
    RE_MAC.is_match(s)
}

/// Legacy base58check (P2PKH/P2SH) or segwit bech32/bech32m address.
#[must_use]
pub fn is_btc(s: &str) -> bool {
    (RE_BTC_LEGACY.is_match(s) && checksum::is_base58check_address(s))
        || (RE_BTC_BECH32.is_match(s) && checksum::is_segwit_address(s))
}

/// `0x` followed by 40 hex digits. Mixed-case checksums are not verified.
#[must_use]
pub fn is_eth(s: &str) -> bool {
    RE_ETH.is_match(s)
}

/// Monero standard address: `4` prefix, 95 base58 characters.
#[must_use]
pub fn is_xmr(s: &str) -> bool {
    RE_XMR.is_match(s)
}

/// Universal Analytics `UA-` or GA4 `G-` ID.
#[must_use]
pub fn is_ga_track_id(s: &str) -> bool {
    RE_GA_TRACK_ID.is_match(s)
}

/// `AdSense` publisher ID.
#[must_use]
pub fn is_ga_pub_id(s: &str) -> bool {
    RE_GA_PUB_ID.is_match(s)
}

/// Validate `s` as an instance of `ty`. `Text` accepts any non-empty string.
#[must_use]
pub fn validate(ty: IndicatorType, s: &str) -> bool {
    match ty {
        IndicatorType::Text => !s.is_empty(),
        IndicatorType::Ip => is_ip(s),
        IndicatorType::Domain => is_domain(s),
        IndicatorType::Url => is_url(s),
        IndicatorType::Email => is_email(s),
        IndicatorType::Asn => is_asn(s),
        IndicatorType::Hash => is_hash(s),
        IndicatorType::Cve => is_cve(s),
        IndicatorType::Btc => is_btc(s),
        IndicatorType::Eth => is_eth(s),
        IndicatorType::Xmr => is_xmr(s),
        IndicatorType::Mac => is_mac(s),
        IndicatorType::GaTrackId => is_ga_track_id(s),
        IndicatorType::GaPubId => is_ga_pub_id(s),
    }
}

/// Every non-text type `s` validates as, in precedence order.
#[must_use]
pub fn matching_types(s: &str) -> Vec<IndicatorType> {
    IndicatorType::PRECEDENCE
        .into_iter()
        .filter(|&ty| validate(ty, s))
        .collect()
}
