//! Refanging, defanging and IDN normalization of selected text.
//!
//! Threat reports write indicators in "defanged" form (`hxxp://evil[.]com`)
//! so they cannot be clicked. Classification runs on the refanged form.

use lookout_core::GeneralConfig;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::ops::Range;
use tracing::trace;

/// Ordered refang substitutions, applied first to last.
static REFANG_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"\[://\]", "://"),
        (r"\[:\]|\(:\)", ":"),
        (r"(?i)\s*[\[\(\{]\s*(?:\.|dot)\s*[\]\)\}]\s*", "."),
        (r"(?i)\s*[\[\(\{]\s*(?:@|at)\s*[\]\)\}]\s*", "@"),
        (r"(?i)\bh(?:xx|\*\*|\[xx\]|\[tt\])p(s?)\b", "http${1}"),
        (r"(?i)\bfxp://", "ftp://"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| {
        (
            Regex::new(pattern).expect("valid refang regex"),
            replacement,
        )
    })
    .collect()
});

static DEFANG_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"(?i)\bhttp(s?)://", "hxxp${1}://"),
        (r"(?i)\bftp://", "fxp://"),
        (r"\.", "[.]"),
        (r"@", "[@]"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| {
        (
            Regex::new(pattern).expect("valid defang regex"),
            replacement,
        )
    })
    .collect()
});

static TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+").expect("valid token regex"));

/// Switches for [`normalize_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Convert Unicode domain labels to punycode
    pub enable_idn: bool,
    /// Undo defanging before classification
    pub enable_refang: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            enable_idn: true,
            enable_refang: true,
        }
    }
}

impl From<&GeneralConfig> for NormalizeOptions {
    fn from(general: &GeneralConfig) -> Self {
        Self {
            enable_idn: general.enable_idn,
            enable_refang: general.enable_refang,
        }
    }
}

/// Trim, refang, and optionally convert IDN hosts to punycode.
#[must_use]
pub fn normalize(text: &str, enable_idn: bool) -> String {
    normalize_with(
        text,
        &NormalizeOptions {
            enable_idn,
            enable_refang: true,
        },
    )
}

/// [`normalize`] with every step switchable.
#[must_use]
pub fn normalize_with(text: &str, options: &NormalizeOptions) -> String {
    let trimmed = text.trim();
    let refanged = if options.enable_refang {
        refang(trimmed)
    } else {
        Cow::Borrowed(trimmed)
    };
    if options.enable_idn {
        idn_to_ascii(&refanged).into_owned()
    } else {
        refanged.into_owned()
    }
}

/// Undo common defanging notations. Borrows when nothing changes.
#[must_use]
pub fn refang(text: &str) -> Cow<'_, str> {
    if !REFANG_RULES.iter().any(|(re, _)| re.is_match(text)) {
        return Cow::Borrowed(text);
    }
    let mut out = text.to_string();
    for (re, replacement) in REFANG_RULES.iter() {
        out = re.replace_all(&out, *replacement).into_owned();
    }
    Cow::Owned(out)
}

/// Defang for safe display: `http` becomes `hxxp`, dots and `@` are bracketed.
#[must_use]
pub fn defang(text: &str) -> String {
    DEFANG_RULES
        .iter()
        .fold(text.to_string(), |acc, (re, replacement)| {
            re.replace_all(&acc, *replacement).into_owned()
        })
}

/// Convert Unicode hosts inside `text` to their ASCII (punycode) form.
///
/// URL tokens convert only their host, emails only the part after `@`,
/// other dotted tokens as a whole. ASCII text is returned borrowed.
#[must_use]
pub fn idn_to_ascii(text: &str) -> Cow<'_, str> {
    if text.is_ascii() {
        return Cow::Borrowed(text);
    }
    TOKEN.replace_all(text, |caps: &Captures<'_>| convert_token(&caps[0]))
}

fn convert_token(token: &str) -> String {
    let span = if token.contains("://") {
        url_host_span(token)
    } else if let Some(at) = token.rfind('@') {
        Some(at + 1..token.len())
    } else if token.contains('.') {
        Some(0..token.len())
    } else {
        None
    };

    let Some(span) = span else {
        return token.to_string();
    };
    let host = &token[span.clone()];
    match domain_to_ascii(host) {
        Some(ascii) => {
            trace!(host = %host, ascii = %ascii, "converted IDN host");
            format!("{}{}{}", &token[..span.start], ascii, &token[span.end..])
        }
        None => token.to_string(),
    }
}

fn url_host_span(token: &str) -> Option<Range<usize>> {
    let start = token.find("://")? + 3;
    let rest = &token[start..];
    let authority_len = rest
        .find(|c| matches!(c, '/' | '?' | '#'))
        .unwrap_or(rest.len());
    let authority = &rest[..authority_len];
    let host_start = authority.rfind('@').map_or(0, |i| i + 1);
    let host = &authority[host_start..];
    if host.starts_with('[') {
        return None;
    }
    let host_len = host.rfind(':').unwrap_or(host.len());
    Some(start + host_start..start + host_start + host_len)
}

fn domain_to_ascii(host: &str) -> Option<String> {
    if host.is_ascii() {
        return None;
    }
    match url::Host::parse(host) {
        Ok(url::Host::Domain(ascii)) => Some(ascii),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refang_schemes() {
        assert_eq!(refang("hxxp://evil.com"), "http://evil.com");
        assert_eq!(refang("hXXps://evil.com"), "https://evil.com");
        assert_eq!(refang("h**p://evil.com"), "http://evil.com");
        assert_eq!(refang("h[tt]ps://evil.com"), "https://evil.com");
        assert_eq!(refang("fxp://files.evil.com"), "ftp://files.evil.com");
        assert_eq!(refang("http[://]evil.com"), "http://evil.com");
        assert_eq!(refang("http[:]//evil.com"), "http://evil.com");
    }

    #[test]
    fn test_refang_brackets_absorb_spaces() {
        assert_eq!(refang("evil[.]com"), "evil.com");
        assert_eq!(refang("evil (dot) com"), "evil.com");
        assert_eq!(refang("evil{.}com"), "evil.com");
        assert_eq!(refang("1[.]2[.]3[.]4"), "1.2.3.4");
        assert_eq!(refang("bob [at] evil [DOT] com"), "bob@evil.com");
        assert_eq!(refang("bob[@]evil.com"), "bob@evil.com");
    }

    #[test]
    fn test_refang_borrows_when_clean() {
        assert!(matches!(refang("example.com"), Cow::Borrowed(_)));
        assert!(matches!(refang("hxxp://x[.]y"), Cow::Owned(_)));
    }

    #[test]
    fn test_refang_leaves_words_alone() {
        assert_eq!(refang("that hxxpx thing"), "that hxxpx thing");
        assert_eq!(refang("meet at noon"), "meet at noon");
    }

    #[test]
    fn test_defang() {
        assert_eq!(
            defang("https://evil.com/a.php"),
            "hxxps://evil[.]com/a[.]php"
        );
        assert_eq!(defang("bob@evil.com"), "bob[@]evil[.]com");
        assert_eq!(defang("ftp://1.2.3.4"), "fxp://1[.]2[.]3[.]4");
    }

    #[test]
    fn test_normalize_trims_and_refangs() {
        assert_eq!(
            normalize("  hxxps://evil[.]example/login \n", false),
            "https://evil.example/login"
        );
        assert_eq!(normalize("   ", true), "");
    }

    #[test]
    fn test_normalize_with_refang_disabled() {
        let options = NormalizeOptions {
            enable_idn: false,
            enable_refang: false,
        };
        assert_eq!(normalize_with(" evil[.]com ", &options), "evil[.]com");
    }

    #[test]
    fn test_idn_bare_domain() {
        assert_eq!(normalize("bücher.example", true), "xn--bcher-kva.example");
        assert_eq!(normalize("bücher.example", false), "bücher.example");
    }

    #[test]
    fn test_idn_url_host_only() {
        assert_eq!(
            normalize("https://bücher.example:8443/straße", true),
            "https://xn--bcher-kva.example:8443/straße"
        );
    }

    #[test]
    fn test_idn_email_domain() {
        assert_eq!(
            normalize("jörg@bücher.example", true),
            "jörg@xn--bcher-kva.example"
        );
    }

    #[test]
    fn test_idn_plain_words_untouched() {
        assert_eq!(idn_to_ascii("grüße aus köln"), "grüße aus köln");
    }

    #[test]
    fn test_round_trip_examples() {
        for x in [
            "example.com",
            "https://sub.example.org/path?q=1",
            "8.8.8.8",
            "alice@example.net",
            "ftp://files.example.com/pub",
        ] {
            assert_eq!(normalize(&refang(&defang(x)), true), normalize(x, true), "{x}");
        }
    }

    #[test]
    fn test_options_from_general_config() {
        let general = GeneralConfig {
            enable_idn: false,
            enable_refang: true,
        };
        let options = NormalizeOptions::from(&general);
        assert!(!options.enable_idn);
        assert!(options.enable_refang);
        assert!(NormalizeOptions::default().enable_idn);
    }
}
