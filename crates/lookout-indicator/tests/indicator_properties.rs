use lookout_core::{HashKind, Indicator, IndicatorType};
use lookout_indicator::validate::{is_domain, is_hash, is_ipv4};
use lookout_indicator::{defang, extract, matching_types, normalize, refang};
use proptest::prelude::*;

// ── Defang/refang round trip ───────────────────────────────────────────────

proptest! {
    #[test]
    fn refang_undoes_defang_for_domains(
        labels in prop::collection::vec("[a-z0-9]{1,12}", 1..4),
        tld in "[a-z]{2,6}"
    ) {
        let domain = format!("{}.{tld}", labels.join("."));
        prop_assert_eq!(
            normalize(&refang(&defang(&domain)), true),
            normalize(&domain, true)
        );
    }

    #[test]
    fn refang_undoes_defang_for_urls(
        host in "[a-z]{1,10}\\.[a-z]{2,5}",
        path in "[a-z0-9/]{0,12}",
        https in any::<bool>()
    ) {
        let scheme = if https { "https" } else { "http" };
        let url = format!("{scheme}://{host}/{path}");
        prop_assert_eq!(
            normalize(&refang(&defang(&url)), true),
            normalize(&url, true)
        );
    }

    #[test]
    fn refang_undoes_defang_for_ips(octets in any::<[u8; 4]>()) {
        let ip = format!("{}.{}.{}.{}", octets[0], octets[1], octets[2], octets[3]);
        prop_assert_eq!(normalize(&refang(&defang(&ip)), false), ip);
    }
}

// ── Validator exclusivity ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn ipv4_is_never_a_domain(octets in any::<[u8; 4]>()) {
        let ip = format!("{}.{}.{}.{}", octets[0], octets[1], octets[2], octets[3]);
        prop_assert!(is_ipv4(&ip));
        prop_assert!(!is_domain(&ip));
        prop_assert_eq!(matching_types(&ip), vec![IndicatorType::Ip]);
    }

    #[test]
    fn md5_loses_hash_type_when_truncated(hex in "[0-9a-f]{32}") {
        let md5 = Indicator::new(IndicatorType::Hash, hex.clone());
        prop_assert!(is_hash(&hex));
        prop_assert_eq!(md5.hash_kind(), Some(HashKind::Md5));
        prop_assert!(!is_hash(&hex[1..]));
    }
}

#[test]
fn out_of_range_octet_is_not_ipv4() {
    assert!(!is_ipv4("256.1.1.1"));
    assert!(!is_domain("256.1.1.1"));
}

#[test]
fn extract_ipv4_from_sentence() {
    assert_eq!(
        extract::extract_ipv4("from 1.2.3.4 to 5.6.7.8"),
        ["1.2.3.4", "5.6.7.8"]
    );
}

#[test]
fn longer_dotted_numbers_are_not_ipv4() {
    assert!(!matching_types("1.2.3.4.5").contains(&IndicatorType::Ip));
    assert!(extract::extract_all("version 1.2.3.4.5 released").is_empty());
    assert!(extract::extract_ipv4("build 10.0.0.1.2 and 3.10.0.1.4").is_empty());
    assert_eq!(
        extract::extract_ipv4("reached 10.0.0.1. Then 2.2.2.2."),
        ["10.0.0.1", "2.2.2.2"]
    );
}

#[test]
fn defanged_report_extracts_refanged_indicators() {
    let report = normalize(
        "C2 at hxxp://185[.]220[.]101[.]4/gate.php, contact admin[@]evil-corp[.]ru",
        false,
    );
    let found = extract::extract_all(&report);
    assert!(found.contains(&Indicator::new(IndicatorType::Ip, "185.220.101.4")));
    assert!(found.contains(&Indicator::new(
        IndicatorType::Url,
        "http://185.220.101.4/gate.php"
    )));
    assert!(found.contains(&Indicator::new(IndicatorType::Email, "admin@evil-corp.ru")));
    assert!(found.contains(&Indicator::new(IndicatorType::Domain, "evil-corp.ru")));
}
