use lookout_analyzer::{AnalyzerError, AnalyzerLoader, RegistryBuilder};
use lookout_core::IndicatorType;
use tempfile::TempDir;

#[test]
fn builtin_registry_serves_every_type() {
    let registry = RegistryBuilder::new()
        .with_builtin_searchers()
        .expect("built-in catalogue")
        .build();

    for ty in IndicatorType::PRECEDENCE {
        assert!(
            !registry.searchers_for(ty).is_empty(),
            "no searcher for {ty}"
        );
    }
    // text only reaches the general web search
    let text: Vec<&str> = registry
        .searchers_for(IndicatorType::Text)
        .into_iter()
        .map(|a| a.name())
        .collect();
    assert_eq!(text, ["Google"]);
}

#[test]
fn builtin_templates_expand() {
    let registry = RegistryBuilder::new()
        .with_builtin_searchers()
        .expect("built-in catalogue")
        .build();

    let pulsedive = registry.get("Pulsedive").expect("Pulsedive");
    assert_eq!(
        pulsedive.search(IndicatorType::Domain, "evil.com").as_deref(),
        Some("https://pulsedive.com/indicator/?ioc=ZXZpbC5jb20=")
    );

    let bazaar = registry.get("MalwareBazaar").expect("MalwareBazaar");
    let sha256 = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
    assert_eq!(
        bazaar.search(IndicatorType::Hash, sha256).as_deref(),
        Some(format!("https://bazaar.abuse.ch/sample/{sha256}/").as_str())
    );
    assert_eq!(
        bazaar.search(IndicatorType::Hash, "d41d8cd98f00b204e9800998ecf8427e"),
        None
    );

    let google = registry.get("Google").expect("Google");
    assert_eq!(
        google.search(IndicatorType::Text, "lazarus group").as_deref(),
        Some("https://www.google.com/search?q=%22lazarus%20group%22")
    );
}

#[test]
fn user_definitions_extend_builtin_catalogue() {
    let temp_dir = TempDir::new().expect("create temp dir");
    std::fs::write(
        temp_dir.path().join("internal.toml"),
        r#"
[[searcher]]
name = "Internal SIEM"
endpoint = "https://siem.corp.example"

[[searcher.templates]]
types = ["ip", "domain"]
template = "https://siem.corp.example/search?q={query}"
"#,
    )
    .expect("write definition");

    let loader = AnalyzerLoader::new(temp_dir.path()).expect("create loader");
    let mut builder = RegistryBuilder::new()
        .with_builtin_searchers()
        .expect("built-in catalogue");
    builder
        .add_searchers(loader.load_all().expect("load user definitions"))
        .expect("register user definitions");
    let registry = builder.build();

    let last = registry.names().last().expect("non-empty registry");
    assert_eq!(last, "Internal SIEM");
    assert_eq!(
        registry
            .get("Internal SIEM")
            .and_then(|a| a.search(IndicatorType::Ip, "10.0.0.1"))
            .as_deref(),
        Some("https://siem.corp.example/search?q=10.0.0.1")
    );
}

#[test]
fn user_definition_cannot_shadow_builtin() {
    let temp_dir = TempDir::new().expect("create temp dir");
    std::fs::write(
        temp_dir.path().join("shodan.toml"),
        r#"
[[searcher]]
name = "Shodan"
endpoint = "https://shodan.example"

[[searcher.templates]]
types = ["ip"]
template = "https://shodan.example/{raw}"
"#,
    )
    .expect("write definition");

    let loader = AnalyzerLoader::new(temp_dir.path()).expect("create loader");
    let mut builder = RegistryBuilder::new()
        .with_builtin_searchers()
        .expect("built-in catalogue");
    let err = builder
        .add_searchers(loader.load_all().expect("load user definitions"))
        .expect_err("duplicate name");
    assert!(matches!(err, AnalyzerError::DuplicateAnalyzer { .. }));
}
