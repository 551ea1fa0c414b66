use lookout_cli::commands::{Cli, Invocation};
use lookout_cli::error::ErrorReport;
use lookout_cli::execute;
use lookout_selector::{Command, Target};
use lookout_core::{Indicator, IndicatorType};
use std::io::Write;
use std::path::PathBuf;

fn config_file(contents: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    let mut file = std::fs::File::create(&path).expect("create config");
    file.write_all(contents.as_bytes()).expect("write config");
    (dir, path)
}

async fn run_json(config: PathBuf, invocation: Invocation) -> serde_json::Value {
    let cli = Cli {
        config: Some(config),
        invocation,
    };
    let mut out = Vec::new();
    execute(&cli, &mut out).await.expect("command succeeds");
    serde_json::from_slice(&out).expect("json output")
}

#[tokio::test]
async fn menu_honours_disabled_searchers() {
    let (_dir, path) = config_file("[searchers]\nShodan = false\n");

    let menu = run_json(path, Invocation::Menu("8.8.8[.]8".to_string())).await;
    assert_eq!(menu["selection"], "8.8.8.8");
    assert_eq!(menu["indicators"][0]["type"], "ip");

    let titles: Vec<&str> = menu["items"]
        .as_array()
        .expect("items")
        .iter()
        .filter_map(|i| i["title"].as_str())
        .collect();
    assert!(titles.contains(&"Search this IP on VirusTotal"));
    assert!(titles.contains(&"Search this IP on all"));
    assert!(!titles.contains(&"Search this IP on Shodan"));
}

#[tokio::test]
async fn open_search_prints_urls() {
    let (_dir, path) = config_file("");
    let id = Command::search(
        Target::named("Shodan"),
        &Indicator::new(IndicatorType::Ip, "8.8.8.8"),
    )
    .to_menu_id()
    .expect("encode");

    let outcome = run_json(path, Invocation::Open(id)).await;
    assert_eq!(outcome["outcome"], "open");
    assert_eq!(outcome["urls"][0], "https://www.shodan.io/host/8.8.8.8");
}

#[tokio::test]
async fn open_garbage_prints_notice() {
    let (_dir, path) = config_file("");

    let outcome = run_json(path, Invocation::Open("search:Shodan".to_string())).await;
    assert_eq!(outcome["outcome"], "notice");
    assert_eq!(outcome["title"], "Invalid command");
}

#[tokio::test]
async fn defang_prints_text() {
    let cli = Cli::parse(["defang", "see", "http://evil.example/"]).expect("parse");
    let mut out = Vec::new();
    execute(&cli, &mut out).await.expect("defang");
    assert_eq!(
        String::from_utf8(out).expect("utf8"),
        "see hxxp://evil[.]example/\n"
    );
}

#[tokio::test]
async fn missing_config_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cli = Cli {
        config: Some(dir.path().join("absent.toml")),
        invocation: Invocation::Menu("8.8.8.8".to_string()),
    };
    let mut out = Vec::new();
    let err = execute(&cli, &mut out).await.expect_err("config missing");

    let report = ErrorReport::from(&err);
    assert_eq!(report.code, "CONFIG_ERROR");
    assert!(report.message.contains("absent.toml"));
}
