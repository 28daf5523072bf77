use httpmock::prelude::*;
use std::process::Command;
use tempfile::TempDir;

const INDEX: &str = include_str!("fixtures/index.html");
const BENESOV: &str = include_str!("fixtures/benesov.html");

fn volby_scrape() -> Command {
    Command::new(env!("CARGO_BIN_EXE_volby-scrape"))
}

#[test]
fn test_missing_arguments_print_usage() {
    let output = volby_scrape().output().unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "stderr: {}", stderr);
}

#[test]
fn test_missing_output_path_rejected() {
    let output = volby_scrape()
        .arg("https://www.volby.cz/pls/ps2017nss/ps32?xjazyk=CZ&xkraj=2&xnumnuts=2101")
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
}

#[test]
fn test_foreign_url_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("out.csv");

    let output = volby_scrape()
        .arg("https://example.com/ps32")
        .arg(&output_path)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("district_url"));
    assert!(!output_path.exists());
}

#[test]
fn test_non_csv_output_rejected() {
    let output = volby_scrape()
        .arg("https://www.volby.cz/pls/ps2017nss/ps32?xjazyk=CZ&xkraj=2&xnumnuts=2101")
        .arg("vysledky.txt")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains(".csv"));
}

#[test]
fn test_http_failure_exits_with_network_code() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("out.csv");

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/pls/ps2017nss/ps32");
        then.status(404);
    });

    let output = volby_scrape()
        .arg(server.url("/pls/ps2017nss/ps32?xjazyk=CZ&xkraj=2&xnumnuts=2101"))
        .arg(&output_path)
        .arg("--url-prefix")
        .arg(server.base_url())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(!output_path.exists());
}

#[test]
fn test_successful_run_writes_csv() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("out.csv");
    let settings_path = temp_dir.path().join("volby-scrape.toml");

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/pls/ps2017nss/ps32");
        then.status(200).body(INDEX);
    });
    server.mock(|when, then| {
        when.method(GET).path("/pls/ps2017nss/ps311");
        then.status(200).body(BENESOV);
    });

    std::fs::write(
        &settings_path,
        format!(
            "[source]\nurl_prefix = \"{}\"\ntimeout_seconds = 5\n\n[load]\ndelimiter = \";\"\n",
            server.base_url()
        ),
    )
    .unwrap();

    let output = volby_scrape()
        .arg(server.url("/pls/ps2017nss/ps32?xjazyk=CZ&xkraj=2&xnumnuts=2101"))
        .arg(&output_path)
        .arg("--config")
        .arg(&settings_path)
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let content = std::fs::read_to_string(&output_path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    // 表頭加三個市鎮
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("code;location;registered;envelopes;valid;"));
    assert!(lines[1].starts_with("529303;Benešov;13104;8485;8437;1052"));
}
