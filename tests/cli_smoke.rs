use std::path::PathBuf;
use std::process::Command;

fn exe() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_virtual-mirror")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "virtual-mirror.exe"
            } else {
                "virtual-mirror"
            });
            p
        })
}

fn run(args: &[&str]) -> std::process::Output {
    Command::new(exe()).args(args).output().unwrap()
}

#[test]
fn cli_resolve_prints_composite_path() {
    let out = run(&[
        "resolve",
        "--person",
        "/samples/person1.png",
        "--cloth",
        "/samples/cloth3.jpg",
    ]);
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["kind"], "composite");
    assert_eq!(v["path"], "/results/p1c3.png");
}

#[test]
fn cli_store_then_take_consumes_slot() {
    let dir = PathBuf::from("target").join("cli_smoke_relay");
    let _ = std::fs::remove_dir_all(&dir);
    let state = dir.to_string_lossy().to_string();

    let out = run(&[
        "store",
        "--state-dir",
        state.as_str(),
        "--person",
        "blob:abc123",
        "--cloth",
        "/samples/cloth2.jpg",
    ]);
    assert!(out.status.success());

    let out = run(&["take", "--state-dir", state.as_str()]);
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["kind"], "side_by_side");
    assert_eq!(v["person"], "blob:abc123");

    let out = run(&["take", "--state-dir", state.as_str()]);
    assert!(out.status.success());
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("/shop"));
}

#[test]
fn cli_link_encode_rejects_uploads() {
    let out = run(&[
        "link",
        "encode",
        "--person",
        "blob:abc123",
        "--cloth",
        "/samples/cloth2.jpg",
    ]);
    assert!(!out.status.success());

    let out = run(&[
        "link",
        "encode",
        "--base-url",
        "https://mirror.example",
        "--person",
        "/samples/person2.png",
        "--cloth",
        "/samples/cloth1.jpg",
    ]);
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8_lossy(&out.stdout).trim(),
        "https://mirror.example?p=2&c=1"
    );
}

#[test]
fn cli_reads_settings_from_config_file() {
    let dir = PathBuf::from("target").join("cli_smoke_config");
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();

    let cfg = serde_json::json!({
        "base_url": "https://cfg.example",
        "processing_delay_ms": 0,
        "state_dir": dir.join("state"),
    });
    let cfg_path = dir.join("config.json");
    std::fs::write(&cfg_path, cfg.to_string()).unwrap();
    let cfg_arg = cfg_path.to_string_lossy().to_string();

    let out = run(&[
        "link",
        "encode",
        "--config",
        cfg_arg.as_str(),
        "--person",
        "/samples/person2.png",
        "--cloth",
        "/samples/cloth1.jpg",
    ]);
    assert!(out.status.success());
    let link = String::from_utf8_lossy(&out.stdout);
    assert_eq!(link.trim(), "https://cfg.example?p=2&c=1");

    // try-on and take share the configured state dir
    let out = run(&[
        "try-on",
        "--config",
        cfg_arg.as_str(),
        "--product",
        "3",
        "--person",
        "/samples/person1.png",
    ]);
    assert!(out.status.success());
    assert!(dir.join("state").join("tryOnData.json").exists());

    let out = run(&["take", "--config", cfg_arg.as_str()]);
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["path"], "/results/p1c3.png");
}

#[test]
fn cli_rejects_invalid_config_file() {
    let dir = PathBuf::from("target").join("cli_smoke_bad_config");
    std::fs::create_dir_all(&dir).unwrap();
    let cfg_path = dir.join("config.json");
    let body = r#"{"base_url": "https://cfg.example?x=1"}"#;
    std::fs::write(&cfg_path, body).unwrap();
    let cfg_arg = cfg_path.to_string_lossy().to_string();

    let out = run(&["catalog", "--config", cfg_arg.as_str()]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("load config"));
}
