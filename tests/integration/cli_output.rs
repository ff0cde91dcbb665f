use std::fs;

use shallow_update::config::ShallowConfig;
use shallow_update::error::{ApiError, DecodeError};
use shallow_update::tooling::cli::{CliContext, Commands};
use tempfile::TempDir;

use crate::integration::support::{commit, pkt_line, FLUSH};

fn write_capture(dir: &TempDir, lines: &[String], flush: bool) -> std::path::PathBuf {
    let mut stream = Vec::new();
    for line in lines {
        stream.extend(pkt_line(line));
    }
    if flush {
        stream.extend_from_slice(FLUSH);
    }
    let path = dir.path().join("capture.pkt");
    fs::write(&path, stream).unwrap();
    path
}

#[test]
fn decode_json_contract_has_both_lists() {
    let temp_dir = TempDir::new().unwrap();
    let (a, b) = (commit(1), commit(2));
    let input = write_capture(
        &temp_dir,
        &[format!("shallow {}", a), format!("unshallow {}", b)],
        true,
    );

    let cli = CliContext::with_config(ShallowConfig::default()).with_color(false);
    let output = cli
        .execute(&Commands::Decode {
            input: Some(input),
            format: "json".to_string(),
            require_flush: false,
        })
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    let shallow = parsed.get("shallow").and_then(|v| v.as_array()).unwrap();
    let unshallow = parsed.get("unshallow").and_then(|v| v.as_array()).unwrap();
    assert_eq!(shallow.len(), 1);
    assert_eq!(shallow[0].as_str(), Some(a.encode_hex().as_str()));
    assert_eq!(unshallow[0].as_str(), Some(b.encode_hex().as_str()));
}

#[test]
fn decode_text_lists_commits() {
    let temp_dir = TempDir::new().unwrap();
    let a = commit(3);
    let input = write_capture(&temp_dir, &[format!("shallow {}", a)], true);

    let cli = CliContext::with_config(ShallowConfig::default()).with_color(false);
    let output = cli
        .execute(&Commands::Decode {
            input: Some(input),
            format: "text".to_string(),
            require_flush: false,
        })
        .unwrap();

    assert!(output.contains("Shallow Update"));
    assert!(output.contains(&a.encode_hex()));
    assert!(output.contains("Total: 1 shallow, 0 unshallow."));
}

#[test]
fn decode_malformed_capture_reports_line() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_capture(&temp_dir, &["shallow 1234".to_string()], true);

    let cli = CliContext::with_config(ShallowConfig::default()).with_color(false);
    let err = cli
        .execute(&Commands::Decode {
            input: Some(input),
            format: "json".to_string(),
            require_flush: false,
        })
        .unwrap_err();

    assert!(matches!(
        err,
        ApiError::Decode(DecodeError::MalformedLine { .. })
    ));
    assert!(err.to_string().contains("shallow 1234"));
}

#[test]
fn require_flush_flag_rejects_truncated_capture() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_capture(&temp_dir, &[format!("shallow {}", commit(1))], false);

    let cli = CliContext::with_config(ShallowConfig::default()).with_color(false);
    let lenient = cli.execute(&Commands::Decode {
        input: Some(input.clone()),
        format: "json".to_string(),
        require_flush: false,
    });
    assert!(lenient.is_ok());

    let strict = cli.execute(&Commands::Decode {
        input: Some(input),
        format: "json".to_string(),
        require_flush: true,
    });
    assert!(matches!(
        strict,
        Err(ApiError::Decode(DecodeError::MissingFlush { .. }))
    ));
}

#[test]
fn missing_input_file_is_error() {
    let temp_dir = TempDir::new().unwrap();
    let cli = CliContext::with_config(ShallowConfig::default());
    let result = cli.execute(&Commands::Decode {
        input: Some(temp_dir.path().join("nope.pkt")),
        format: "text".to_string(),
        require_flush: false,
    });
    let err = result.unwrap_err();
    assert!(matches!(err, ApiError::ConfigError(_)));
    assert!(err.to_string().contains("nope.pkt"), "{}", err);
}

#[test]
fn config_command_prints_effective_config() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, "[decode]\nrequire_flush = true\n").unwrap();

    let cli = CliContext::new(Some(path)).unwrap();
    let output = cli.execute(&Commands::Config).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["decode"]["require_flush"], serde_json::json!(true));
    assert!(parsed.get("logging").is_some());
}
