//! Shared fixtures for integration tests that drive the qbank binary.

// Helpers are shared unevenly across the per-command test binaries.
#![allow(dead_code)]

use serde_json::Value;
use std::path::Path;
use std::process::{Command, Output};

/// Run the built binary with the given arguments.
pub fn qbank(args: &[&str]) -> Output {
    let bin = env!("CARGO_BIN_EXE_qbank");
    Command::new(bin).args(args).output().expect("run qbank")
}

pub fn write_json(path: &Path, value: &Value) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create fixture dir");
    }
    let text = serde_json::to_string_pretty(value).expect("serialize fixture");
    std::fs::write(path, text).expect("write fixture");
}

pub fn read_json(path: &Path) -> Value {
    let content = std::fs::read_to_string(path).expect("read output file");
    serde_json::from_str(&content).expect("parse output file")
}

pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn path_arg(path: &Path) -> &str {
    path.to_str().expect("utf-8 path")
}
