//! One-time setup for the front-end platform config.
//!
//! The config is a JavaScript object literal, not JSON, so this is pure
//! text substitution over three known string fields. It never touches the
//! JSON banks.

use anyhow::{bail, Context, Result};
use regex::{NoExpand, Regex};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "assets/js/config.js";

const DEFAULT_NAME: &str = "Chiaseed Quiz Platform";
const DEFAULT_GENAI: &str = "https://api.your-domain.com/genai";
const DEFAULT_DATA: &str = "https://api.your-domain.com/data";

/// Replacement values supplied on the command line; anything left `None` is
/// prompted for interactively with the stock default.
#[derive(Debug)]
pub struct SetupValues {
    pub name: Option<String>,
    pub genai: Option<String>,
    pub data: Option<String>,
}

pub fn run_setup(config_path: &Path, values: SetupValues) -> Result<()> {
    if !config_path.exists() {
        bail!(
            "{} not found; run this from the platform root",
            config_path.display()
        );
    }
    let mut content = fs::read_to_string(config_path)
        .with_context(|| format!("read {}", config_path.display()))?;

    let name = resolve(values.name, "Platform Name", DEFAULT_NAME)?;
    let genai = resolve(values.genai, "GenAI API Endpoint", DEFAULT_GENAI)?;
    let data = resolve(values.data, "Data/Tracking API Endpoint", DEFAULT_DATA)?;

    content = substitute(&content, "name", &name)?;
    content = substitute(&content, "genai", &genai)?;
    content = substitute(&content, "data", &data)?;

    fs::write(config_path, content)
        .with_context(|| format!("write {}", config_path.display()))?;
    println!("Setup complete: modified {}", config_path.display());
    Ok(())
}

fn resolve(flag: Option<String>, label: &str, default: &str) -> Result<String> {
    match flag {
        Some(value) => Ok(value),
        None => prompt(label, default),
    }
}

fn prompt(label: &str, default: &str) -> Result<String> {
    print!("Enter your {label} [{default}]: ");
    io::stdout().flush().context("flush prompt")?;
    let mut line = String::new();
    io::stdin().read_line(&mut line).context("read answer")?;
    let answer = line.trim();
    Ok(if answer.is_empty() {
        default.to_string()
    } else {
        answer.to_string()
    })
}

/// Rewrite the string value of `key: "..."` wherever it appears.
fn substitute(content: &str, key: &str, value: &str) -> Result<String> {
    let pattern =
        Regex::new(&format!(r#"{key}:\s*".*?""#)).context("build substitution pattern")?;
    let replacement = format!(r#"{key}: "{value}""#);
    Ok(pattern
        .replace_all(content, NoExpand(&replacement))
        .into_owned())
}
