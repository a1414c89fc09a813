//! Doctor command - verify system requirements and configuration.

use crate::cli::preflight::check_tool;
use crate::cli::Output;
use crate::config::{Credentials, Settings};
use console::style;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }
}

/// Run the doctor command.
pub fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Lekse Doctor");

    let credentials = Credentials::resolve(settings);
    let mut results = Vec::new();

    // Configuration file
    let config_path = Settings::default_config_path();
    if config_path.exists() {
        results.push(CheckResult::ok(
            "config",
            &format!("found at {}", config_path.display()),
        ));
    } else {
        results.push(CheckResult::warning(
            "config",
            "no configuration file (using defaults)",
            "Run 'lekse init' to create one.",
        ));
    }

    // Summarization credential is the only hard requirement
    if credentials.openrouter_api_key.is_some() {
        results.push(CheckResult::ok("OPENROUTER_API_KEY", "configured"));
    } else {
        results.push(CheckResult::error(
            "OPENROUTER_API_KEY",
            "not set",
            "Set it with: export OPENROUTER_API_KEY='sk-or-...'",
        ));
    }

    // YouTube metadata degrades to a stub without a key
    if credentials.youtube_api_key.is_some() {
        results.push(CheckResult::ok("YOUTUBE_API_KEY", "configured"));
    } else {
        results.push(CheckResult::warning(
            "YOUTUBE_API_KEY",
            "not set",
            "YouTube sources will fall back to stub content. Set \
             YOUTUBE_API_KEY or [youtube] api_key in the config file.",
        ));
    }

    // Speech engine is optional; jobs succeed without audio
    let engine = &settings.synthesis.engine;
    match check_tool(engine) {
        Ok(()) => results.push(CheckResult::ok(engine, "available")),
        Err(e) => results.push(CheckResult::warning(
            engine,
            &format!("{}", e),
            "Summaries will be generated without audio.",
        )),
    }

    // Output directory
    let output_dir = settings.output_dir();
    match std::fs::create_dir_all(&output_dir) {
        Ok(()) => results.push(CheckResult::ok(
            "output dir",
            &format!("writable at {}", output_dir.display()),
        )),
        Err(e) => results.push(CheckResult::error(
            "output dir",
            &format!("cannot create {}: {}", output_dir.display(), e),
            "Adjust [general] output_dir in the config file.",
        )),
    }

    let mut has_error = false;
    for result in &results {
        let marker = match result.status {
            CheckStatus::Ok => style("ok").green().to_string(),
            CheckStatus::Warning => style("warn").yellow().to_string(),
            CheckStatus::Error => {
                has_error = true;
                style("fail").red().to_string()
            }
        };
        println!("  [{:>4}] {}: {}", marker, style(&result.name).bold(), result.message);
        if let Some(hint) = &result.hint {
            println!("         {}", style(hint).dim());
        }
    }

    println!();
    if has_error {
        Output::error("Some checks failed.");
        anyhow::bail!("doctor found problems");
    }

    Output::success("All required checks passed.");
    Ok(())
}
