//! Init command - create directories and a starter configuration.

use crate::cli::Output;
use crate::config::Settings;

/// Run the init command.
pub fn run_init(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Initializing Lekse");

    std::fs::create_dir_all(settings.data_dir())?;
    std::fs::create_dir_all(settings.output_dir())?;
    Output::success(&format!("Data directory: {}", settings.data_dir().display()));
    Output::success(&format!(
        "Output directory: {}",
        settings.output_dir().display()
    ));

    let config_path = Settings::default_config_path();
    if config_path.exists() {
        Output::info(&format!(
            "Configuration already exists at {}",
            config_path.display()
        ));
    } else {
        settings.save()?;
        Output::success(&format!("Wrote configuration to {}", config_path.display()));
    }

    Output::info("Next: set OPENROUTER_API_KEY, then run 'lekse doctor'.");
    Ok(())
}
