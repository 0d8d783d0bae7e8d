use anyhow::Result;
use clap::Parser;

mod batch;
mod cli;
mod settings;

use settings::Settings;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Info))
        .init();

    let settings = resolve_settings(&cli)?;
    settings.validate()?;
    log::debug!("settings: {settings:?}");

    let inputs = batch::collect_inputs(&cli.input)?;
    log::info!(
        "{} candidate image(s) in {}",
        inputs.len(),
        cli.input.display()
    );

    let report = batch::run(&inputs, &cli.output, &settings, cli.parallel)?;
    if !report.failed.is_empty() {
        log::warn!("{} image(s) skipped", report.failed.len());
    }
    println!("{}", report.summary());
    Ok(())
}

/// Settings file, else the chosen preset, then command-line overrides.
fn resolve_settings(cli: &cli::Cli) -> Result<Settings> {
    let base = if let Some(path) = cli.config.as_deref() {
        Settings::load(path)?
    } else if let Some(preset) = cli.preset {
        Settings {
            lines: preset.config(),
            ..Settings::default()
        }
    } else {
        Settings::default()
    };
    Ok(cli.apply(base))
}
