use clap::Parser;
use std::process::ExitCode;
use stirling_update::cli::{Cli, CliError, Command, build_source, execute, write_settings};
use stirling_update::logging::init_logging;
use stirling_update::settings::Settings;
use stirling_update_service::UpdateFacade;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let (settings, load_error) = match Settings::load(cli.settings.as_deref()) {
        Ok(settings) => (settings, None),
        Err(error) => (Settings::default(), Some(error)),
    };

    init_logging(
        None,
        cli.debug || settings.debug_logging,
        settings.max_log_size_bytes,
    );

    // write-settings re-reads the file itself and refuses to overwrite it.
    if let Some(error) = &load_error
        && !matches!(cli.command, Command::WriteSettings)
    {
        log::warn!("{error}; using default settings");
        eprintln!("warning: {error}; using default settings");
    }

    match run(&cli, &settings).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            log::error!("{error}");
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli, settings: &Settings) -> Result<String, CliError> {
    if matches!(cli.command, Command::WriteSettings) {
        let path = write_settings(cli.settings.as_deref())?;
        return Ok(path.display().to_string());
    }

    let config = settings.to_update_config();
    let source = build_source(cli.announcements.as_deref(), &config)?;
    let facade = UpdateFacade::new(config, source);
    execute(&facade, &cli.command).await
}
