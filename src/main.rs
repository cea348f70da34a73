use clap::Parser;
use lagcorr::cli::{Cli, Commands};
use lagcorr::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration, falling back to defaults when the file is absent
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        Config::default()
    });

    lagcorr::telemetry::init_logging(cli.log_level.as_deref())?;

    match cli.command {
        Commands::Fetch(args) => {
            tracing::info!("Starting candle download");
            args.execute(&config).await?;
        }
        Commands::Analyze(args) => {
            tracing::info!("Starting correlation analysis");
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!("  Source: {}", config.source.base_url);
            println!(
                "  Lags: -{}..={} step {}",
                config.analysis.lags_range, config.analysis.lags_range, config.analysis.lag_steps
            );
            println!("  Mode: {:?}", config.analysis.mode);
            println!(
                "  Rolling: window={} step={}",
                config.analysis.window_size, config.analysis.step_size
            );
            println!("  Splits: {}", config.analysis.splits);
            println!(
                "  Threshold: {} (drop zero lag: {})",
                config.analysis.threshold, config.analysis.drop_zero_lag
            );
        }
    }

    Ok(())
}
