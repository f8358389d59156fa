use clap::Parser;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::cli::{CliArgs, Commands, OutputFormatter, Palette};
use crate::commands::{HttpTraceSource, IpReport, IpReporter, SystemClipboard, TimeReporter};
use crate::utils::config::ToolConfig;
use crate::utils::error::KcResult;
use crate::utils::logging::setup_tracing;

/// Main CLI runner that handles command execution
pub struct CliRunner {
    config: ToolConfig,
    palette: Palette,
    verbose: bool,
}

impl CliRunner {
    pub fn new(config: ToolConfig, verbose: bool) -> Self {
        let palette = Palette::detect(config.color);
        Self {
            config,
            palette,
            verbose,
        }
    }

    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    /// Look up the public address, print it and copy it to the clipboard
    pub async fn run_ip(&self) -> KcResult<IpReport> {
        if self.verbose {
            eprintln!(
                "{}",
                OutputFormatter::format_info(&format!("Using trace endpoint {}", self.config.trace_url), Palette::for_stderr())
            );
        }

        let source = HttpTraceSource::from_config(&self.config)?;
        let mut reporter = IpReporter::new(source, SystemClipboard::new());
        let mut stdout = std::io::stdout();

        let report = reporter.report(&mut stdout).await?;
        debug!(?report, "ip command finished");
        Ok(report)
    }

    /// Print the time once, or keep redrawing until Ctrl+C
    pub async fn run_now(&self, no_stop: bool) -> KcResult<()> {
        let reporter = TimeReporter::new(self.palette, self.config.refresh_interval());
        let mut stdout = std::io::stdout();

        if !no_stop {
            return reporter.print_once(&mut stdout);
        }

        let token = CancellationToken::new();
        let watcher = tokio::spawn(cancel_on_interrupt(token.clone()));

        let result = reporter.run_continuous(&mut stdout, &token).await;
        watcher.abort();
        result
    }
}

/// Cancel `token` on the first Ctrl+C
async fn cancel_on_interrupt(token: CancellationToken) {
    match signal::ctrl_c().await {
        Ok(()) => {
            debug!("interrupt received");
            token.cancel();
        }
        Err(e) => warn!(error = %e, "failed to listen for interrupt signal"),
    }
}

/// Main entry point for CLI execution
pub async fn run_cli() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    setup_tracing(args.verbose);

    let config = match ToolConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", OutputFormatter::format_error(&e, Palette::for_stderr()));
            std::process::exit(1);
        }
    };

    let runner = CliRunner::new(config, args.verbose);

    let result = match args.command {
        Commands::Ip => runner.run_ip().await.map(|_| ()),
        Commands::Now { no_stop } => runner.run_now(no_stop).await,
    };

    if let Err(e) = result {
        eprintln!("{}", OutputFormatter::format_error(&e, Palette::for_stderr()));
        std::process::exit(1);
    }

    Ok(())
}
