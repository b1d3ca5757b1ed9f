mod config;
mod display;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use config::{Config, OutputFormat};
use tossalad_store::Auditor;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    tracing::info!("tossalad-audit v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::parse();
    let auditor = Auditor::with_policy(config.store()?, config.fetch_policy());

    match config.format {
        OutputFormat::Text => {
            // Header goes out with the first record so a failed fetch prints nothing.
            let started_at = chrono::Utc::now();
            let mut header_printed = false;
            let report = auditor
                .run_at(started_at, |record| {
                    if !header_printed {
                        print!("{}", display::render_header(&started_at));
                        header_printed = true;
                    }
                    println!("{}", display::status_line(record));
                })
                .await
                .context("analysis quality audit failed")?;
            if !header_printed {
                print!("{}", display::render_header(&report.generated_at));
            }
            print!("{}", display::render_summary(&report));
        }
        OutputFormat::Json => {
            let report = auditor
                .run()
                .await
                .context("analysis quality audit failed")?;
            let json = serde_json::to_string_pretty(&report).context("serialising report")?;
            println!("{json}");
        }
    }
    Ok(())
}
