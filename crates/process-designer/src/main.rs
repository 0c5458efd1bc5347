use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use process_designer_config::DesignerConfig;
use process_designer_core::history::HistoryConfig;
use process_designer_core::io::{design_to_json, load_design, save_design};
use process_designer_core::{run_script, DesignSession, ProcessDesign};

/// Replays process-design edit scripts with undo/redo support.
#[derive(Parser, Debug)]
#[command(name = "process-designer", version, about)]
struct Cli {
    /// Command script to run. Reads stdin when omitted.
    script: Option<PathBuf>,

    /// Design file to start from instead of the empty layout.
    #[arg(long)]
    design: Option<PathBuf>,

    /// Where to save the final design.
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Config file to use instead of the one next to the executable.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(DesignerConfig::config_path);
    let config = DesignerConfig::load_or_create(&config_path);

    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter)),
        )
        .init();

    tracing::info!("Starting process-designer");

    let history_config = HistoryConfig::from(&config);
    let design = match &cli.design {
        Some(path) => load_design(path)?,
        None => ProcessDesign::with_layout(history_config.default_group_count),
    }
    .with_max_name_length(config.max_name_length);
    let mut session = DesignSession::new(design, &history_config);

    let reader: Box<dyn BufRead> = match &cli.script {
        Some(path) => Box::new(BufReader::new(
            std::fs::File::open(path)
                .with_context(|| format!("failed to open script: {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(std::io::stdin())),
    };

    let pretty = config.pretty_output;
    let summary = run_script(&mut session, reader, |design| {
        println!("{}", design_to_json(design, pretty)?);
        Ok(())
    })?;
    if summary.invalid + summary.failed > 0 {
        tracing::warn!(
            "{} line(s) skipped, {} command(s) failed",
            summary.invalid,
            summary.failed
        );
    }

    println!("{}", design_to_json(session.design(), config.pretty_output)?);

    if let Some(path) = &cli.output {
        save_design(session.design(), path, config.pretty_output)?;
        tracing::info!("Saved design to {}", path.display());
    }

    Ok(())
}
