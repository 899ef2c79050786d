use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use pdp2i86::{translate_source, DriverError, Features, Semicolon, Translator, TranslatorConfig};
use pdp2i86_cli::{load_config, Report};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Translate PDP-11 assembly to i8086 assembly, line by line"
)]
struct Opts {
    /// PDP-11 assembly source
    #[arg(value_name = "INPUT", default_value = "hello.s")]
    input: PathBuf,
    /// Translator config (JSON)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Treat `;` as a statement separator instead of a comment
    #[arg(long)]
    separator: bool,
    /// Enable conditional branch and sub/dec translation
    #[arg(long)]
    extended: bool,
    /// Write a JSON report of untranslated lines and skipped tokens
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,
    /// Print the effective config as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let opts = Opts::parse();

    let mut cfg = match &opts.config {
        Some(path) => load_config(path)?,
        None => TranslatorConfig::default(),
    };
    if opts.separator {
        cfg.semicolon = Semicolon::Separator;
    }
    if opts.extended {
        cfg.features |= Features::EXTENDED;
    }
    if opts.dump_config {
        println!("{}", cfg.to_json()?);
        return Ok(());
    }

    let src = std::fs::read_to_string(&opts.input)
        .with_context(|| format!("reading {}", opts.input.display()))?;
    let tr = Translator::new(cfg);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let summary = match translate_source(&src, &tr, &mut out) {
        Ok(summary) => summary,
        Err(DriverError::Translate { line_no, source }) => {
            out.flush()?;
            error!(line_no, "aborting on unsupported construct");
            anyhow::bail!("{}:{line_no}: {source}", opts.input.display());
        }
        Err(e) => return Err(e.into()),
    };
    info!(
        lines = summary.lines,
        translated = summary.translated,
        fallbacks = summary.fallbacks.len(),
        "done"
    );

    if let Some(path) = &opts.report {
        Report::new(&opts.input.display().to_string(), cfg, summary).write_to(path)?;
    }
    Ok(())
}
