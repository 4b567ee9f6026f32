#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, IsTerminal, Write};
use tracing::info;

use scantree::cancel::CancelToken;
use scantree::cli::Args;
use scantree::config::{self, Settings};
use scantree::error::WalkError;
use scantree::export::{exporter_for, Format};
use scantree::progress::Progress;
use scantree::render::{render_metrics, render_tree};
use scantree::tree::walk_observed;
use scantree::{explore, logging, terminal};

fn main() {
    let args = Args::parse().validated();
    let quiet = args.quiet;
    if let Err(e) = run_app(args) {
        if is_cancelled(&e) {
            info!("scan cancelled");
            if !quiet {
                eprintln!("scantree: scan cancelled");
            }
            return;
        }
        eprintln!("scantree: {e:#}");
        std::process::exit(1);
    }
}

/// Whether `err` is a user abort anywhere in its context chain.
fn is_cancelled(err: &anyhow::Error) -> bool {
    err.chain()
        .any(|cause| matches!(cause.downcast_ref::<WalkError>(), Some(WalkError::Cancelled)))
}

fn run_app(args: Args) -> Result<()> {
    logging::init(args.verbose, args.quiet);

    let file = config::load(args.config.as_deref())?;
    let (term_width, _) = terminal::terminal_size();
    let settings = Settings::resolve(&args, file, term_width);

    let cancel = CancelToken::new();
    {
        let cancel = cancel.clone();
        ctrlc::set_handler(move || cancel.cancel()).context("failed to install Ctrl-C handler")?;
    }

    // Reject unsupported targets before spending time on the scan.
    let export = match &args.export {
        Some(target) => {
            let format = Format::from_path(target)
                .with_context(|| format!("{}: cannot export", target.display()))?;
            Some((target, format))
        }
        None => None,
    };

    if args.interactive {
        return explore::run(&args.path, &settings, &cancel);
    }

    let mut progress = if settings.show_progress && io::stderr().is_terminal() {
        Progress::start(cancel.clone())
    } else {
        Progress::disabled()
    };
    let result = walk_observed(&args.path, &settings.walk, &cancel, &mut progress);
    progress.finish();
    let result = result?;
    info!(entries = result.entries.len(), "scan complete");

    if let Some((target, format)) = export {
        let file = File::create(target)
            .with_context(|| format!("{}: failed to create export file", target.display()))?;
        let mut out = BufWriter::new(file);
        exporter_for(format, settings.render.glyphs)
            .export(&mut out, &result.entries)
            .with_context(|| format!("{}: export failed", target.display()))?;
        out.flush()?;
        println!("Exported {} entries to {}", result.entries.len(), target.display());
    } else {
        let stdout = io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        render_tree(&mut out, &result.entries, &settings.render)?;
        out.flush()?;
    }

    if settings.show_metrics {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        render_metrics(&mut out, &result.metrics, &settings.render)?;
    }
    Ok(())
}
