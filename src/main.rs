mod args;

use args::Args;
use clap::Parser;
use glyph_alternates::{load, AlternatesError, Report};

fn run(args: &Args) -> Result<(), AlternatesError> {
    log::debug!("Loading {}", args.font_path);
    let font = load(&args.font_path)?;

    let mut report = Report::new(&font);
    if args.labels {
        report = report.with_labels();
    }
    if args.features {
        report = report.with_features(&font);
    }
    if args.inventory {
        report = report.with_inventory(&font);
    }
    if let Some(text) = &args.text {
        report = report.restrict_to(text);
        if report.alternates.is_empty() {
            log::warn!("No alternates found for \"{}\"", text);
        }
    }

    let json = report.to_json()?;
    match &args.output {
        Some(output) => {
            log::info!("Saving report to {}", output);
            std::fs::write(output, json)?;
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbosity.log_level_filter())
        .init();
    if let Err(e) = run(&args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
