use std::fs::File;
use std::io::{self, BufWriter};

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};

use finreport::config::{Args, ReportConfig};
use finreport::currency::{self, FrankfurterClient};
use finreport::report::build_report;
use finreport::{data, logging};

fn run(args: &Args) -> Result<()> {
    let config = ReportConfig::try_from(args)?;
    let mut ledger = data::load_csv(&args.input, args.load_options())
        .with_context(|| format!("failed to load {}", args.input.display()))?;

    if let Some(code) = &args.currency {
        ledger = currency::convert_ledger(&ledger, code, &FrankfurterClient::default())
            .with_context(|| format!("failed to convert amounts from {}", code))?;
    }

    let report = build_report(&ledger, &config)?;

    match &args.output {
        Some(path) => {
            let mut out = BufWriter::new(File::create(path)?);
            report.write_to(&mut out)?;
            info!("report saved to {}", path.display());
        },
        None => report.write_to(&mut io::stdout().lock())?,
    }

    if let Some(path) = &args.summary_csv {
        data::export_summaries_csv(report.summaries(), File::create(path)?)?;
        info!("monthly summaries saved to {}", path.display());
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.log_file.as_deref()).context("failed to create log file")?;

    run(&args).inspect_err(|err| error!("{:#}", err))
}
