use chrono::{Datelike, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use crypto_payroll::application::executor::PayrollRunExecutor;
use crypto_payroll::application::forecast::MAX_FORECAST_MONTHS;
use crypto_payroll::application::quote::PayrollQuoteCalculator;
use crypto_payroll::application::service::PayrollService;
use crypto_payroll::domain::money::Usd;
use crypto_payroll::domain::payee::Stablecoin;
use crypto_payroll::infrastructure::ids::RandomIds;
use crypto_payroll::infrastructure::in_memory::{InMemoryRosterStore, InMemoryRunStore};
use crypto_payroll::infrastructure::policy::FixedBasketPolicy;
use crypto_payroll::infrastructure::prices::StaticPriceTable;
use crypto_payroll::infrastructure::screening::PatternScreen;
use crypto_payroll::interfaces::csv::payee_reader::PayeeReader;
use crypto_payroll::logging::init_logging;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct RosterArgs {
    /// Payee roster CSV file
    roster: PathBuf,
}

#[derive(Args, Default)]
struct PricingArgs {
    /// JSON price table of {"TOKEN": usd_price}. Defaults to the built-in mock prices.
    #[arg(long)]
    prices: Option<PathBuf>,

    /// Reject funding tokens missing from the price table instead of pricing them at 1 USD
    #[arg(long)]
    strict: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Quote the cost of funding the roster's payroll
    Quote {
        #[command(flatten)]
        roster: RosterArgs,
        #[command(flatten)]
        pricing: PricingArgs,
        /// Funding token symbol
        #[arg(long, default_value = "ETH")]
        token: String,
    },
    /// Quote and execute a payroll run, printing its receipts
    Execute {
        #[command(flatten)]
        roster: RosterArgs,
        #[command(flatten)]
        pricing: PricingArgs,
        /// Funding token symbol
        #[arg(long, default_value = "ETH")]
        token: String,
    },
    /// List payees flagged for compliance review
    Screen {
        #[command(flatten)]
        roster: RosterArgs,
    },
    /// Show each payee's payout split in stablecoin, off-ramp and alternative asset
    Payouts {
        #[command(flatten)]
        roster: RosterArgs,
    },
    /// Project monthly payroll
    Forecast {
        #[command(flatten)]
        roster: RosterArgs,
        /// Number of months to project
        #[arg(
            long,
            default_value_t = 6,
            value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_FORECAST_MONTHS))
        )]
        months: u32,
        /// First month (YYYY-MM-DD); defaults to the current month
        #[arg(long)]
        start: Option<NaiveDate>,
    },
}

impl Command {
    fn roster(&self) -> &RosterArgs {
        match self {
            Command::Quote { roster, .. }
            | Command::Execute { roster, .. }
            | Command::Screen { roster }
            | Command::Payouts { roster }
            | Command::Forecast { roster, .. } => roster,
        }
    }

    /// Only quoting commands take pricing flags; the rest price nothing.
    fn pricing(&self) -> Option<&PricingArgs> {
        match self {
            Command::Quote { pricing, .. } | Command::Execute { pricing, .. } => Some(pricing),
            Command::Screen { .. } | Command::Payouts { .. } | Command::Forecast { .. } => None,
        }
    }
}

#[derive(Serialize)]
struct ScreenRow<'a> {
    id: &'a str,
    name: &'a str,
    wallet: &'a str,
    flag: String,
}

#[derive(Serialize)]
struct PayoutRow<'a> {
    id: &'a str,
    stablecoin: Stablecoin,
    stable_amount: Usd,
    offramp_usd: Usd,
    alt_usd: Usd,
}

fn build_calculator(args: &PricingArgs) -> Result<PayrollQuoteCalculator> {
    let prices = match &args.prices {
        Some(path) => {
            let file = File::open(path).into_diagnostic()?;
            StaticPriceTable::from_json_reader(file).into_diagnostic()?
        }
        None => StaticPriceTable::mock(),
    };

    Ok(
        PayrollQuoteCalculator::new(Box::new(prices), Box::new(FixedBasketPolicy::default()))
            .strict(args.strict),
    )
}

async fn build_service(roster: &RosterArgs, pricing: &PricingArgs) -> Result<PayrollService> {
    let service = PayrollService::new(
        Box::new(InMemoryRosterStore::new()),
        Box::new(InMemoryRunStore::new()),
        build_calculator(pricing)?,
        PayrollRunExecutor::new(Box::new(RandomIds::new())),
        Box::new(PatternScreen::default()),
        Box::new(RandomIds::new()),
    );

    // Header is line 1.
    let file = File::open(&roster.roster).into_diagnostic()?;
    for (line, payee) in PayeeReader::new(file).payees().enumerate() {
        let result = match payee {
            Ok(payee) => service.import_payee(payee).await,
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            tracing::warn!(line = line + 2, error = %e, "skipping roster row");
        }
    }

    Ok(service)
}

fn write_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value).into_diagnostic()?;
    writeln!(stdout).into_diagnostic()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let default_pricing = PricingArgs::default();
    let pricing = cli.command.pricing().unwrap_or(&default_pricing);
    let service = build_service(cli.command.roster(), pricing).await?;

    match &cli.command {
        Command::Quote { token, .. } => {
            let quote = service.quote(token).await.into_diagnostic()?;
            write_json(&quote)?;
        }
        Command::Execute { token, .. } => {
            let run = service.execute(token).await.into_diagnostic()?;
            write_json(&run)?;
        }
        Command::Screen { .. } => {
            // Header is written even when nothing is flagged.
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(io::stdout());
            writer
                .write_record(["id", "name", "wallet", "flag"])
                .into_diagnostic()?;
            for (payee, flag) in service.compliance_queue().await.into_diagnostic()? {
                writer
                    .serialize(ScreenRow {
                        id: &payee.id,
                        name: &payee.name,
                        wallet: &payee.wallet,
                        flag: flag.to_string(),
                    })
                    .into_diagnostic()?;
            }
            writer.flush().into_diagnostic()?;
        }
        Command::Payouts { .. } => {
            let mut writer = csv::Writer::from_writer(io::stdout());
            for payee in service.payees().await.into_diagnostic()? {
                let preview = payee.payout_preview();
                writer
                    .serialize(PayoutRow {
                        id: &payee.id,
                        stablecoin: preview.stablecoin,
                        stable_amount: preview.stable_amount,
                        offramp_usd: preview.offramp_usd,
                        alt_usd: preview.alt_usd,
                    })
                    .into_diagnostic()?;
            }
            writer.flush().into_diagnostic()?;
        }
        Command::Forecast { months, start, .. } => {
            let start = start.unwrap_or_else(|| {
                let today = Utc::now().date_naive();
                today.with_day(1).unwrap_or(today)
            });
            let mut writer = csv::Writer::from_writer(io::stdout());
            for point in service.forecast(start, *months).await.into_diagnostic()? {
                writer.serialize(point).into_diagnostic()?;
            }
            writer.flush().into_diagnostic()?;
        }
    }

    Ok(())
}
