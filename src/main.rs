use clap::Parser;
use getclock::client::Client;
use getclock::measure::{Collector, CollectorConfig, Measurer};
use getclock::report;
use getclock::telemetry::{self, BoxError, TelemetryConfig};

/// Measure time-to-headers and time-to-body for a list of URLs, all at once.
#[derive(Debug, Clone, Parser)]
#[command(name = "getclock")]
#[command(version, about, long_about = None)]
struct Args {
    /// URLs to GET
    #[arg(value_name = "URL")]
    urls: Vec<String>,

    /// debug logging as default instead of Warn; use RUST_LOG env for more options
    #[arg(long, short = 'v', default_value_t = false)]
    verbose: bool,

    /// enable pretty logging (format for humans)
    #[arg(long, default_value_t = false)]
    pretty: bool,

    /// max requests in flight (0 = one per URL, unbounded)
    #[arg(long, short = 'c', value_name = "N", default_value_t = 0)]
    concurrency: usize,
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let args = Args::parse();

    telemetry::init_tracing(TelemetryConfig {
        verbose: args.verbose,
        pretty: args.pretty,
    })?;

    let config = CollectorConfig {
        concurrency: (args.concurrency > 0).then_some(args.concurrency),
    };
    let collector = Collector::new(Measurer::new(Client::new()), config);

    let records = collector.measure_all(args.urls).await;

    report::write_records(
        &records,
        &mut std::io::stdout().lock(),
        &mut std::io::stderr().lock(),
    )?;
    Ok(())
}
