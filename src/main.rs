use anyhow::Result;
use clap::Parser;
use pasture_core::init_logging;
use pasture_lib::app::App;
use pasture_lib::model::config::load_or_default;
use std::io::Write;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Number of ticks to simulate
    #[arg(short, long, default_value_t = 1000)]
    ticks: u64,

    /// RNG seed (overrides `world.seed`)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Nearest-target search strategy (overrides `perception.search`)
    #[arg(long, value_enum)]
    search: Option<Search>,

    /// Stream events to stdout as JSON lines
    #[arg(long)]
    events: bool,

    /// Print the final summary as JSON
    #[arg(long)]
    json: bool,

    /// Print a population row every N ticks
    #[arg(long, default_value_t = 0)]
    report_every: u64,

    /// Log filter, e.g. `debug` or `pasture_core=trace` (defaults to RUST_LOG, then info)
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum Search {
    Breadth,
    Euclidean,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_level.as_deref());

    let mut config = load_or_default(&args.config)?;
    if let Some(seed) = args.seed {
        config.world.seed = Some(seed);
    }
    if let Some(search) = args.search {
        config.perception.search = match search {
            Search::Breadth => pasture_core::SearchStrategy::Breadth,
            Search::Euclidean => pasture_core::SearchStrategy::Euclidean,
        };
    }

    let mut app = App::new(config)?;
    app.report_every = args.report_every;

    // With --events, stdout carries the JSON stream and periodic rows go to stderr.
    let mut out = std::io::stdout().lock();
    let summary = if args.events {
        app.run(args.ticks, Some(&mut out), &mut std::io::stderr())?
    } else {
        app.run(args.ticks, None, &mut out)?
    };

    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
    } else {
        write!(out, "{}", summary.render_table())?;
    }
    Ok(())
}
