use std::{path::PathBuf, process::ExitCode};

use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;

use tube::{
    bench::{self, Kind, DEFAULT_SIZES},
    logging,
    status::StationStatus,
    Result, StationNetwork,
};

/// Plans journeys over a station network loaded from a connections CSV.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log planner internals to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log filter, e.g. `debug` or `tube=trace`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Args, Debug)]
struct Data {
    /// Connections CSV: header row, then `line,station a,station b,minutes`.
    #[arg(short, long)]
    data: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Quickest journey by travel time.
    Route {
        #[command(flatten)]
        data: Data,
        from: String,
        to: String,
    },
    /// Journey with the fewest stops.
    Stops {
        #[command(flatten)]
        data: Data,
        from: String,
        to: String,
    },
    /// Minimum spanning backbone and the connections that could close.
    Backbone {
        #[command(flatten)]
        data: Data,
        /// Number of closable connections to list.
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
    /// Whether stations exist and are operational.
    Status {
        #[command(flatten)]
        data: Data,
        /// Only these stations are open; all known stations are open if omitted.
        #[arg(short, long)]
        operational: Vec<String>,
        #[arg(required = true)]
        queries: Vec<String>,
    },
    /// Average time per operation on random networks of growing size.
    Bench {
        #[arg(value_enum)]
        kind: BenchKind,
        #[arg(short, long, value_delimiter = ',')]
        sizes: Option<Vec<usize>>,
        #[arg(short, long, default_value_t = 100)]
        trials: usize,
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BenchKind {
    Dijkstra,
    Bfs,
    Kruskal,
    Lookup,
}

impl From<BenchKind> for Kind {
    fn from(value: BenchKind) -> Self {
        match value {
            BenchKind::Dijkstra => Kind::Dijkstra,
            BenchKind::Bfs => Kind::Bfs,
            BenchKind::Kruskal => Kind::Kruskal,
            BenchKind::Lookup => Kind::Lookup,
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).map_err(std::io::Error::from)?;
    println!("{text}");
    Ok(())
}

fn print_stations(stations: &[String]) {
    for (step, station) in stations.iter().enumerate() {
        let marker = if step == 0 {
            " (START)"
        } else if step + 1 == stations.len() {
            " (END)"
        } else {
            ""
        };
        println!("  {}. {}{}", step + 1, station, marker);
    }
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Command::Route { data, from, to } => {
            let journey = StationNetwork::load(&data.data)?.shortest_path(from, to)?;
            if cli.json {
                return print_json(&journey);
            }
            println!("Journey: {from} -> {to}");
            println!("Number of stations: {}", journey.stations.len());
            println!("Total journey time: {} minutes", journey.cost);
            print_stations(&journey.stations);
        }
        Command::Stops { data, from, to } => {
            let journey = StationNetwork::load(&data.data)?.fewest_stops(from, to)?;
            if cli.json {
                return print_json(&journey);
            }
            println!("Journey: {from} -> {to}");
            println!("Total number of stops: {}", journey.cost);
            print_stations(&journey.stations);
        }
        Command::Backbone { data, limit } => {
            let backbone = StationNetwork::load(&data.data)?.core_backbone()?;
            if cli.json {
                return print_json(&backbone);
            }
            println!("Core network backbone:");
            for link in &backbone.tree {
                println!("  {} - {} ({})", link.from, link.to, link.minutes);
            }
            println!(
                "Total journey time of core backbone = {} minutes",
                backbone.total_weight
            );
            println!("Closable connections: {}", backbone.closable.len());
            for (from, to) in backbone.closable.iter().take(*limit) {
                println!("  {from} - {to}");
            }
        }
        Command::Status {
            data,
            operational,
            queries,
        } => {
            let network = StationNetwork::load(&data.data)?;
            let mut status = StationStatus::from_index(network.stations());
            if !operational.is_empty() {
                status.restrict_to(operational);
            }
            let answers: Vec<_> = queries
                .iter()
                .map(|query| (query.as_str(), status.status(query)))
                .collect();
            if cli.json {
                return print_json(&answers);
            }
            println!("Stations loaded: {}", status.known());
            for (query, answer) in answers {
                println!("  {query:?}: {answer}");
            }
        }
        Command::Bench {
            kind,
            sizes,
            trials,
            seed,
        } => {
            let sizes = sizes.clone().unwrap_or_else(|| DEFAULT_SIZES.to_vec());
            let mut rng = StdRng::seed_from_u64(*seed);
            let samples = bench::measure(Kind::from(*kind), &sizes, *trials, &mut rng)?;
            if cli.json {
                return print_json(&samples);
            }
            for sample in samples {
                println!("n={:>6}  avg {:.8e} s", sample.size, sample.avg_secs);
            }
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref()) {
        eprintln!("Warning: failed to initialize logging: {e}");
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
