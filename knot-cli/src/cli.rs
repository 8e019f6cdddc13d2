use alexander_engine::sweep::{hedden_specs, simple_specs};
use alexander_engine::{AlexanderInvariant, KnotReport, KnotSpec};
use clap::{Parser, Subcommand, ValueEnum};
use csv::ReaderBuilder;
use knot_parser::{parse_record, parse_spec, KnotRow};
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "alexander",
    about = "Alexander polynomials of simple knots and Hedden knots in lens spaces"
)]
pub struct Cli {
    #[command(subcommand)]
    cmd: Command,

    /// Print one JSON object per knot
    #[arg(long, global = true)]
    json: bool,

    /// Validate p, q and k before computing
    #[arg(long, global = true)]
    checked: bool,

    /// Include the intermediate normalization steps
    #[arg(long, global = true)]
    trace: bool,

    /// Log pipeline stages at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simple knot in L(p,q) representing the homology class k
    Simple { p: u64, q: u64, k: u64 },

    /// Hedden knot in L(p,q)
    Hedden { p: u64, q: u64 },

    /// Knots in compact notation, e.g. "simple(7,2,3)" or "hedden(5,2)"
    Eval {
        #[arg(required = true)]
        specs: Vec<String>,
    },

    /// One knot per CSV row: family,p,q[,k]
    Batch {
        path: PathBuf,

        /// The first row names the columns (family,p,q,k)
        #[arg(long)]
        headers: bool,
    },

    /// Every knot with 2 <= p <= max-p
    Sweep {
        #[arg(long)]
        max_p: u64,

        #[arg(long, value_enum)]
        family: Option<FamilyArg>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum FamilyArg {
    Simple,
    Hedden,
}

/// How each knot is computed and printed.
#[derive(Debug, Clone, Copy, Default)]
struct OutputOptions {
    json: bool,
    checked: bool,
    trace: bool,
}

/// Runs the CLI mode
pub fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let options = OutputOptions {
        json: cli.json,
        checked: cli.checked,
        trace: cli.trace,
    };

    match cli.cmd {
        Command::Simple { p, q, k } => emit(KnotSpec::Simple { p, q, k }, options),
        Command::Hedden { p, q } => emit(KnotSpec::Hedden { p, q }, options),
        Command::Eval { specs } => {
            for input in &specs {
                emit(parse_spec(input)?, options)?;
            }
            Ok(())
        }
        Command::Batch { path, headers } => run_batch(&path, headers, options),
        Command::Sweep { max_p, family } => {
            run_sweep(max_p, family, options);
            Ok(())
        }
    }
}

/// Processes a CSV file. Failing rows are reported on stderr and skipped.
fn run_batch(path: &Path, headers: bool, options: OutputOptions) -> Result<(), Box<dyn Error>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let csv_reader = ReaderBuilder::new()
        .has_headers(headers)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let specs: Box<dyn Iterator<Item = Result<KnotSpec, Box<dyn Error>>>> = if headers {
        Box::new(
            csv_reader
                .into_deserialize::<KnotRow>()
                .map(|row| -> Result<KnotSpec, Box<dyn Error>> { Ok(row?.to_spec()?) }),
        )
    } else {
        Box::new(
            csv_reader
                .into_records()
                .map(|record| -> Result<KnotSpec, Box<dyn Error>> { Ok(parse_record(&record?)?) }),
        )
    };

    let mut failures = 0;
    for (index, spec) in specs.enumerate() {
        let row = index + 1 + usize::from(headers);
        if let Err(e) = spec.and_then(|spec| emit(spec, options)) {
            eprintln!("row {}: {}", row, e);
            failures += 1;
        }
    }

    if failures > 0 {
        log::warn!("{} row(s) of {} failed", failures, path.display());
    }
    Ok(())
}

fn run_sweep(max_p: u64, family: Option<FamilyArg>, options: OutputOptions) {
    let specs: Vec<KnotSpec> = match family {
        Some(FamilyArg::Simple) => simple_specs(max_p).collect(),
        Some(FamilyArg::Hedden) => hedden_specs(max_p).collect(),
        None => simple_specs(max_p).chain(hedden_specs(max_p)).collect(),
    };
    log::info!("sweeping {} knots with p <= {}", specs.len(), max_p);

    for spec in specs {
        if let Err(e) = emit(spec, options) {
            eprintln!("{}: {}", spec, e);
        }
    }
}

fn emit(spec: KnotSpec, options: OutputOptions) -> Result<(), Box<dyn Error>> {
    println!("{}", describe(spec, options)?);
    Ok(())
}

/// Computes one knot and formats it as a JSON line or a text block.
fn describe(spec: KnotSpec, options: OutputOptions) -> Result<String, Box<dyn Error>> {
    let knot = if options.checked {
        spec.build_checked()?
    } else {
        spec.build()?
    };

    let mut report = KnotReport::new(&knot);
    if options.trace {
        report = report.with_trace(knot.normalization_trace()?);
    }

    if options.json {
        return Ok(serde_json::to_string(&report)?);
    }

    let mut text = format!(
        "{}  relator {}  Δ(t) = {}  Δ(1) = {}",
        spec, report.relator, report.expression, report.value_at_one
    );
    if let Some(trace) = &report.trace {
        text.push_str(&format!("\n  simplified: {}", trace.simplified));
        text.push_str(&format!("\n  positive:   {}", trace.positive));
        if let Some(divided) = &trace.divided {
            text.push_str(&format!("\n  divided:    {}", divided));
        }
        text.push_str(&format!("\n  symmetric:  {}", trace.symmetric));
    }
    Ok(text)
}
