// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use collatz_orbits::sweep::{self, ConvergenceSequence, LengthRow};
use collatz_orbits::tree::Direction;
use collatz_orbits::{telemetry, CollatzInt, CollatzParams, Path};
use num_bigint::BigInt;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

/// Explore orbits of Collatz-style maps.
#[derive(Parser, Debug)]
#[command(name = "collatz", version)]
struct Cli {
    #[command(flatten)]
    map: MapArgs,

    /// Integer representation used for every computation
    #[arg(long, value_enum, default_value_t = IntType::I64, global = true)]
    int: IntType,

    /// Shorthand for `--int bigint`
    #[arg(long, global = true, conflicts_with = "int")]
    bigint: bool,

    /// More logging on stderr (-v info, -vv debug, -vvv every path)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct MapArgs {
    /// JSON file with map parameters; flags override its values
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    divisor: Option<i32>,

    #[arg(long, global = true)]
    multiplier: Option<i32>,

    #[arg(long, global = true, allow_hyphen_values = true)]
    addend: Option<i32>,

    /// Stop paths early once they exceed the factor limit
    #[arg(long, global = true)]
    speed: bool,

    /// Scales tried by one ancestor search
    #[arg(long, global = true)]
    ancestry_limit: Option<u64>,
}

impl MapArgs {
    fn params(&self) -> Result<CollatzParams> {
        let base = match &self.config {
            Some(file) => {
                let text = fs::read_to_string(file)
                    .with_context(|| format!("reading {}", file.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("parsing {}", file.display()))?
            }
            None => CollatzParams::default(),
        };
        let mut params = CollatzParams::new(
            self.divisor.unwrap_or(base.divisor()),
            self.multiplier.unwrap_or(base.multiplier()),
            self.addend.unwrap_or(base.addend()),
        )?
        .with_speed(self.speed || base.speed())
        .with_ancestry_limit(base.ancestry_limit())?;
        if let Some(limit) = self.ancestry_limit {
            params = params.with_ancestry_limit(limit)?;
        }
        Ok(params)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum IntType {
    I32,
    I64,
    I128,
    Bigint,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Orbit and class of each start
    Path {
        #[arg(required = true, allow_hyphen_values = true)]
        starts: Vec<String>,
    },
    /// Decode equivalence-class strings
    Class {
        #[arg(required = true, allow_hyphen_values = true)]
        classes: Vec<String>,
    },
    /// Every value down to the local terminus, with its class digits
    Seq {
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// Read VALUE as an equivalence class and size digits by its length
        #[arg(long)]
        class: bool,
    },
    /// Successive parents of a start
    Ancestors {
        #[arg(allow_hyphen_values = true)]
        start: String,
        /// Number of ancestors to list
        #[arg(short, long, default_value_t = 5)]
        count: usize,
        /// First scale to try
        #[arg(short, long, default_value = "1")]
        scale: String,
    },
    /// Convergence sequences from a start down to its final loop
    Chain {
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// Read VALUE as an equivalence class
        #[arg(long)]
        class: bool,
    },
    /// Histogram of path lengths over 1..=multiplier*divisor^EXPONENT
    DistLegs {
        #[arg(allow_hyphen_values = true)]
        exponent: i32,
        #[arg(long)]
        parallel: bool,
    },
    /// Histogram of path lengths, listing each class for small exponents
    DistEq {
        #[arg(allow_hyphen_values = true)]
        exponent: i32,
    },
    /// Histogram of orbits over 1..=multiplier*divisor^EXPONENT
    DistPath {
        #[arg(allow_hyphen_values = true)]
        exponent: i32,
        #[arg(long)]
        parallel: bool,
    },
    /// Convergent equivalence classes with up to DIGITS factors
    Classes {
        #[arg(allow_hyphen_values = true)]
        digits: i32,
    },
    /// Convergent orbits with up to LENGTH factors
    Paths {
        #[arg(allow_hyphen_values = true)]
        length: i32,
    },
}

/// Per-entry listings are left out above this many digits.
const SUMMARY_LIMIT: u32 = 25;

/// Per-class listings of `dist-eq` are left out above this exponent.
const LISTING_LIMIT: u32 = 12;

fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init_tracing(cli.verbose)?;
    let params = cli.map.params()?;
    tracing::info!(?params, "map parameters");

    let int = if cli.bigint { IntType::Bigint } else { cli.int };
    match int {
        IntType::I32 => run::<i32>(&cli.command, &params),
        IntType::I64 => run::<i64>(&cli.command, &params),
        IntType::I128 => run::<i128>(&cli.command, &params),
        IntType::Bigint => run::<BigInt>(&cli.command, &params),
    }
}

fn parse_int<T>(text: &str) -> Result<T>
where
    T: CollatzInt,
    <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    text.parse()
        .with_context(|| format!("invalid integer {:?}", text))
}

fn parse_start<T>(value: &str, class: bool, params: &CollatzParams) -> Result<T>
where
    T: CollatzInt,
    <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    if class {
        collatz_orbits::parse_class(value, params)
            .with_context(|| format!("decoding {:?}", value))
    } else {
        parse_int(value)
    }
}

fn run<T>(command: &Command, params: &CollatzParams) -> Result<()>
where
    T: CollatzInt,
    <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    match command {
        Command::Path { starts } => {
            let starts = starts
                .iter()
                .map(|s| parse_int::<T>(s))
                .collect::<Result<Vec<_>>>()?;
            let width = width_of(&starts);
            for start in starts {
                print_path(&Path::new(start, params), width);
            }
        }
        Command::Class { classes } => {
            for class in classes {
                let path = Path::<T>::from_class(class, params)
                    .with_context(|| format!("decoding {:?}", class))?;
                println!("{}", path.report(path.class_length(), 0, 0));
                print_path(&path, 0);
            }
        }
        Command::Seq { value, class } => {
            let seq = if *class {
                let path = Path::<T>::from_class(value, params)
                    .with_context(|| format!("decoding {:?}", value))?;
                sweep::sequence_by_class(&path)
            } else {
                sweep::sequence_by_path(&Path::new(parse_int::<T>(value)?, params))
            };
            print_sequence(&seq);
        }
        Command::Ancestors {
            start,
            count,
            scale,
        } => {
            let path = Path::new(parse_int::<T>(start)?, params);
            let mut scale = parse_int::<T>(scale)?;
            for n in 1..=*count {
                match path.ancestry(&mut scale)? {
                    Some(parent) => println!("Ancestor {} of {}: {}", n, path.start(), parent),
                    None => {
                        println!("{} has no ancestors", path.start());
                        break;
                    }
                }
            }
        }
        Command::Chain { value, class } => {
            let chain = sweep::terminal_chain(parse_start::<T>(value, *class, params)?, params);
            for link in chain.links() {
                print_sequence(&sweep::sequence_by_path(&Path::new(link.clone(), params)));
            }
            if !chain.errors().is_empty() {
                bail!("chain stopped early: {}", chain.errors());
            }
            if !chain.reached_global() {
                println!("Non-global terminus loop detected in terminal orbit");
            }
        }
        Command::DistLegs { exponent, parallel } => {
            let tree = if *parallel {
                sweep::par_dist_legs::<T>(*exponent, params)?
            } else {
                sweep::dist_legs::<T>(*exponent, params)?
            };
            let mut print = |legs: &usize, count: u64| {
                println!("For {:>3}: downleg count is {}", legs, count)
            };
            let total = tree.traverse(Direction::Forward, Some(&mut print));
            println!("Total of {} entries in all categories", total);
        }
        Command::DistEq { exponent } => {
            let listing = exponent.unsigned_abs() <= LISTING_LIMIT;
            if !listing {
                println!("Suppressing classes for exponents above {}", LISTING_LIMIT);
            }
            let width = sweep::SweepRange::exponent(*exponent, params)?.width();
            let tree = sweep::dist_eq::<T, _>(*exponent, params, |path| {
                if listing {
                    println!("{}", path.report_class(width));
                }
            })?;
            let mut print = |legs: &usize, count: u64| {
                println!("For {:>3}: downleg count is {}", legs, count)
            };
            let total = tree.traverse(Direction::Forward, Some(&mut print));
            println!("Total of {} entries in all categories", total);
        }
        Command::DistPath { exponent, parallel } => {
            let tree = if *parallel {
                sweep::par_dist_path::<T>(*exponent, params)?
            } else {
                sweep::dist_path::<T>(*exponent, params)?
            };
            for (orbit, count) in &tree {
                println!(
                    "Count {:>10}, downlegs {:>4}: flow is {}",
                    count,
                    orbit.len(),
                    orbit
                );
            }
            println!("Total of {} entries in all categories", tree.total());
        }
        Command::Classes { digits } => {
            let summary = sweep::convergent_classes::<T>(*digits, params)?;
            let range = summary.range().len();
            if digits.unsigned_abs() <= SUMMARY_LIMIT {
                let width = (range / 6).to_string().len();
                for (_, tree) in summary.trees().collect::<Vec<_>>().into_iter().rev() {
                    for (class, count) in tree {
                        println!(
                            "Count {:>width$}, class length {:>4}: flow is {}",
                            count,
                            collatz_orbits::class_digits(class),
                            class,
                            width = width
                        );
                    }
                }
            }
            println!("\nClasslen (Pathways): Frequency");
            print_rows(&summary.rows(), false);
            let found = summary.found();
            println!(
                "Found {} convergent equivalence classes of length {} out of {} total ({}/{}).",
                found,
                digits.unsigned_abs(),
                range,
                found / 3,
                range / 3
            );
        }
        Command::Paths { length } => {
            let summary = sweep::convergent_paths::<T>(*length, params)?;
            let range = summary.range().len();
            if length.unsigned_abs() <= SUMMARY_LIMIT {
                let width = (range / 2).to_string().len();
                for (_, tree) in summary.trees().collect::<Vec<_>>().into_iter().rev() {
                    for (orbit, count) in tree {
                        println!(
                            "Count {:>width$}, downlegs {:>4}: flow is {}",
                            count,
                            orbit.len(),
                            orbit,
                            width = width
                        );
                    }
                }
            }
            println!("\nDownlegs Uplegs (Pathways): Frequency");
            let rows = summary.rows();
            print_rows(&rows, true);
            if let Some(largest) = summary.largest() {
                println!(
                    "Largest integer divergence in range is {} ({} digits), beginning with terminus {}",
                    largest.value,
                    largest.value.decimal_digits(),
                    largest.start
                );
            }
            if summary.errors() > 0 {
                tracing::warn!(errors = summary.errors(), "paths built with errors");
            }
            let total = summary.total();
            println!(
                "Found {} convergent paths out of {} total ({}/{}) with up to {} factors of {}",
                total,
                range,
                total / 3,
                range / 3,
                length.unsigned_abs(),
                params.divisor()
            );
        }
    }
    Ok(())
}

fn width_of<T: CollatzInt>(values: &[T]) -> usize {
    values
        .iter()
        .map(|v| v.decimal_digits() + usize::from(v.is_negative()))
        .max()
        .unwrap_or(0)
}

fn print_path<T: CollatzInt>(path: &Path<T>, width: usize) {
    println!("{}", path.report_path(width));
    println!(
        "{:>width$}  max {}, terminus {}, class {} ({} factors, next {})",
        "",
        path.peak(),
        path.terminus(),
        path.class_string(),
        path.class_factors(),
        path.next_factors(),
        width = width
    );
    if !path.errors().is_empty() {
        tracing::warn!(start = %path.start(), errors = %path.errors(), "path incomplete");
    }
}

fn print_sequence<T: CollatzInt>(seq: &ConvergenceSequence<T>) {
    println!("Convergence sequence for {} is:", seq.start());
    for line in seq.lines() {
        println!("{}", line);
    }
    if !seq.errors().is_empty() {
        tracing::warn!(start = %seq.start(), errors = %seq.errors(), "sequence incomplete");
    }
}

fn print_rows(rows: &[LengthRow], uplegs: bool) {
    for row in rows {
        if uplegs {
            println!(
                "{:>8} {:>6} ({:>8}): {}",
                row.length,
                row.length.saturating_sub(1),
                row.nodes,
                row.frequency
            );
        } else {
            println!("{:>8} ({:>8}): {}", row.length, row.nodes, row.frequency);
        }
    }
}
