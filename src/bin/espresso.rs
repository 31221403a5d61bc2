//! Espresso Logic Minimizer - Command Line Interface
//!
//! Reads a PLA file, runs the requested command, and writes PLA output to
//! stdout or a file.

use clap::{Parser, ValueEnum};
use espresso_min::{Cover, CoverType, EspressoConfig, Minimizable, PLAReader, PLAWriter};
use std::path::PathBuf;
use std::process;
use std::time::Instant;

const VERSION: &str = concat!("espresso-min ", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
enum Command {
    /// Run the Espresso heuristic minimization algorithm (default)
    Espresso,
    /// Echo the PLA without modification
    Echo,
    /// Print statistics about the PLA
    Stats,
}

#[derive(Debug, Clone, ValueEnum)]
enum OutputType {
    /// Just the ON-set
    F,
    /// ON-set plus don't-cares
    Fd,
    /// ON-set plus OFF-set
    Fr,
    /// All three sets
    Fdr,
}

impl From<OutputType> for CoverType {
    fn from(fmt: OutputType) -> Self {
        match fmt {
            OutputType::F => CoverType::F,
            OutputType::Fd => CoverType::FD,
            OutputType::Fr => CoverType::FR,
            OutputType::Fdr => CoverType::FDR,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "espresso")]
#[command(about = "Espresso heuristic logic minimizer", long_about = None)]
#[command(version = VERSION)]
struct Args {
    /// PLA file to read
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// What to do with the PLA
    #[arg(short = 'D', long = "do", value_enum, default_value = "espresso")]
    command: Command,

    /// Which sets to emit
    #[arg(short = 'o', long = "output", value_enum, default_value = "f")]
    output_format: OutputType,

    /// Report sizes and timing on stderr
    #[arg(short = 's', long = "summary")]
    summary: bool,

    /// Do not print the solution
    #[arg(short = 'x', long = "no-output")]
    no_output: bool,

    /// Write the solution here instead of stdout
    #[arg(short = 'O', long = "out-file")]
    output_file: Option<PathBuf>,

    /// Log the passes of the minimization loop to stderr
    #[arg(short = 'd', long = "debug")]
    debug: bool,

    /// One expansion pass only (fast mode)
    #[arg(long = "single-expand", alias = "fast")]
    single_expand: bool,

    /// Use SUPER_GASP instead of LAST_GASP
    #[arg(long = "super-gasp")]
    super_gasp: bool,

    /// Do not pull essential primes out of the iteration loop
    #[arg(long = "no-essential")]
    no_essential: bool,

    /// Skip the MAKE_SPARSE post-pass
    #[arg(long = "no-make-sparse")]
    no_make_sparse: bool,

    /// Stop MAKE_SPARSE after its first pass
    #[arg(long = "no-force-irredundant")]
    no_force_irredundant: bool,

    /// Rebuild the ON-set before minimizing
    #[arg(long = "recompute-onset")]
    recompute_onset: bool,

    /// Keep multi-output cubes wrapped before the first expansion
    #[arg(long = "no-unwrap-onset")]
    no_unwrap_onset: bool,
}

fn main() {
    let args = Args::parse();

    if args.debug {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "debug".into()),
            )
            .init();
    }

    if args.summary {
        eprintln!("{}", VERSION);
        eprintln!();
    }

    let mut cover = match Cover::from_pla_file(&args.input) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading PLA file '{}': {}", args.input.display(), e);
            process::exit(1);
        }
    };

    if args.summary {
        eprintln!(
            "Input: {} inputs, {} outputs, {} cubes",
            cover.num_inputs(),
            cover.num_outputs(),
            cover.num_cubes()
        );
    }

    let config = EspressoConfig {
        single_expand: args.single_expand,
        use_super_gasp: args.super_gasp,
        remove_essential: !args.no_essential,
        skip_make_sparse: args.no_make_sparse,
        force_irredundant: !args.no_force_irredundant,
        recompute_onset: args.recompute_onset,
        unwrap_onset: !args.no_unwrap_onset,
    };

    match args.command {
        Command::Espresso => {
            let start = Instant::now();
            cover = match cover.minimize_with_config(&config) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("Error during minimization: {}", e);
                    process::exit(1);
                }
            };
            if args.summary {
                eprintln!(
                    "Minimized to {} cubes in {:.3}s",
                    cover.num_cubes(),
                    start.elapsed().as_secs_f64()
                );
            }
        }
        Command::Echo => {}
        Command::Stats => {
            println!("PLA Statistics:");
            println!("  Inputs:  {}", cover.num_inputs());
            println!("  Outputs: {}", cover.num_outputs());
            println!("  Cubes:   {}", cover.num_cubes());
            process::exit(0);
        }
    }

    if !args.no_output {
        let output_type = CoverType::from(args.output_format);
        let written = match args.output_file {
            Some(ref path) => cover.to_pla_file(path, output_type),
            None => cover.write_pla(&mut std::io::stdout().lock(), output_type),
        };
        if let Err(e) = written {
            eprintln!("Error writing PLA output: {}", e);
            process::exit(1);
        }
    }
}
