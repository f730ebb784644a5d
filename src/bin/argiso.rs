//! Command-line driver for the matching pipeline, grounded on `match.hpp`'s
//! "load, fast-reject, order, search, report" flow and on the repetition
//! harness conventional to the original `vf3` benchmark binaries.

use std::fmt::Debug;
use std::hash::Hash;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use log::{debug, info};

use argiso::classify::NodeClasses;
use argiso::engine::{parallel_find_all, serial_find_all, ParallelConfig, StackKind};
use argiso::graph::Arg;
use argiso::loaders::edge_text::EdgeTextSource;
use argiso::loaders::vf_text::VfTextSource;
use argiso::ordering::build_order;
use argiso::probability::{SubIsoProbability, TargetStatistics};
use argiso::reject::fast_reject;
use argiso::state::{Lookahead, MatchingState, PatternProfile, Semantics};
use argiso::ArgIsoError;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Vf,
    Edge,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StackArch {
    /// Global stack only: every child goes through the shared LIFO.
    Global = 1,
    /// Global plus per-thread local stacks, per `G_limit`/`L_limit`.
    GlobalAndLocal = 2,
}

/// VF3-family (sub)graph isomorphism matcher.
#[derive(Debug, Parser)]
#[command(version, about, disable_help_flag = true)]
struct Cli {
    pattern_file: PathBuf,
    target_file: PathBuf,

    #[arg(long = "help", action = clap::ArgAction::Help)]
    help: Option<bool>,

    /// Input format for both files.
    #[arg(short = 'f', long = "format", value_enum, default_value = "vf")]
    format: Format,

    /// Treat every edge as undirected (symmetrize).
    #[arg(short = 'u')]
    undirected: bool,

    /// Emit every matching to stdout.
    #[arg(short = 's')]
    store_solutions: bool,

    /// Verbose timing and fast-reject diagnostics.
    #[arg(short = 'v')]
    verbose: bool,

    /// Minimum wall-clock time, in seconds, spent repeating `FindAll`.
    #[arg(short = 'r', default_value_t = 1.0)]
    repeat_seconds: f64,

    /// Number of parallel worker threads. Omit entirely for the serial
    /// engine; pass with no value to use one thread per logical CPU.
    #[arg(short = 't', long = "threads", num_args = 0..=1, default_missing_value = "0")]
    threads: Option<usize>,

    /// First CPU id to pin worker 0 to (workers after it take consecutive ids).
    #[arg(short = 'c', long = "first-cpu")]
    first_cpu: Option<usize>,

    /// Parallel stack architecture: 1 = global only, 2 = global + local.
    #[arg(short = 'a', long = "arch", value_enum, default_value = "global-and-local")]
    arch: StackArch,

    /// Depth at or below which children are pushed to the global stack.
    #[arg(short = 'h', long = "g-limit", default_value_t = 3)]
    g_limit: u32,

    /// Local-stack size above which children overflow to the global stack.
    #[arg(short = 'l', long = "l-limit")]
    l_limit: Option<usize>,

    /// Use the lock-free Treiber stack instead of the mutex-guarded one.
    #[arg(short = 'k')]
    lock_free: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if cli.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::init();
    }

    let result = match cli.format {
        Format::Vf => run_vf(&cli),
        Format::Edge => run_edge(&cli),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("argiso: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_vf(cli: &Cli) -> Result<(), ArgIsoError> {
    let pattern_text = std::fs::read_to_string(&cli.pattern_file)?;
    let target_text = std::fs::read_to_string(&cli.target_file)?;
    let pattern: Arg<i64, i64> = Arg::from_source(&VfTextSource::parse(&pattern_text)?)?;
    let target: Arg<i64, i64> = Arg::from_source(&VfTextSource::parse(&target_text)?)?;
    run_pipeline(cli, pattern, target)
}

fn run_edge(cli: &Cli) -> Result<(), ArgIsoError> {
    let pattern_text = std::fs::read_to_string(&cli.pattern_file)?;
    let target_text = std::fs::read_to_string(&cli.target_file)?;
    let pattern: Arg<(), ()> = Arg::from_source(&EdgeTextSource::parse_with_options(
        &pattern_text,
        cli.undirected,
        true,
    )?)?;
    let target: Arg<(), ()> = Arg::from_source(&EdgeTextSource::parse_with_options(
        &target_text,
        cli.undirected,
        true,
    )?)?;
    run_pipeline(cli, pattern, target)
}

/// Runs fast-reject, ordering, and the repeated-search benchmark loop for
/// any attribute type, then prints the one-line report.
fn run_pipeline<N, E>(cli: &Cli, pattern: Arg<N, E>, target: Arg<N, E>) -> Result<(), ArgIsoError>
where
    N: Clone + Eq + Hash + Debug + Sync,
    E: Clone + Eq + Hash + Debug + Sync,
{
    let semantics = Semantics::SubIso;
    let induced = false;

    if !fast_reject(&pattern, &target, semantics) {
        debug!("fast-reject rejected the pair before any search");
        println!("0 0 0");
        return Ok(());
    }

    let classes = NodeClasses::build(&pattern, &target);
    let stats = TargetStatistics::build(&target);
    let probability = SubIsoProbability::new(&stats);
    let order = build_order(&pattern, &probability);
    let profile = PatternProfile::build(&pattern, &order, &classes);

    let node_eq = |a: &N, b: &N| a == b;
    let edge_eq = |a: &E, b: &E| a == b;

    let deadline = Duration::from_secs_f64(cli.repeat_seconds.max(0.0));
    let overall_start = Instant::now();
    let mut first_time_s = 0.0;
    let mut all_time_s = 0.0;
    let mut solution_count = 0usize;
    let mut repetitions = 0u32;
    let mut printed_solutions = false;

    loop {
        let mut state = MatchingState::new(
            &pattern, &target, &order, &classes, &profile, induced, semantics, Lookahead::Full,
        );

        let rep_start = Instant::now();
        match cli.threads {
            None => {
                let first_seen: Mutex<Option<Duration>> = Mutex::new(None);
                let mut visitor = |_: &Vec<(u32, u32)>| {
                    let mut slot = first_seen.lock().unwrap();
                    if slot.is_none() {
                        *slot = Some(rep_start.elapsed());
                    }
                    false
                };
                let solutions = serial_find_all(&mut state, &node_eq, &edge_eq, Some(&mut visitor), None);
                let all_elapsed = rep_start.elapsed();

                if repetitions == 0 {
                    first_time_s = first_seen.into_inner().unwrap().unwrap_or(all_elapsed).as_secs_f64();
                    all_time_s = all_elapsed.as_secs_f64();
                    solution_count = solutions.len();
                    if cli.store_solutions && !printed_solutions {
                        print_solutions(&solutions);
                        printed_solutions = true;
                    }
                }
            }
            Some(threads) => {
                let num_threads = if threads == 0 { num_cpus::get() } else { threads };
                let config = ParallelConfig {
                    num_threads,
                    first_cpu: cli.first_cpu,
                    g_limit: match cli.arch {
                        StackArch::Global => 0,
                        StackArch::GlobalAndLocal => cli.g_limit,
                    },
                    l_limit: cli.l_limit.unwrap_or(pattern.node_count() as usize),
                    stack_kind: if cli.lock_free { StackKind::LockFree } else { StackKind::Synchronized },
                    store_solutions: cli.store_solutions,
                };
                let measured_first: Mutex<Option<Duration>> = Mutex::new(None);
                let (count, solutions) = parallel_find_all(
                    state,
                    &node_eq,
                    &edge_eq,
                    &config,
                    Some(&|| {
                        *measured_first.lock().unwrap() = Some(rep_start.elapsed());
                    }),
                    None,
                );
                let all_elapsed = rep_start.elapsed();

                if repetitions == 0 {
                    first_time_s = measured_first.into_inner().unwrap().unwrap_or(all_elapsed).as_secs_f64();
                    all_time_s = all_elapsed.as_secs_f64();
                    solution_count = count;
                    if cli.store_solutions && !printed_solutions {
                        print_solutions(&solutions);
                        printed_solutions = true;
                    }
                }
            }
        }

        repetitions += 1;
        if overall_start.elapsed() >= deadline {
            break;
        }
    }

    info!("{repetitions} repetitions in {:?}", overall_start.elapsed());
    println!("{solution_count} {first_time_s} {all_time_s}");
    Ok(())
}

fn print_solutions(solutions: &[Vec<(u32, u32)>]) {
    for sol in solutions {
        let rendered: Vec<String> = sol.iter().map(|(v, u)| format!("{v}->{u}")).collect();
        println!("{}", rendered.join(" "));
    }
}
