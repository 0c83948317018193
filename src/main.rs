//! gcn-trim: trace-driven instruction classifier for GCN Southern Islands GPUs

use std::env;
use std::path::PathBuf;

use gcn_trim::config::Config;
use gcn_trim::trace::{analyze, CodexlTrace};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut no_warn = false;
    let mut path = None;

    for arg in &args[1..] {
        if arg == "--help" || arg == "-h" {
            usage();
            return Ok(());
        } else if arg == "--sample-config" {
            print_sample_config();
            return Ok(());
        } else if arg == "--no-warn" {
            no_warn = true;
        } else if !arg.starts_with('-') {
            path = Some(arg.as_str());
        } else {
            eprintln!("Unknown option: {}", arg);
            usage();
            std::process::exit(1);
        }
    }

    let path = match path {
        Some(p) => p,
        None => {
            usage();
            std::process::exit(1);
        }
    };

    let config = Config::get();
    let path = resolve_trace_path(path, config);

    println!("Loading: {}", path.display());
    println!();

    let trace = CodexlTrace::from_file(&path)?;
    println!(
        "Rows: {} accepted, {} short, {} with bad hex words",
        trace.len(),
        trace.short_rows(),
        trace.bad_word_rows()
    );
    println!();

    let warn_unknown = !no_warn && config.warn_unknown();
    let analysis = analyze(&trace, warn_unknown);

    print!("{}", analysis.summary.report());
    println!();
    println!(
        "Classified {} rows, ignored {} with no matching format",
        analysis.classified, analysis.unknown
    );

    Ok(())
}

/// Resolve a trace argument against the configured trace directory.
///
/// A path that exists as given wins; otherwise a bare name is looked up
/// under `trace_dir` when one is configured.
fn resolve_trace_path(arg: &str, config: &Config) -> PathBuf {
    let direct = PathBuf::from(arg);
    if direct.exists() {
        return direct;
    }

    if let Some(dir) = config.trace_dir() {
        let candidate = PathBuf::from(dir).join(arg);
        if candidate.exists() {
            log::info!("Resolved {} via trace_dir to {}", arg, candidate.display());
            return candidate;
        }
    }

    direct
}

/// Print a sample config file and where to place it.
fn print_sample_config() {
    print!("{}", Config::sample_config());
    if let Some(path) = Config::user_config_path() {
        println!();
        println!("# User config path: {}", path.display());
    }
}

fn usage() {
    eprintln!("Usage: gcn-trim [OPTIONS] <trace.csv>");
    eprintln!();
    eprintln!("Classify the instructions of a CodeXL trace by encoding format");
    eprintln!("and functional unit, and print the deduplicated instruction mix.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --no-warn          Do not warn about words matching no format");
    eprintln!("  --sample-config    Print a sample configuration file and exit");
    eprintln!("  -h, --help         Show this help");
}
