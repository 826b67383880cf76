use clap::Parser;
use tracing_subscriber::EnvFilter;

use ini2cfg::cli::{self, Cli};

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let args = Cli::parse();
    init_logging(args.verbose);

    match cli::run(&args) {
        Ok(out) => {
            if out.ends_with('\n') || out.is_empty() {
                print!("{out}");
            } else {
                println!("{out}");
            }
        }
        Err(e) => {
            eprintln!("ini2cfg: {e}");
            std::process::exit(1);
        }
    }
}
