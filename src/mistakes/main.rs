use clap::Parser;

mod cli;
use cli::setup::{init_colors, init_logging, Cli};

fn main() {
    let args = Cli::parse();
    init_logging(args.verbose, args.no_color);
    init_colors(args.no_color);

    if let Err(e) = cli::run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
