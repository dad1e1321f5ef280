//! Metricode CLI entry point.

fn main() {
    if let Err(e) = metricode_cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
