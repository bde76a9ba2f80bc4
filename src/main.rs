use std::env;
use std::path::PathBuf;

use olist_etl::pipeline::{run_etl, run_validation};

fn main() {
    let args: Vec<String> = env::args().collect();

    let mode = args.get(1).map(String::as_str).unwrap_or("run");
    let data_dir = args
        .get(2)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));

    let result = match mode {
        "run" => run_etl(&data_dir),
        "validate" => run_validation(&data_dir),
        other => {
            eprintln!("❌ Unknown mode '{}'", other);
            eprintln!("   Usage: olist-etl [run|validate] [data_dir]");
            std::process::exit(1);
        }
    };

    // One generic failure path: print the error chain, exit nonzero.
    if let Err(e) = result {
        eprintln!("❌ Pipeline failed: {:#}", e);
        std::process::exit(1);
    }
}
