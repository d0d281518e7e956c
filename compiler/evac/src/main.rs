//! Eva interpreter CLI

use evac::commands::{eval_source, parse_file, parse_run_options, run_file, run_repl, RunOptions};
use evac::init_tracing;

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "run" => {
            let (options, positional) = options_or_exit(&args[2..]);
            let Some(path) = positional.first() else {
                eprintln!("error: missing file path");
                eprintln!("Usage: eva run <file.eva> [--max-depth=<n>] [--quiet]");
                std::process::exit(1);
            };
            run_file(path, &options);
        }
        "eval" => {
            let (options, positional) = options_or_exit(&args[2..]);
            let Some(source) = positional.first() else {
                eprintln!("error: missing source text");
                eprintln!("Usage: eva eval \"<expressions>\" [--max-depth=<n>] [--quiet]");
                std::process::exit(1);
            };
            eval_source(source, &options);
        }
        "parse" => {
            if args.len() < 3 {
                eprintln!("Usage: eva parse <file.eva>");
                std::process::exit(1);
            }
            parse_file(&args[2]);
        }
        "repl" => {
            let (options, _) = options_or_exit(&args[2..]);
            run_repl(&options);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("Eva {}", env!("CARGO_PKG_VERSION"));
            println!("Language version {}", eva_eval::VERSION);
        }
        _ => {
            // If it looks like a file path, try to run it
            if std::path::Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("eva"))
            {
                let (options, _) = options_or_exit(&args[2..]);
                run_file(command, &options);
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    }
}

fn options_or_exit(args: &[String]) -> (RunOptions, Vec<String>) {
    match parse_run_options(args) {
        Ok(parsed) => parsed,
        Err(msg) => {
            eprintln!("error: {msg}");
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Eva interpreter");
    println!();
    println!("Usage: eva <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file.eva>       Run an Eva program");
    println!("  eval <source>        Evaluate expressions given as an argument");
    println!("  parse <file.eva>     Read a file and print its expressions");
    println!("  repl                 Start an interactive session");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Options (run, eval, repl):");
    println!("  --max-depth=<n>      Fail after <n> nested function calls");
    println!("  --quiet, -q          Do not print the final value");
    println!();
    println!("Environment:");
    println!("  RUST_LOG=<filter>    Enable tracing, e.g. RUST_LOG=eva_eval=debug");
    println!();
    println!("Examples:");
    println!("  eva run main.eva");
    println!("  eva main.eva                    # Same as `eva run main.eva`");
    println!("  eva eval \"(+ 1 2)\"");
    println!("  eva run deep.eva --max-depth=500");
}
