//! Assembler input driver CLI.

use std::io;

use asm_diagnostic::DiagnosticQueue;
use asmc::commands::{cat_files, explain_error, report_diagnostics, sniff_files};
use asmc::options::{parse_input_options, InputOptions};

fn main() {
    asmc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "cat" => {
            let options = options_or_exit(&args[2..], "cat");
            let mut queue = DiagnosticQueue::with_config(options.diagnostics.clone());
            let written = cat_files(&options, &mut io::stdout().lock(), &mut queue);
            finish(&options, &mut queue, written);
        }
        "sniff" => {
            let options = options_or_exit(&args[2..], "sniff");
            let mut queue = DiagnosticQueue::with_config(options.diagnostics.clone());
            let written = sniff_files(&options, &mut io::stdout().lock(), &mut queue);
            finish(&options, &mut queue, written.map(drop));
        }
        "--explain" | "explain" => {
            if args.len() < 3 {
                eprintln!("Usage: asmc explain <ERROR_CODE>");
                eprintln!("Example: asmc explain E0001");
                std::process::exit(1);
            }
            match explain_error(&args[2]) {
                Ok(doc) => println!("{doc}"),
                Err(message) => {
                    eprintln!("{message}");
                    std::process::exit(1);
                }
            }
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("asmc {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn options_or_exit(args: &[String], command: &str) -> InputOptions {
    match parse_input_options(args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!("Usage: asmc {command} [options] <file>...");
            std::process::exit(1);
        }
    }
}

/// Report diagnostics, then exit non-zero on errors or a failed write.
fn finish(options: &InputOptions, queue: &mut DiagnosticQueue, written: io::Result<()>) {
    let had_errors = report_diagnostics(queue, options.color);

    if let Err(err) = written {
        // A closed pipe downstream is not worth a message.
        if err.kind() != io::ErrorKind::BrokenPipe {
            eprintln!("error: can't write output: {err}");
        }
        std::process::exit(1);
    }
    if had_errors {
        std::process::exit(1);
    }
}

fn print_usage() {
    println!("asmc: assembler input driver");
    println!();
    println!("Usage: asmc <command> [options]");
    println!();
    println!("Commands:");
    println!("  cat <file>...        Stream files through the input layer to stdout");
    println!("  sniff <file>...      Show whether each file is preprocessed or raw");
    println!("  explain <code>       Explain an error code (e.g., E0001)");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Input options:");
    println!("  --preprocess         Preprocess files without a directive (default)");
    println!("  --no-preprocess      Read files without a directive raw");
    println!("  --comment-chars=<c>  Line comment characters (default: #)");
    println!("  --multibyte=<mode>   allow (default) or warn on malformed UTF-8");
    println!("  --color=<mode>       auto (default), always, never");
    println!("  --error-limit=<n>    Stop after n errors, 0 for no limit (default: 20)");
    println!();
    println!("A file named - is standard input. A #APP or #NO_APP first line");
    println!("overrides --preprocess / --no-preprocess for that file.");
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=asm_input=debug) for tracing output.");
}
