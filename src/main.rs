//! folog CLI: run program files or start an interactive session.

use std::env;
use std::process::ExitCode;

use folog::repl::Repl;
use folog::session::{ExecResult, Session};

fn usage(exe: &str) {
    eprintln!(
        "usage: {exe} [--json] [FILE ...]
Execute first-order logic programs in one shared session.
With no FILE, start an interactive session on stdin.

Options:
  --json        Print the results of each file as JSON
  -h, --help    Show this help message

Set RUST_LOG=folog=debug to see engine internals."
    );
}

fn main() -> ExitCode {
    env_logger::init();

    let exe = env::args().next().unwrap_or_else(|| "folog".into());
    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage(&exe);
        return ExitCode::SUCCESS;
    }
    let json = args.iter().any(|a| a == "--json");
    let files: Vec<&String> = args.iter().filter(|a| !a.starts_with("--")).collect();
    if let Some(unknown) = args.iter().find(|a| a.starts_with("--") && *a != "--json") {
        eprintln!("unknown option: {}", unknown);
        usage(&exe);
        return ExitCode::from(2);
    }

    if files.is_empty() {
        println!("folog - unification, forward chaining and resolution");
        println!("Type :help for help, :quit. to exit.\n");
        let mut repl = Repl::new();
        return match repl.run() {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    let mut session = Session::new();
    for path in files {
        let result = match session.load_file(path) {
            Ok(result) => result,
            Err(e) => {
                eprintln!("{}: {}", path, e);
                return ExitCode::FAILURE;
            }
        };
        if json {
            match serde_json::to_string_pretty(&result) {
                Ok(text) => println!("{}", text),
                Err(e) => {
                    eprintln!("{}: cannot encode results: {}", path, e);
                    return ExitCode::FAILURE;
                }
            }
        } else {
            println!("{}", result.render(session.trace()));
        }
        if contains_quit(&result) {
            break;
        }
    }
    ExitCode::SUCCESS
}

fn contains_quit(result: &ExecResult) -> bool {
    match result {
        ExecResult::Quit => true,
        ExecResult::Loaded { results, .. } => results.iter().any(contains_quit),
        _ => false,
    }
}
