use std::env;
use tclite::Interp;

fn main() {
    init_tracing();

    // FIRST, get the command line arguments.
    let args: Vec<String> = env::args().collect();

    // NEXT, create and initialize the interpreter.
    let mut interp = Interp::new();

    // NEXT, if there's a script file, run it; otherwise, invoke the REPL.
    if args.len() > 1 {
        tclite_shell::script(&mut interp, &args[1..]);
    } else {
        tclite_shell::repl(&mut interp);
    }
}

/// Installs a log subscriber when `RUST_LOG` is set, e.g., `RUST_LOG=tclite=trace`.
/// Otherwise logging is left off, so it can't mix with script output.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .with(EnvFilter::from_default_env())
            .init();
    }
}
