use rustyline::{error::ReadlineError, history::MemHistory, Config, Editor};
use std::fs;
use tclite::Interp;

/// Invokes an interactive REPL for the given interpreter, using `rustyline` line editing.
///
/// The REPL will display a default prompt to the user.  Press `^C` or `^D` to terminate
/// the REPL, returning control to the caller.  Input lines are accumulated until they
/// form a complete script, so braced procedure bodies may span lines.
///
/// Each submission is independent: the interpreter's error signal is cleared before the
/// script is evaluated, so one failing line doesn't block the next.
///
/// To change the prompt, set the `tcl_prompt1` variable to a script that returns
/// the desired prompt.
///
/// See [`tclite::interp`](../tclite/interp/index.html) for details on how to configure and
/// add commands to a Tclite interpreter.
///
/// # Example
///
/// ```no_run
/// use tclite::Interp;
///
/// // FIRST, create and initialize the interpreter.
/// let mut interp = Interp::new();
///
/// // NOTE: commands can be added to the interpreter here.
///
/// // NEXT, invoke the REPL.
/// tclite_shell::repl(&mut interp);
/// ```
pub fn repl(interp: &mut Interp) {
    let mut rl = match Editor::<(), MemHistory>::with_history(Config::default(), MemHistory::new())
    {
        Ok(rl) => rl,
        Err(err) => {
            eprintln!("failed to init rustyline: {}", err);
            return;
        }
    };

    let mut pending = String::new();

    loop {
        let readline = if !pending.is_empty() {
            rl.readline("> ")
        } else {
            rl.readline(&prompt(interp))
        };

        match readline {
            Ok(line) => {
                if !pending.is_empty() {
                    pending.push('\n');
                }
                pending.push_str(&line);

                if !interp.complete(&pending) {
                    continue;
                }

                let script = std::mem::take(&mut pending);
                let script = script.trim();

                if !script.is_empty() {
                    if let Err(e) = rl.add_history_entry(script) {
                        eprintln!("History error: {e}");
                    }

                    interp.clear_error();
                    let value = interp.evaluate(script);

                    // Don't output empty values.
                    if !value.is_empty() {
                        println!("{}", value);
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                break;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("I/O Error: {:?}", err);
                break;
            }
        }
    }
}

// Computes the prompt from `tcl_prompt1`, if it's set.
fn prompt(interp: &mut Interp) -> String {
    let Ok(pscript) = interp.var("tcl_prompt1") else {
        return "% ".into();
    };

    interp.clear_error();

    match interp.eval(&pscript) {
        Ok(prompt) => prompt,
        Err(exception) => {
            println!("{}", exception);
            "% ".into()
        }
    }
}

/// Executes a script from a set of command line arguments.
///
/// `args[0]` is presumed to be the name of a Tclite script file, with any subsequent
/// arguments being arguments to pass to the script.  The script will be be executed in
/// the context of the given interpreter.
///
/// # Variables
///
/// The calling information will be passed to the interpreter in the form of
/// variables:
///
/// * The variable `arg0` will be set to the `arg0` value.
/// * The variable `argv` will be set to the remainder of the `args` array, joined with
///   spaces (a list `lindex` can index).
///
/// # Example
///
/// ```no_run
/// use tclite::Interp;
/// use std::env;
///
/// // FIRST, get the command line arguments.
/// let args: Vec<String> = env::args().collect();
///
/// // NEXT, create and initialize the interpreter.
/// let mut interp = Interp::new();
///
/// // NOTE: commands can be added to the interpreter here.
///
/// // NEXT, evaluate the file, if any.
/// if args.len() > 1 {
///     tclite_shell::script(&mut interp, &args[1..]);
/// } else {
///     eprintln!("Usage: myshell *filename.tcl");
/// }
/// ```
pub fn script(interp: &mut Interp, args: &[String]) {
    let arg0 = &args[0];
    let argv = &args[1..];
    match fs::read_to_string(arg0) {
        Ok(script) => execute_script(interp, &script, arg0, argv),
        Err(e) => println!("{}", e),
    }
}

/// Executes a script read from a file, with any command-line arguments, in
/// the context of the given interpreter.  The `script` is the text of the
/// script, `arg0` is the name of the script file, and `argv` contains the script
/// arguments.
///
/// Output of the script's commands is printed as it would be in the REPL.  If the script
/// fails, the error is printed to standard error and the process exits with status 1.
fn execute_script(interp: &mut Interp, script: &str, arg0: &str, argv: &[String]) {
    interp.set_var("arg0", arg0);
    interp.set_var("argv", argv.join(" "));

    interp.clear_error();
    let value = interp.evaluate(script);

    match interp.error() {
        None => {
            if !value.is_empty() {
                println!("{}", value);
            }
        }
        Some(exception) => {
            // The output preceding the error message is still the script's.
            let output = value.strip_suffix(exception.message()).unwrap_or("");
            if !output.is_empty() {
                println!("{}", output);
            }
            eprintln!("{}", exception);
            std::process::exit(1);
        }
    }
}
