//! # Tclite: A Minimal TCL-like Command Language
//!
//! Tclite is a small, embeddable command interpreter in the TCL tradition.  A script is a
//! sequence of statements; each statement is a list of words, the first of which names a
//! command.  Words may be bare, `"quoted"`, `{braced}` (taken literally), or `[bracketed]`
//! (evaluated as a nested command and replaced by its result), and `$name` references are
//! replaced by variable values.  All values are strings.
//!
//! Scripts are executed directly from their text: there is no parse tree and no bytecode.
//! The [`Interp`] walks the text one statement at a time, dispatching each statement to a
//! builtin command (a Rust function registered by the host) or to a procedure defined by
//! the script with `proc`.
//!
//! ```
//! use tclite::Interp;
//!
//! let mut interp = Interp::new();
//! interp.capture_output();
//!
//! let result = interp.evaluate("set x 5\nputs \"x is $x\"\nsum 1 2 3");
//! assert_eq!(result, "6");
//! assert_eq!(interp.take_output(), "x is 5\n");
//! ```
//!
//! See the [`interp`] module for the embedding API, and [`commands`] for the standard
//! builtins.
//!
//! [`Interp`]: interp/struct.Interp.html
//! [`interp`]: interp/index.html
//! [`commands`]: commands/index.html

#![doc(html_root_url = "https://docs.rs/tclite/0.1.0")]

pub use crate::interp::Interp;
pub use crate::interp::Output;
pub use crate::types::*;

mod macros;

pub mod commands;
pub mod interp;
mod registry;
mod scope;
mod stack;
pub mod subst;
pub mod tokenizer;
pub mod types;

/// This function is used in command functions to check whether the command's argument
/// list is of a proper size for the given command.  If it is, `check_args` returns
/// the empty result; if not, it returns an `Arity` error with the usual TCL
/// `wrong # args` message.
///
/// The arguments are as follows:
///
/// * `namec`: the number of elements in `argv` that constitute the command's name.
///   This is usually 1.
/// * `argv`: the argument list, including the command name.
/// * `min`: the minimum number of arguments, including the command name.
/// * `max`: the maximum number of arguments, including the command name.  If 0,
///   there is no maximum.
/// * `argsig`: the argument signature, e.g., `"name args body"`.
///
/// # Example
///
/// ```
/// use tclite::*;
///
/// // The command: square intValue
/// fn cmd_square(_: &mut Interp, argv: &[String]) -> TclResult {
///     check_args(1, argv, 2, 2, "intValue")?;
///
///     let value: i64 = argv[1]
///         .parse()
///         .map_err(|_| Exception::tcl_err(format!("expected integer but got \"{}\"", argv[1])))?;
///
///     tcl_ok!(value * value)
/// }
///
/// let mut interp = Interp::empty();
/// interp.register_builtin("square", cmd_square);
/// assert_eq!(interp.evaluate("square 5"), "25");
/// assert_eq!(interp.eval("square").unwrap_err().message(),
///     "wrong # args: should be \"square intValue\"");
/// ```
pub fn check_args(
    namec: usize,
    argv: &[String],
    min: usize,
    max: usize,
    argsig: &str,
) -> Result<(), Exception> {
    assert!(namec >= 1);
    assert!(min >= 1);
    assert!(!argv.is_empty());

    if argv.len() < min || (max > 0 && argv.len() > max) {
        let mut usage = argv[0..namec].join(" ");
        if !argsig.is_empty() {
            usage.push(' ');
            usage.push_str(argsig);
        }
        Err(Exception::arity(format!(
            "wrong # args: should be \"{}\"",
            usage
        )))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_check_args() {
        assert!(check_args(1, &argv(&["mycmd"]), 1, 1, "").is_ok());
        assert!(check_args(1, &argv(&["mycmd"]), 1, 2, "arg1").is_ok());
        assert!(check_args(1, &argv(&["mycmd", "data"]), 1, 2, "arg1").is_ok());
        assert!(check_args(1, &argv(&["mycmd", "a", "b", "c"]), 2, 0, "arg ?arg ...?").is_ok());

        let err = check_args(1, &argv(&["mycmd", "a", "b"]), 1, 2, "arg1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Arity);
        assert_eq!(err.message(), "wrong # args: should be \"mycmd arg1\"");

        let err = check_args(1, &argv(&["proc"]), 4, 0, "name args body").unwrap_err();
        assert_eq!(err.message(), "wrong # args: should be \"proc name args body\"");

        let err = check_args(2, &argv(&["my", "sub", "x"]), 2, 2, "").unwrap_err();
        assert_eq!(err.message(), "wrong # args: should be \"my sub\"");
    }
}
