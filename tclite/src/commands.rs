//! # Standard Tclite Command Definitions
//!
//! This module defines the standard commands installed by `Interp::new`.  Each is a
//! plain [`CommandFunc`](../types/type.CommandFunc.html) and can be registered with an
//! empty interpreter individually.
//!
//! Like their classic counterparts, these commands accept and ignore surplus arguments;
//! only missing arguments are errors.

use crate::check_args;
use crate::interp::Interp;
use crate::tcl_err;
use crate::tcl_ok;
use crate::types::*;

/// # lindex *list index*
///
/// Returns the element of the whitespace-separated *list* at the zero-based *index*,
/// or the empty string if the index is out of range.
pub fn cmd_lindex(_interp: &mut Interp, argv: &[String]) -> TclResult {
    check_args(1, argv, 3, 0, "list index")?;

    let index: i64 = match argv[2].trim().parse() {
        Ok(index) => index,
        Err(_) => return tcl_err!("bad index \"{}\"", argv[2]),
    };

    if index < 0 {
        return tcl_ok!();
    }

    let elem = argv[1]
        .split_whitespace()
        .nth(index as usize)
        .unwrap_or_default();

    tcl_ok!(elem)
}

/// # proc *name params body*
///
/// Defines a procedure.  *params* names the parameters, separated by commas and/or
/// whitespace.  Redefining a procedure replaces it.
pub fn cmd_proc(interp: &mut Interp, argv: &[String]) -> TclResult {
    check_args(1, argv, 4, 0, "name args body")?;

    interp.define_proc(&argv[1], &argv[2], &argv[3]);

    tcl_ok!()
}

/// # puts *string* ?*string* ...?
///
/// Writes the strings, separated by spaces and followed by a newline, to the
/// interpreter's output.
pub fn cmd_puts(interp: &mut Interp, argv: &[String]) -> TclResult {
    check_args(1, argv, 2, 0, "string ?string ...?")?;

    let mut line = argv[1..].join(" ");
    line.push('\n');
    interp.write_output(&line);

    tcl_ok!()
}

/// # set *varName* ?*newValue*?
///
/// Sets variable *varName* to *newValue*, returning the empty string.  With no
/// *newValue*, returns the variable's value.
pub fn cmd_set(interp: &mut Interp, argv: &[String]) -> TclResult {
    check_args(1, argv, 2, 0, "varName ?newValue?")?;

    if argv.len() >= 3 {
        interp.set_var(&argv[1], argv[2].as_str());
        tcl_ok!()
    } else {
        interp.var(&argv[1])
    }
}

/// # sum *number* ?*number* ...?
///
/// Returns the sum of the numbers, which are parsed as floating point.
pub fn cmd_sum(_interp: &mut Interp, argv: &[String]) -> TclResult {
    check_args(1, argv, 2, 0, "number ?number ...?")?;

    let mut total = 0.0;

    for arg in &argv[1..] {
        let value: f64 = match arg.trim().parse() {
            Ok(value) => value,
            Err(_) => return tcl_err!("expected number but got \"{}\"", arg),
        };
        total += value;
    }

    tcl_ok!(total)
}

/// # version
///
/// Returns the interpreter's version string.
pub fn cmd_version(_interp: &mut Interp, _argv: &[String]) -> TclResult {
    tcl_ok!("tclite {}", env!("CARGO_PKG_VERSION"))
}
