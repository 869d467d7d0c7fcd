//! Tclite Client API Types
//!
//! This module defines a number of types used by clients of the Tclite API:
//! the result type returned by every evaluation step, the error type carried by a
//! failing step, and the signatures of command functions.
//!
//! Tclite is untyped: every token, variable, and command result is a `String`.

/// Hasher used by the interpreter's tables.
pub type TclHasher = fnv::FnvBuildHasher;

/// The standard `Result<T,E>` type for Tclite code.  A successful step produces the text
/// of its output; a failing step produces an [`Exception`].
pub type TclResult = Result<String, Exception>;

/// A function used to implement a Tclite builtin command.
///
/// `argv[0]` is the command name as invoked; the remaining elements are the
/// substituted argument tokens, so the raw argument count is `argv.len() - 1`.
pub type CommandFunc = fn(&mut crate::Interp, &[String]) -> TclResult;

/// A boxed closure used to implement a Tclite builtin command.  Closures may capture
/// application state.
#[cfg(feature = "closure-commands")]
pub type CommandClosure = std::rc::Rc<dyn Fn(&mut crate::Interp, &[String]) -> TclResult>;

/// The kinds of error a Tclite script can produce.
///
/// All kinds are reported to the host as a single line of text; the kind exists so that
/// Rust clients can tell them apart without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unbalanced bracket, brace, or quote while tokenizing.
    Parse,
    /// A builtin or procedure invoked with too few arguments.
    Arity,
    /// No builtin or procedure matches the leading token.
    UnknownCommand,
    /// A `$name` reference to a variable that isn't bound.
    UnknownVariable,
    /// The nesting limit was exceeded.
    Limit,
    /// Any error a builtin raises for its own reasons.
    User,
}

/// An error raised while evaluating a script.
///
/// The `Display` form is the bare message; this is exactly what
/// [`Interp::evaluate`](../interp/struct.Interp.html#method.evaluate) returns to the host.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct Exception {
    kind: ErrorKind,
    message: String,
}

impl Exception {
    /// Creates a new exception of the given kind.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Creates a `User` error, the kind raised by builtins for domain reasons.
    pub fn tcl_err(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::User, message)
    }

    /// Creates a `Parse` error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Parse, message)
    }

    /// Creates an `Arity` error.
    pub fn arity(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Arity, message)
    }

    /// Returns the exception's kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the exception's message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns true if the exception is of the given kind.
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_message() {
        let ex = Exception::new(ErrorKind::UnknownCommand, "No such function:bogus");
        assert_eq!(ex.to_string(), "No such function:bogus");
        assert_eq!(ex.message(), "No such function:bogus");
        assert!(ex.is(ErrorKind::UnknownCommand));
    }

    #[test]
    fn test_constructors() {
        assert_eq!(Exception::tcl_err("x").kind(), ErrorKind::User);
        assert_eq!(Exception::parse("x").kind(), ErrorKind::Parse);
        assert_eq!(Exception::arity("x").kind(), ErrorKind::Arity);
    }
}
