//! Convenience Macros
//!
//! This module contains macros for use by command authors.

/// Returns an `Ok` [`TclResult`].
///
/// If called with no arguments, returns an empty string as the `Ok` result.
/// If called with one argument, returns the argument converted to a `String`.
/// If called with two or more arguments, computes the string using `format!`.
///
/// # Examples
///
/// ```
/// use tclite::*;
/// fn func() -> TclResult {
///     tcl_ok!()
/// }
///
/// fn func2(x: f64) -> TclResult {
///     tcl_ok!(x)
/// }
///
/// fn func3(name: &str) -> TclResult {
///     tcl_ok!("hello, {}", name)
/// }
///
/// assert_eq!(func(), Ok(String::new()));
/// assert_eq!(func2(6.0), Ok("6".to_string()));
/// assert_eq!(func3("World"), Ok("hello, World".to_string()));
/// ```
///
/// [`TclResult`]: types/type.TclResult.html
#[macro_export]
macro_rules! tcl_ok {
    () => (
        Ok(String::new())
    );
    ($arg:expr) => (
        Ok($arg.to_string())
    );
    ($($arg:tt)*) => (
        Ok(format!($($arg)*))
    )
}

/// Returns an `Err` [`TclResult`] holding a `User` error.  The arguments are as for
/// `format!`.
///
/// # Examples
///
/// ```
/// use tclite::*;
///
/// fn func(x: &str) -> TclResult {
///     tcl_err!("bad value: \"{}\"", x)
/// }
///
/// assert_eq!(func("x").unwrap_err().message(), "bad value: \"x\"");
/// ```
///
/// [`TclResult`]: types/type.TclResult.html
#[macro_export]
macro_rules! tcl_err {
    ($($arg:tt)*) => (
        Err($crate::types::Exception::tcl_err(format!($($arg)*)))
    )
}
