//! Tclite Application Frameworks
//!
//! This crate provides the pieces needed to build an application around a Tclite
//! interpreter: an interactive REPL, and a runner for script files.  A typical `main`
//! creates an [`Interp`](../tclite/interp/struct.Interp.html), adds any
//! application-specific commands, and hands it to [`repl`] or [`script`].

pub use crate::shell::*;

mod shell;
