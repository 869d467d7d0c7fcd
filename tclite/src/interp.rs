//! The Tclite Interpreter
//!
//! The [`Interp`] struct is the primary API for embedding Tclite into a Rust application.
//! Given an `Interp`, the application may:
//!
//! * Evaluate scripts
//! * Check scripts for completeness
//! * Extend the language by defining new commands in Rust
//! * Set and get variables
//! * Inspect and clear the error signal
//!
//! # Interp is not Sync!
//!
//! The [`Interp`] is intended for use in a single thread.  It is safe to have `Interps`
//! in different threads, but nothing is shared between them.
//!
//! # Creating an Interpreter
//!
//! [`Interp::new`](struct.Interp.html#method.new) creates an interpreter and populates it
//! with the standard commands: `puts`, `version`, `sum`, `lindex`, `set`, and `proc`.
//! [`Interp::empty`](struct.Interp.html#method.empty) creates an interpreter with no
//! commands at all, for applications that want to define their own command set.
//!
//! # Evaluating Scripts
//!
//! There are two ways to evaluate a script.
//!
//! [`Interp::evaluate`](struct.Interp.html#method.evaluate) is the classic entry point.
//! It returns the concatenated results of the script's commands; if a command fails,
//! evaluation stops, and the text of the error is appended to the output produced so far.
//! The error is also _latched_: every later call to `evaluate` (or `eval`) fails
//! immediately with the same error until the host calls
//! [`Interp::clear_error`](struct.Interp.html#method.clear_error).
//!
//! ```
//! use tclite::Interp;
//!
//! let mut interp = Interp::new();
//! assert_eq!(interp.evaluate("sum 1 2\nbogus\nsum 3 4"), "3No such function:bogus");
//!
//! // The error stays latched until it is cleared.
//! assert_eq!(interp.evaluate("sum 5 5"), "No such function:bogus");
//! interp.clear_error();
//! assert_eq!(interp.evaluate("sum 5 5"), "10");
//! ```
//!
//! [`Interp::eval`](struct.Interp.html#method.eval) returns a [`TclResult`] instead: the
//! concatenated output, or the [`Exception`] that stopped the script.  It doesn't latch
//! errors, and is the natural choice when evaluating scripts from Rust code.
//!
//! # Defining New Commands
//!
//! A builtin command is a [`CommandFunc`]: a Rust function that is given the interpreter
//! and the command's words (the command name followed by its arguments) and returns a
//! [`TclResult`].  Register it with
//! [`Interp::register_builtin`](struct.Interp.html#method.register_builtin).  Builtin
//! names can't be redefined; registering an existing name is refused.
//!
//! ```
//! use tclite::*;
//!
//! fn cmd_greet(_: &mut Interp, argv: &[String]) -> TclResult {
//!     check_args(1, argv, 2, 2, "name")?;
//!     tcl_ok!("Hello, {}!", argv[1])
//! }
//!
//! let mut interp = Interp::new();
//! assert!(interp.register_builtin("greet", cmd_greet));
//! assert!(!interp.register_builtin("greet", cmd_greet));
//! assert_eq!(interp.evaluate("greet World"), "Hello, World!");
//! ```
//!
//! A command reports failure by returning `Err`, or by calling
//! [`Interp::set_error`](struct.Interp.html#method.set_error); either way the script stops
//! as soon as the command returns.
//!
//! # Accessing Variables
//!
//! Variables are untyped strings.  [`Interp::var`](struct.Interp.html#method.var) and
//! [`Interp::set_var`](struct.Interp.html#method.set_var) read and write them in the
//! current scope.  While a procedure runs, its parameters shadow any variables of the same
//! name; the shadowed values are restored when the procedure returns, however it returns.
//! All other assignments are global.
//!
//! # Checking Scripts for Completeness
//!
//! [`Interp::complete`](struct.Interp.html#method.complete) checks whether a script
//! contains unterminated brackets, braces, or quotes.  A REPL uses this to decide whether
//! to ask for another line of input.
//!
//! [`TclResult`]: ../types/type.TclResult.html
//! [`Exception`]: ../types/struct.Exception.html
//! [`CommandFunc`]: ../types/type.CommandFunc.html
//! [`Interp`]: struct.Interp.html

use crate::commands;
use crate::registry::Builtin;
use crate::registry::Command;
use crate::registry::Procedure;
use crate::registry::Registry;
use crate::scope::ScopeStack;
use crate::stack::ensure_sufficient_stack;
use crate::subst;
use crate::tcl_err;
use crate::tokenizer;
use crate::tokenizer::Token;
use crate::types::*;
use std::borrow::Cow;
use std::ops::Deref;
use std::ops::DerefMut;
use tracing::{debug, trace, warn};

/// The Tclite Interpreter.
///
/// The `Interp` struct owns all interpreter state: the command registry, the variable
/// scopes, the error signal, and the output sink.  The application creates an instance,
/// registers any application-specific commands, and then uses it to evaluate scripts.
/// See the [module level documentation](index.html) for an overview.
///
/// # Example
///
/// ```
/// use tclite::types::*;
/// use tclite::Interp;
/// # fn dummy() -> TclResult {
/// let mut interp = Interp::new();
/// let six = interp.eval("sum 1 2 3")?;
/// assert_eq!(six, "6");
/// # Ok(six)
/// # }
/// # dummy().unwrap();
/// ```
pub struct Interp {
    // Command Table
    registry: Registry,

    // Variable Table
    scopes: ScopeStack,

    // The error signal.  Set by commands via set_error(), and latched by evaluate().
    error: Option<Exception>,

    // Where `puts` output goes.
    output: Output,

    // Defines the recursion limit for nested evaluation.
    recursion_limit: usize,

    // Current number of eval levels.
    num_levels: usize,
}

/// The destination of command output, e.g., from `puts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Write to the process's standard output.
    Stdout,

    /// Accumulate output in memory.
    Capture(String),
}

impl Default for Output {
    fn default() -> Self {
        cfg_if::cfg_if! {
            if #[cfg(feature = "stdout")] {
                Output::Stdout
            } else {
                Output::Capture(String::new())
            }
        }
    }
}

impl Default for Interp {
    fn default() -> Self {
        Self::new()
    }
}

// NOTE: The order of methods in the generated RustDoc depends on the order in this block.
// Consequently, methods are ordered pedagogically.
impl Interp {
    //--------------------------------------------------------------------------------------------
    // Constructors

    /// Creates a new interpreter with no commands defined.  Use this when crafting
    /// command languages that shouldn't include the standard commands.
    ///
    /// # Example
    ///
    /// ```
    /// # use tclite::Interp;
    /// let interp = Interp::empty();
    /// assert!(interp.command_names().is_empty());
    /// ```
    pub fn empty() -> Self {
        Self {
            registry: Registry::default(),
            scopes: ScopeStack::default(),
            error: None,
            output: Output::default(),
            recursion_limit: 1000,
            num_levels: 0,
        }
    }

    /// Creates a new interpreter that is pre-populated with the standard commands.
    /// Use [`command_names`](#method.command_names) to retrieve the full list, and
    /// [`register_builtin`](#method.register_builtin) to extend the interpreter with new
    /// commands.
    ///
    /// ```
    /// # use tclite::Interp;
    /// let interp = Interp::new();
    /// assert!(interp.has_command("puts"));
    /// assert!(interp.has_command("proc"));
    /// ```
    pub fn new() -> Self {
        let mut interp = Interp::empty();

        let new_commands: &[(&'static str, CommandFunc)] = &[
            ("puts", commands::cmd_puts),
            ("version", commands::cmd_version),
            ("sum", commands::cmd_sum),
            ("lindex", commands::cmd_lindex),
            ("set", commands::cmd_set),
            ("proc", commands::cmd_proc),
        ];

        for &(name, func) in new_commands {
            interp.register_builtin(name, func);
        }

        interp
    }

    //--------------------------------------------------------------------------------------------
    // Script Evaluation

    /// Evaluates a script, returning the concatenated output of its commands, or the
    /// text of the first error.  This is the classic host entry point.
    ///
    /// Statements are executed in order.  If one fails, the rest of the script is skipped,
    /// and the error message is appended to the output of the statements that completed.
    /// The error is then latched: until [`clear_error`](#method.clear_error) is called,
    /// every call to `evaluate` immediately returns the latched message and executes
    /// nothing.
    ///
    /// # Example
    ///
    /// ```
    /// # use tclite::Interp;
    /// let mut interp = Interp::new();
    /// assert_eq!(interp.evaluate("set x 5\nset x"), "5");
    /// assert_eq!(interp.evaluate("sum 1 x"), "expected number but got \"x\"");
    /// assert!(interp.error().is_some());
    /// ```
    pub fn evaluate(&mut self, script: &str) -> String {
        if let Some(exception) = &self.error {
            return exception.message().to_string();
        }

        let mut output = String::new();

        match self.eval_into(script, &mut output) {
            Ok(()) => output,
            Err(exception) => {
                output.push_str(exception.message());
                self.set_error(exception);
                output
            }
        }
    }

    /// Evaluates a script, returning the concatenated output of its commands, or the
    /// [`Exception`](../types/struct.Exception.html) that stopped it.  Output of the
    /// statements that completed before the error is discarded.
    ///
    /// Errors are not latched.  If an error is already latched, it is returned and nothing
    /// is executed.
    ///
    /// # Example
    ///
    /// ```
    /// # use tclite::*;
    /// let mut interp = Interp::new();
    ///
    /// match interp.eval("sum 1 2 [bogus]") {
    ///     Ok(output) => println!("Output: {}", output),
    ///     Err(exception) => {
    ///         assert_eq!(exception.kind(), ErrorKind::UnknownCommand);
    ///         println!("Error: {}", exception);
    ///     }
    /// }
    /// ```
    pub fn eval(&mut self, script: &str) -> TclResult {
        if let Some(exception) = &self.error {
            return Err(exception.clone());
        }

        self.eval_script(script)
    }

    /// Evaluates a nested script: a command substitution or a procedure body.  Commands
    /// may also use this to evaluate script arguments.
    pub fn eval_script(&mut self, script: &str) -> TclResult {
        let mut output = String::new();
        self.eval_into(script, &mut output)?;
        Ok(output)
    }

    // Evaluates a script, appending the output of each statement to `output` as it
    // completes.  On error, `output` holds whatever the completed statements produced.
    fn eval_into(&mut self, script: &str, output: &mut String) -> Result<(), Exception> {
        // FIRST, check the number of nesting levels
        self.num_levels += 1;

        let result = if self.num_levels > self.recursion_limit {
            Err(Exception::new(
                ErrorKind::Limit,
                "too many nested calls to Interp::eval (infinite loop?)",
            ))
        } else {
            ensure_sufficient_stack(|| self.run_statements(script, output))
        };

        // NEXT, decrement the number of nesting levels.
        self.num_levels -= 1;

        result
    }

    // Executes the statements of a script one at a time.  Sibling statements are handled
    // by this loop; only nested scripts recurse.
    fn run_statements(&mut self, script: &str, output: &mut String) -> Result<(), Exception> {
        let mut rest = script;

        loop {
            rest = tokenizer::skip_preamble(rest);

            if rest.is_empty() {
                return Ok(());
            }

            let mut words: Vec<String> = Vec::new();

            loop {
                rest = tokenizer::skip_blanks(rest);

                if tokenizer::at_statement_end(rest) {
                    break;
                }

                let (token, remainder) = tokenizer::next_token(rest)?;
                words.push(self.resolve(token)?);
                rest = remainder;
            }

            if !words.is_empty() {
                output.push_str(&self.dispatch(&words)?);
            }
        }
    }

    // Converts a raw token into a word.
    fn resolve(&mut self, token: Token<'_>) -> TclResult {
        trace!(?token, "resolving token");

        match token {
            Token::Script(script) => self.eval_script(script),
            Token::Block(text) => Ok(text.to_string()),
            Token::Quoted(text) => self.subst_vars(&text),
            Token::Word(text) => self.subst_vars(text),
        }
    }

    /// Replaces the `$name` and `${name}` references in the text with the values of the
    /// named variables in the current scope.  Returns an error if a referenced variable
    /// doesn't exist.
    ///
    /// # Example
    ///
    /// ```
    /// # use tclite::Interp;
    /// let mut interp = Interp::new();
    /// interp.set_var("foo", "1");
    /// interp.set_var("foobar", "2");
    /// assert_eq!(interp.subst_vars("$foobar/$foo").unwrap(), "2/1");
    /// ```
    pub fn subst_vars(&self, text: &str) -> TclResult {
        subst::substitute(text, |name| self.scopes.get(name).map(String::from))
            .map(Cow::into_owned)
    }

    /// Determines whether or not the script is syntactically complete,
    /// e.g., has no unmatched quotes, brackets, or braces.
    ///
    /// REPLs use this to determine whether or not to ask for another line of
    /// input.
    ///
    /// # Example
    ///
    /// ```
    /// # use tclite::Interp;
    /// let interp = Interp::new();
    /// assert!(interp.complete("set a [sum 1 1]"));
    /// assert!(!interp.complete("set a [sum 1 1"));
    /// ```
    pub fn complete(&self, script: &str) -> bool {
        tokenizer::is_complete(script)
    }

    //--------------------------------------------------------------------------------------------
    // Command Dispatch

    // Executes one statement.  `words[0]` is the command name.
    fn dispatch(&mut self, words: &[String]) -> TclResult {
        let name = words[0].as_str();

        let cmd = self.registry.lookup(name).ok_or_else(|| {
            Exception::new(
                ErrorKind::UnknownCommand,
                format!("No such function:{}", name),
            )
        })?;

        trace!(command = name, argc = words.len() - 1, "dispatching");

        match cmd {
            Command::Builtin(builtin) => {
                let result = match &*builtin {
                    Builtin::Native(func) => func(self, words),
                    #[cfg(feature = "closure-commands")]
                    Builtin::Closure(func) => func(self, words),
                };

                // A command may signal an error instead of returning one.
                match (result, self.error.take()) {
                    (Err(exception), _) => Err(exception),
                    (Ok(_), Some(exception)) => Err(exception),
                    (Ok(value), None) => Ok(value),
                }
            }
            Command::Proc(proc) => self.call_proc(&proc, words),
        }
    }

    // Calls a procedure.  Extra arguments are ignored.
    fn call_proc(&mut self, proc: &Procedure, argv: &[String]) -> TclResult {
        let args = &argv[1..];

        if args.len() < proc.params.len() {
            return Err(wrong_num_args(proc));
        }

        debug!(proc = %proc.name, argc = args.len(), "entering procedure");

        let result = {
            let mut frame = CallFrame::enter(self, &proc.params, args);
            frame.eval_script(&proc.body)
        };

        debug!(proc = %proc.name, ok = result.is_ok(), "leaving procedure");
        result
    }

    //--------------------------------------------------------------------------------------------
    // The Error Signal

    /// Returns the error signal: the exception raised by a command, or latched by
    /// [`evaluate`](#method.evaluate), if any.
    pub fn error(&self) -> Option<&Exception> {
        self.error.as_ref()
    }

    /// Sets the error signal, replacing any previous error.
    ///
    /// A command calls this to fail without returning `Err`; the statement stops as soon
    /// as the command returns.  Set from the host, it blocks all evaluation until
    /// [`clear_error`](#method.clear_error) is called.
    ///
    /// # Example
    ///
    /// ```
    /// use tclite::*;
    ///
    /// fn cmd_fail(interp: &mut Interp, _: &[String]) -> TclResult {
    ///     interp.set_error(Exception::tcl_err("it failed"));
    ///     tcl_ok!()
    /// }
    ///
    /// let mut interp = Interp::new();
    /// interp.register_builtin("fail", cmd_fail);
    /// assert_eq!(interp.evaluate("sum 1 1\nfail\nsum 2 2"), "2it failed");
    /// ```
    pub fn set_error(&mut self, exception: Exception) {
        debug!(kind = ?exception.kind(), error = %exception, "error signal set");
        self.error = Some(exception);
    }

    /// Clears the error signal.  Hosts call this before each independent script
    /// submission.
    pub fn clear_error(&mut self) {
        if self.error.take().is_some() {
            debug!("error signal cleared");
        }
    }

    //--------------------------------------------------------------------------------------------
    // Variable Handling

    /// Retrieves the value of the named variable in the current scope.
    ///
    /// Returns an `UnknownVariable` error if the variable doesn't exist.
    ///
    /// # Example
    ///
    /// ```
    /// use tclite::types::*;
    /// use tclite::Interp;
    /// # fn dummy() -> TclResult {
    /// let mut interp = Interp::new();
    ///
    /// interp.eval("set a 1")?;
    /// assert_eq!(interp.var("a")?, "1");
    /// # Ok(String::new())
    /// # }
    /// # dummy().unwrap();
    /// ```
    pub fn var(&self, name: &str) -> TclResult {
        self.scopes.get(name).map(String::from).ok_or_else(|| {
            Exception::new(
                ErrorKind::UnknownVariable,
                format!("can't read \"{}\": no such variable", name),
            )
        })
    }

    /// Returns true if the named variable is visible in the current scope.
    pub fn var_exists(&self, name: &str) -> bool {
        self.scopes.exists(name)
    }

    /// Sets the value of the named variable.  If the name is bound in the current scope
    /// (e.g., it is a parameter of the running procedure) that binding is updated;
    /// otherwise the variable is created or updated globally.
    pub fn set_var(&mut self, name: &str, value: impl Into<String>) {
        self.scopes.set(name, value.into());
    }

    /// Gets a list of the names of the variables that are visible in the current scope.
    pub fn vars_in_scope(&self) -> Vec<String> {
        self.scopes.vars_in_scope()
    }

    /// Returns the current scope level.  The global scope is level `0`; each active
    /// procedure call adds a level.
    pub fn scope_level(&self) -> usize {
        self.scopes.current()
    }

    //--------------------------------------------------------------------------------------------
    // Command Definition and Handling

    /// Adds a builtin command to the interpreter under exactly the given name.  This is the
    /// normal way to add commands.
    ///
    /// Returns false, leaving the interpreter unchanged, if a builtin of that name already
    /// exists.  A builtin hides any procedure of the same name.
    pub fn register_builtin(&mut self, name: &str, func: CommandFunc) -> bool {
        self.add_builtin(name, Builtin::Native(func))
    }

    /// Adds a builtin command implemented as a closure.  The rules are as for
    /// [`register_builtin`](#method.register_builtin).
    ///
    /// # Example
    ///
    /// ```
    /// # use tclite::*;
    /// let mut interp = Interp::new();
    /// let greeting = String::from("Howdy");
    /// interp.register_closure("greet", move |_, _| tcl_ok!("{}!", greeting));
    /// assert_eq!(interp.evaluate("greet"), "Howdy!");
    /// ```
    #[cfg(feature = "closure-commands")]
    pub fn register_closure(
        &mut self,
        name: &str,
        func: impl Fn(&mut Self, &[String]) -> TclResult + 'static,
    ) -> bool {
        self.add_builtin(name, Builtin::Closure(std::rc::Rc::new(func)))
    }

    fn add_builtin(&mut self, name: &str, builtin: Builtin) -> bool {
        let added = self.registry.add_builtin(name, builtin);

        if !added {
            warn!(command = name, "builtin already registered");
        }

        added
    }

    /// Defines a procedure, replacing any existing procedure of the same name.  `params`
    /// lists the parameter names, separated by commas and/or whitespace; `body` is the
    /// script text, which is evaluated afresh on each call.
    ///
    /// # Example
    ///
    /// ```
    /// # use tclite::Interp;
    /// let mut interp = Interp::new();
    /// interp.define_proc("add", "a, b", "sum $a $b");
    /// assert_eq!(interp.evaluate("add 2 3"), "5");
    /// ```
    pub fn define_proc(&mut self, name: &str, params: &str, body: &str) {
        debug!(proc = name, params, "defining procedure");
        self.registry.add_proc(Procedure::new(name, params, body));
    }

    /// Determines whether or not the interpreter contains a command with the given
    /// name.
    pub fn has_command(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    /// Gets a vector of the names of the existing commands.
    ///
    /// # Example
    ///
    /// ```
    /// use tclite::Interp;
    ///
    /// let interp = Interp::new();
    ///
    /// for name in interp.command_names() {
    ///     println!("Found command: {}", name);
    /// }
    /// ```
    pub fn command_names(&self) -> Vec<String> {
        self.registry.names()
    }

    /// Returns the type of the named command, `native`, `closure`, or `proc`, or an error
    /// if there's no such command.
    pub fn command_type(&self, command: &str) -> TclResult {
        match self.registry.lookup(command) {
            Some(cmd) => Ok(cmd.cmdtype().to_string()),
            None => tcl_err!("\"{}\" isn't a command", command),
        }
    }

    /// Gets a vector of the names of the existing procedures.
    pub fn proc_names(&self) -> Vec<String> {
        self.registry.proc_names()
    }

    /// Returns the body of the named procedure, or an error if the name doesn't
    /// name a procedure.
    pub fn proc_body(&self, procname: &str) -> TclResult {
        match self.registry.proc(procname) {
            Some(proc) => Ok(proc.body.clone()),
            None => tcl_err!("\"{}\" isn't a procedure", procname),
        }
    }

    /// Returns the parameter names of the named procedure, or an error if the name
    /// doesn't name a procedure.
    pub fn proc_args(&self, procname: &str) -> Result<Vec<String>, Exception> {
        match self.registry.proc(procname) {
            Some(proc) => Ok(proc.params.clone()),
            None => tcl_err!("\"{}\" isn't a procedure", procname),
        }
    }

    //--------------------------------------------------------------------------------------------
    // Output

    /// Writes text to the interpreter's output sink.  Commands that print, like `puts`,
    /// use this rather than writing to standard output directly.
    pub fn write_output(&mut self, text: &str) {
        match &mut self.output {
            Output::Stdout => print!("{}", text),
            Output::Capture(buffer) => buffer.push_str(text),
        }
    }

    /// Sets the output sink, returning the previous one.
    pub fn set_output(&mut self, output: Output) -> Output {
        std::mem::replace(&mut self.output, output)
    }

    /// Starts capturing output in memory; retrieve it with
    /// [`take_output`](#method.take_output).
    pub fn capture_output(&mut self) {
        if self.output == Output::Stdout {
            self.output = Output::Capture(String::new());
        }
    }

    /// Returns and clears the captured output.  Returns the empty string if output isn't
    /// being captured.
    pub fn take_output(&mut self) -> String {
        match &mut self.output {
            Output::Stdout => String::new(),
            Output::Capture(buffer) => std::mem::take(buffer),
        }
    }

    //--------------------------------------------------------------------------------------------
    // Interpreter Configuration

    /// Gets the interpreter's recursion limit: how deep the stack of script evaluations may be.
    ///
    /// A level is added by each nested evaluation: each command substitution and each
    /// procedure call.  Nested evaluations grow the native stack as needed, so reaching
    /// the limit raises a `Limit` error even on a thread with a small stack.
    ///
    /// # Example
    /// ```
    /// # use tclite::Interp;
    /// let interp = Interp::new();
    /// assert_eq!(interp.recursion_limit(), 1000);
    /// ```
    pub fn recursion_limit(&self) -> usize {
        self.recursion_limit
    }

    /// Sets the interpreter's recursion limit.  The default is 1000.
    pub fn set_recursion_limit(&mut self, limit: usize) {
        self.recursion_limit = limit;
    }
}

// Outputs the wrong # args message for the proc.
fn wrong_num_args(proc: &Procedure) -> Exception {
    let mut msg = String::new();
    msg.push_str("wrong # args: should be \"");
    msg.push_str(&proc.name);

    for param in &proc.params {
        msg.push(' ');
        msg.push_str(param);
    }
    msg.push('"');

    Exception::arity(msg)
}

/// The variable frame of a running procedure.
///
/// Creating a `CallFrame` pushes a scope and binds the parameters; dropping it unbinds
/// them in reverse order and pops the scope, on every exit path.  It derefs to the
/// interpreter, so the body is evaluated through the frame.
struct CallFrame<'a> {
    interp: &'a mut Interp,
    params: &'a [String],
}

impl<'a> CallFrame<'a> {
    fn enter(interp: &'a mut Interp, params: &'a [String], args: &[String]) -> Self {
        interp.scopes.push();

        for (name, value) in params.iter().zip(args) {
            interp.scopes.enter(name, value.clone());
        }

        Self { interp, params }
    }
}

impl Drop for CallFrame<'_> {
    fn drop(&mut self) {
        for name in self.params.iter().rev() {
            self.interp.scopes.exit(name);
        }

        self.interp.scopes.pop();
    }
}

impl Deref for CallFrame<'_> {
    type Target = Interp;

    fn deref(&self) -> &Interp {
        self.interp
    }
}

impl DerefMut for CallFrame<'_> {
    fn deref_mut(&mut self) -> &mut Interp {
        self.interp
    }
}
