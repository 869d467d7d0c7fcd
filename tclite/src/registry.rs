//! The Command Registry
//!
//! Commands come in two disjoint tables: builtins, registered by the host before (or
//! while) scripts run, and procedures, defined by scripts via `proc`.  A name is looked
//! up in the builtins first, so a procedure can never hide a builtin.
//!
//! Builtin registration never overwrites: registering a name that is already a builtin
//! is refused.  Defining a procedure with an existing procedure's name replaces it.

use crate::types::*;
use indexmap::IndexMap;
use std::rc::Rc;

/// A builtin command's implementation.
pub(crate) enum Builtin {
    /// A Rust function.
    Native(CommandFunc),

    /// A Rust closure.
    #[cfg(feature = "closure-commands")]
    Closure(CommandClosure),
}

/// A user-defined procedure: its parameter names and its unparsed body.
///
/// The name is stored for error messages; the registry key is the same string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Procedure {
    pub name: String,
    pub params: Vec<String>,
    pub body: String,
}

impl Procedure {
    /// Creates a procedure, parsing its parameter string.  Parameter names are separated
    /// by commas and/or whitespace; empty names are dropped.
    pub fn new(name: &str, params: &str, body: &str) -> Self {
        Self {
            name: name.to_string(),
            params: parse_params(params),
            body: body.to_string(),
        }
    }
}

/// Splits a parameter string into names.
pub(crate) fn parse_params(params: &str) -> Vec<String> {
    params
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

/// The result of looking up a command name.
#[derive(Clone)]
pub(crate) enum Command {
    Builtin(Rc<Builtin>),
    Proc(Rc<Procedure>),
}

impl Command {
    /// Returns a value naming the command type.
    pub fn cmdtype(&self) -> &'static str {
        match self {
            Command::Builtin(builtin) => match **builtin {
                Builtin::Native(_) => "native",
                #[cfg(feature = "closure-commands")]
                Builtin::Closure(_) => "closure",
            },
            Command::Proc(_) => "proc",
        }
    }
}

/// The two command tables.
#[derive(Default)]
pub(crate) struct Registry {
    builtins: IndexMap<String, Rc<Builtin>, TclHasher>,
    procs: IndexMap<String, Rc<Procedure>, TclHasher>,
}

impl Registry {
    /// Registers a builtin under exactly the given name.  Returns false, changing
    /// nothing, if a builtin of that name already exists.
    pub fn add_builtin(&mut self, name: &str, builtin: Builtin) -> bool {
        if self.builtins.contains_key(name) {
            return false;
        }

        self.builtins.insert(name.to_string(), Rc::new(builtin));
        true
    }

    /// Defines a procedure, replacing any procedure of the same name.
    pub fn add_proc(&mut self, proc: Procedure) {
        self.procs.insert(proc.name.clone(), Rc::new(proc));
    }

    /// Looks up a command; builtins take priority.
    pub fn lookup(&self, name: &str) -> Option<Command> {
        if let Some(builtin) = self.builtins.get(name) {
            Some(Command::Builtin(Rc::clone(builtin)))
        } else {
            self.procs
                .get(name)
                .map(|proc| Command::Proc(Rc::clone(proc)))
        }
    }

    /// Determines whether the name is a builtin or a procedure.
    pub fn contains(&self, name: &str) -> bool {
        self.builtins.contains_key(name) || self.procs.contains_key(name)
    }

    /// Gets the names of all commands: builtins in registration order, then procedures
    /// not hidden by a builtin.
    pub fn names(&self) -> Vec<String> {
        self.builtins
            .keys()
            .chain(self.procs.keys().filter(|name| !self.builtins.contains_key(*name)))
            .cloned()
            .collect()
    }

    /// Gets the names of all procedures in definition order.
    pub fn proc_names(&self) -> Vec<String> {
        self.procs.keys().cloned().collect()
    }

    /// Retrieves a procedure by name.
    pub fn proc(&self, name: &str) -> Option<&Procedure> {
        self.procs.get(name).map(|proc| &**proc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Interp;

    fn cmd_one(_: &mut Interp, _: &[String]) -> TclResult {
        Ok("one".into())
    }

    fn cmd_two(_: &mut Interp, _: &[String]) -> TclResult {
        Ok("two".into())
    }

    fn call(reg: &Registry, name: &str) -> String {
        let mut interp = Interp::empty();
        match reg.lookup(name) {
            Some(Command::Builtin(builtin)) => match &*builtin {
                Builtin::Native(func) => func(&mut interp, &[name.to_string()]).unwrap(),
                #[cfg(feature = "closure-commands")]
                Builtin::Closure(func) => func(&mut interp, &[name.to_string()]).unwrap(),
            },
            _ => panic!("not a builtin: {}", name),
        }
    }

    #[test]
    fn test_parse_params() {
        assert_eq!(parse_params("a b"), vec!["a", "b"]);
        assert_eq!(parse_params("a,b"), vec!["a", "b"]);
        assert_eq!(parse_params(" a, b ,c\n d "), vec!["a", "b", "c", "d"]);
        assert!(parse_params("").is_empty());
        assert!(parse_params(" , ").is_empty());
    }

    #[test]
    fn test_builtins_are_distinct() {
        let mut reg = Registry::default();
        assert!(reg.add_builtin("one", Builtin::Native(cmd_one)));
        assert!(reg.add_builtin("two", Builtin::Native(cmd_two)));

        assert_eq!(call(&reg, "one"), "one");
        assert_eq!(call(&reg, "two"), "two");
        assert_eq!(reg.names(), vec!["one", "two"]);
    }

    #[test]
    fn test_no_overwrite() {
        let mut reg = Registry::default();
        assert!(reg.add_builtin("one", Builtin::Native(cmd_one)));
        assert!(!reg.add_builtin("one", Builtin::Native(cmd_two)));
        assert_eq!(call(&reg, "one"), "one");
    }

    #[test]
    fn test_builtin_priority() {
        let mut reg = Registry::default();
        reg.add_proc(Procedure::new("one", "", "body"));
        assert!(matches!(reg.lookup("one"), Some(Command::Proc(_))));

        reg.add_builtin("one", Builtin::Native(cmd_one));
        assert!(matches!(reg.lookup("one"), Some(Command::Builtin(_))));
        assert_eq!(reg.names(), vec!["one"]);
        assert_eq!(reg.proc_names(), vec!["one"]);
    }

    #[test]
    fn test_procs() {
        let mut reg = Registry::default();
        assert!(reg.lookup("f").is_none());
        assert!(!reg.contains("f"));

        reg.add_proc(Procedure::new("f", "a, b", "puts $a"));
        assert!(reg.contains("f"));
        let proc = reg.proc("f").unwrap();
        assert_eq!(proc.params, vec!["a", "b"]);
        assert_eq!(proc.body, "puts $a");

        // Redefinition replaces.
        reg.add_proc(Procedure::new("f", "x", "puts $x"));
        assert_eq!(reg.proc("f").unwrap().params, vec!["x"]);
        assert_eq!(reg.proc_names(), vec!["f"]);
        assert_eq!(reg.lookup("f").unwrap().cmdtype(), "proc");
    }
}
