//! Variable Scope Stack
//!
//! Tclite variables live in a stack of frames.  Frame 0 is the global frame; it always
//! exists and holds every variable created by assignment.  Each procedure call pushes a
//! frame that holds only the procedure's parameter bindings, which shadow any variable of
//! the same name in outer frames.  Lookup walks from the innermost frame outward, so a
//! procedure body sees its parameters first and everything else after.
//!
//! Assignment updates the innermost binding of the name if there is one, and otherwise
//! creates the variable in the global frame.  Consequently only parameter names are
//! protected by a call: popping the call's frame restores them exactly, while any other
//! variable the body assigned keeps its new value.
//!
//! Within a frame, binding a name that is already bound saves the old value, and
//! exiting the name restores it; this keeps duplicate parameter names well behaved.
//!
//! Client code normally goes through the `Interp`, which pairs every push with a pop
//! using a guard.

use crate::types::TclHasher;
use indexmap::IndexMap;

#[derive(Default)]
struct Frame {
    vars: IndexMap<String, String, TclHasher>,

    // Bindings shadowed within this frame, most recent last.
    shadowed: Vec<(String, String)>,
}

/// The stack of variable frames, innermost last.
pub(crate) struct ScopeStack {
    stack: Vec<Frame>,
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeStack {
    /// Creates a scope stack containing only the global frame.
    pub fn new() -> Self {
        Self {
            stack: vec![Frame::default()],
        }
    }

    /// The current scope level; the global frame is level 0.
    pub fn current(&self) -> usize {
        self.stack.len() - 1
    }

    /// Pushes an empty frame.
    pub fn push(&mut self) {
        self.stack.push(Frame::default());
    }

    /// Pops the innermost frame, discarding any bindings left in it.  The global frame is
    /// never popped.
    pub fn pop(&mut self) {
        assert!(self.current() > 0, "tried to pop the global scope");
        self.stack.pop();
    }

    /// Binds `name` to `value` in the innermost frame, saving any binding `name` already
    /// has there.
    pub fn enter(&mut self, name: &str, value: String) {
        let frame = self.innermost_mut();

        if let Some(old) = frame.vars.insert(name.to_string(), value) {
            frame.shadowed.push((name.to_string(), old));
        }
    }

    /// Removes the innermost frame's binding of `name`, restoring the binding `enter`
    /// shadowed, if any.  Outer frames are untouched, so their binding of `name` (if any)
    /// becomes visible again.
    pub fn exit(&mut self, name: &str) {
        let frame = self.innermost_mut();
        frame.vars.shift_remove(name);

        if let Some(pos) = frame.shadowed.iter().rposition(|(n, _)| n == name) {
            let (name, old) = frame.shadowed.remove(pos);
            frame.vars.insert(name, old);
        }
    }

    /// Retrieves the value of the named variable, searching from the innermost frame
    /// outward.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.stack
            .iter()
            .rev()
            .find_map(|frame| frame.vars.get(name))
            .map(String::as_str)
    }

    /// Determines whether the named variable is visible.
    pub fn exists(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Assigns the variable: the innermost existing binding is updated; if there is none,
    /// the variable is created in the global frame.
    pub fn set(&mut self, name: &str, value: String) {
        let level = self
            .stack
            .iter()
            .rposition(|frame| frame.vars.contains_key(name))
            .unwrap_or(0);

        self.stack[level].vars.insert(name.to_string(), value);
    }

    /// Gets the names of all visible variables, innermost bindings first, without
    /// duplicates.
    pub fn vars_in_scope(&self) -> Vec<String> {
        let mut names: IndexMap<&str, (), TclHasher> = IndexMap::default();

        for frame in self.stack.iter().rev() {
            for name in frame.vars.keys() {
                names.insert(name.as_str(), ());
            }
        }

        names.keys().map(|name| name.to_string()).collect()
    }

    fn innermost_mut(&mut self) -> &mut Frame {
        let top = self.stack.len() - 1;
        &mut self.stack[top]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic() {
        let mut ss = ScopeStack::new();
        assert_eq!(ss.current(), 0);
        assert_eq!(ss.get("a"), None);

        ss.set("a", "1".into());
        assert_eq!(ss.get("a"), Some("1"));
        assert!(ss.exists("a"));

        ss.set("a", "2".into());
        assert_eq!(ss.get("a"), Some("2"));
    }

    #[test]
    fn test_shadowing() {
        let mut ss = ScopeStack::new();
        ss.set("n", "V".into());

        ss.push();
        assert_eq!(ss.current(), 1);
        ss.enter("n", "inner".into());
        assert_eq!(ss.get("n"), Some("inner"));

        // Assigning a parameter updates the parameter binding only.
        ss.set("n", "changed".into());
        assert_eq!(ss.get("n"), Some("changed"));

        ss.exit("n");
        ss.pop();
        assert_eq!(ss.current(), 0);
        assert_eq!(ss.get("n"), Some("V"));
    }

    #[test]
    fn test_param_without_outer_binding() {
        let mut ss = ScopeStack::new();
        ss.push();
        ss.enter("p", "1".into());
        assert!(ss.exists("p"));
        ss.exit("p");
        ss.pop();
        assert!(!ss.exists("p"));
    }

    #[test]
    fn test_outer_variables_visible_and_assignable() {
        let mut ss = ScopeStack::new();
        ss.set("g", "1".into());

        ss.push();
        ss.enter("p", "x".into());
        assert_eq!(ss.get("g"), Some("1"));

        // Assignments to non-parameters outlive the frame.
        ss.set("g", "2".into());
        ss.set("fresh", "3".into());
        ss.exit("p");
        ss.pop();

        assert_eq!(ss.get("g"), Some("2"));
        assert_eq!(ss.get("fresh"), Some("3"));
    }

    #[test]
    fn test_duplicate_names_in_frame() {
        let mut ss = ScopeStack::new();
        ss.push();
        ss.enter("a", "1".into());
        ss.enter("a", "2".into());
        assert_eq!(ss.get("a"), Some("2"));

        ss.exit("a");
        assert_eq!(ss.get("a"), Some("1"));
        ss.exit("a");
        assert_eq!(ss.get("a"), None);
        ss.pop();
    }

    #[test]
    fn test_nested_frames() {
        let mut ss = ScopeStack::new();
        ss.set("n", "0".into());

        ss.push();
        ss.enter("n", "1".into());
        ss.push();
        ss.enter("n", "2".into());
        assert_eq!(ss.get("n"), Some("2"));
        assert_eq!(ss.vars_in_scope(), vec!["n".to_string()]);

        ss.exit("n");
        ss.pop();
        assert_eq!(ss.get("n"), Some("1"));
        ss.exit("n");
        ss.pop();
        assert_eq!(ss.get("n"), Some("0"));
    }

    #[test]
    #[should_panic]
    fn test_pop_global() {
        let mut ss = ScopeStack::new();
        ss.pop();
    }
}
