use proptest::prelude::*;
use tclite::tokenizer;
use tclite::{ErrorKind, Interp, TclResult};

fn interp() -> Interp {
    let mut interp = Interp::new();
    interp.capture_output();
    interp
}

#[test]
fn test_set_then_puts() {
    let mut interp = interp();
    let result = interp.evaluate("set x 5\nputs $x");
    assert_eq!(result, "");
    assert!(interp.take_output().contains('5'));
}

#[test]
fn test_puts_command_substitution() {
    let mut interp = interp();
    interp.evaluate("puts [sum 1 2 3]");
    assert_eq!(interp.take_output(), "6\n");
}

#[test]
fn test_literal_block_is_not_substituted() {
    let mut interp = interp();
    interp.evaluate("set x 5\nset y {$x}");
    assert_eq!(interp.var("y").unwrap(), "$x");
}

#[test]
fn test_unbalanced_delimiters_are_parse_errors() {
    for script in ["set x [", "set y {", "set z \"abc", "puts [sum 1 [sum 2]"] {
        let mut interp = interp();
        let err = interp.eval(script).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse, "{}", script);
    }
}

#[test]
fn test_unknown_command() {
    let mut interp = interp();
    assert_eq!(interp.evaluate("bogus 1 2"), "No such function:bogus");
    assert_eq!(interp.take_output(), "");
    assert_eq!(
        interp.error().map(|e| e.kind()),
        Some(ErrorKind::UnknownCommand)
    );
}

#[test]
fn test_procedure_arity_does_not_run_body() {
    let mut interp = interp();
    interp.evaluate("proc two {a b} {puts ran}");
    let err = interp.eval("two 1").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Arity);
    assert!(err.message().contains("two"));
    assert_eq!(interp.take_output(), "");
}

#[test]
fn test_host_builtins_are_called_from_procedures() {
    fn cmd_rest(_: &mut Interp, argv: &[String]) -> TclResult {
        tclite::check_args(1, argv, 2, 2, "list")?;
        Ok(argv[1].split_whitespace().skip(1).collect::<Vec<_>>().join(" "))
    }

    let mut interp = interp();
    assert!(interp.register_builtin("rest", cmd_rest));

    interp.evaluate("proc second {list} {lindex [rest $list] 0}");
    assert_eq!(interp.evaluate("second {a b c}"), "b");
    assert!(!interp.var_exists("list"));
}

#[test]
fn test_nested_procedures_restore_each_level() {
    let mut interp = interp();
    interp.set_var("n", "top");
    interp.evaluate("proc inner {n} {puts $n}");
    interp.evaluate("proc outer {n} {inner [sum $n 1]\nputs $n}");

    assert_eq!(interp.evaluate("outer 1"), "");
    assert_eq!(interp.take_output(), "2\n1\n");
    assert_eq!(interp.var("n").unwrap(), "top");
}

#[test]
fn test_multiline_script_with_comments() {
    let mut interp = interp();
    let script = r#"
        # Define a helper.
        proc greet {who, greeting} {
            puts "$greeting, $who!"
        }

        # Use it.
        set name World
        greet $name Hello   # trailing comment
        version
    "#;

    let result = interp.evaluate(script);
    assert!(result.starts_with("tclite "), "{}", result);
    assert_eq!(interp.take_output(), "Hello, World!\n");
}

#[test]
fn test_statements_after_error_are_skipped() {
    let mut interp = interp();
    let result = interp.evaluate("puts one\nsum 2\nsum x\nputs never");
    assert_eq!(result, "2expected number but got \"x\"");
    assert_eq!(interp.take_output(), "one\n");
}

fn run(interp: &mut Interp, script: &str) -> TclResult {
    let result = interp.eval(script);
    interp.clear_error();
    result
}

proptest! {
    #[test]
    fn test_blank_and_comment_scripts_are_empty(
        lines in prop::collection::vec(
            prop_oneof![
                "[ \t]*",
                "[ \t]*#[^\n\r]*",
            ],
            0..8,
        )
    ) {
        let script = lines.join("\n");
        let mut interp = interp();
        prop_assert_eq!(interp.evaluate(&script), "");
        prop_assert!(interp.error().is_none());
    }

    #[test]
    fn test_evaluation_never_panics(script in "\\PC{0,64}") {
        let mut interp = interp();
        interp.set_recursion_limit(50);
        let _ = run(&mut interp, &script);
        prop_assert_eq!(interp.scope_level(), 0);
        let _ = tokenizer::is_complete(&script);
    }

    #[test]
    fn test_set_and_read_are_idempotent(
        name in "[a-z][a-z0-9_]{0,8}",
        value in "[a-zA-Z0-9]{1,12}",
    ) {
        let script = format!("set {} {}\nset {}\nputs ${}", name, value, name, name);

        let mut first = interp();
        let out1 = first.evaluate(&script);
        let printed1 = first.take_output();

        let out2 = first.evaluate(&script);
        let printed2 = first.take_output();

        prop_assert_eq!(&out1, &value);
        prop_assert_eq!(out1, out2);
        prop_assert_eq!(printed1, printed2);
    }
}
