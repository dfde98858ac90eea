use std::process::{Command, Output};

fn hansen(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hansen")).args(args)
                                              .output()
                                              .unwrap_or_else(|e| panic!("Failed to start hansen: {e}"))
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn tokens_are_listed_without_checking_the_program() {
    let output = hansen(&["--emit", "tokens", "begin print undeclared end"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output),
               "1:1\t'begin'\n1:7\t'print'\n1:13\tidentifier 'undeclared'\n1:24\t'end'\n");
}

#[test]
fn tokens_mode_still_reports_lexical_errors() {
    let output = hansen(&["--emit", "tokens", "begin x := 5 % 2 end"]);

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn every_other_mode_compiles_first() {
    let source = "begin print undeclared end";

    for mode in ["run", "ast", "check", "asm"] {
        let output = hansen(&["--emit", mode, source]);
        assert_eq!(output.status.code(), Some(4), "--emit {mode}");
        assert!(stdout(&output).is_empty(), "--emit {mode}");
    }
}

#[test]
fn modes_produce_their_output() {
    assert_eq!(stdout(&hansen(&["begin print 6 * 7 end"])), "42");
    assert_eq!(stdout(&hansen(&["--emit", "check", "begin variable x end"])),
               "ok: 1 variables declared\n");
    assert!(stdout(&hansen(&["--emit", "ast", "begin variable x end"])).contains("VariableDeclaration"));
    assert!(stdout(&hansen(&["--emit", "asm", "begin print 1 end"])).contains("\nmain:\n"));
}

#[test]
fn output_before_a_runtime_error_is_kept() {
    let output = hansen(&[r#"begin print "before"; print 1 / 0 end"#]);

    assert_eq!(output.status.code(), Some(5));
    assert_eq!(stdout(&output), "before");
    assert!(String::from_utf8_lossy(&output.stderr).contains("Division by zero."));
}
