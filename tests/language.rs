use std::fs::{self};

use hansen::{get_result, run};
use walkdir::WalkDir;

#[test]
fn good_programs_produce_expected_output() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/programs/good").into_iter()
                                           .filter_map(Result::ok)
                                           .filter(|e| e.path().extension().is_some_and(|ext| ext == "hl"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected_path = path.with_extension("out");
        let expected = fs::read_to_string(&expected_path).unwrap_or_else(|e| {
                                                              panic!("Failed to read {expected_path:?}: {e}")
                                                          });

        count += 1;
        match get_result(&source) {
            Ok(output) => assert_eq!(output, expected, "wrong output for {path:?}"),
            Err(e) => panic!("Program {path:?} failed:\n{source}\nError: {e}"),
        }
    }

    assert!(count > 0, "No programs found in tests/programs/good");
}

#[test]
fn bad_programs_fail_in_the_named_stage() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/programs/bad").into_iter()
                                          .filter_map(Result::ok)
                                          .filter(|e| e.path().extension().is_some_and(|ext| ext == "hl"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let stage = path.file_stem()
                        .and_then(|stem| stem.to_str())
                        .and_then(|stem| stem.split('_').next())
                        .unwrap_or_else(|| panic!("Bad program {path:?} has no stage prefix"));

        count += 1;
        match get_result(&source) {
            Ok(output) => panic!("Program {path:?} succeeded with output {output:?}"),
            Err(e) => assert_eq!(e.stage(), stage, "{path:?} failed with: {e}"),
        }
    }

    assert!(count > 0, "No programs found in tests/programs/bad");
}

fn assert_output(src: &str, expected: &str) {
    match get_result(src) {
        Ok(output) => assert_eq!(output, expected),
        Err(e) => panic!("Script failed: {e}"),
    }
}

fn assert_failure(src: &str, stage: &str) {
    match get_result(src) {
        Ok(_) => panic!("Script succeeded but was expected to fail"),
        Err(e) => assert_eq!(e.stage(), stage, "unexpected error: {e}"),
    }
}

#[test]
fn print_has_no_implicit_newline() {
    assert_output(r#"begin print 1; print "a"; print 2 end"#, "1a2");
}

#[test]
fn negative_values_print_with_sign() {
    assert_output("begin print 0 - 15 end", "-15");
}

#[test]
fn string_escape_is_only_newline() {
    assert_output(r#"begin print "a\nb\tc" end"#, "a\nb\\tc");
}

#[test]
fn comments_do_not_nest() {
    assert_output("begin { outer { inner } print 1 end", "1");
    assert_failure("begin { outer { inner } still comment } print 1 end", "lex");
}

#[test]
fn comments_after_the_program_are_allowed() {
    assert_output("begin print 1 end { trailing remark }", "1");
}

#[test]
fn keywords_are_case_sensitive() {
    assert_failure("BEGIN print 1 END", "syntax");
    assert_output("begin variable Begin; Begin := 3; print Begin end", "3");
}

#[test]
fn empty_program_is_rejected() {
    assert_failure("", "syntax");
    assert_failure("begin end", "syntax");
}

#[test]
fn undeclared_variable_stops_before_any_output() {
    let mut output = Vec::new();
    let err = run(r#"begin print "x"; po := 1 end"#, &mut output).unwrap_err();

    assert_eq!(err.stage(), "semantic");
    assert!(output.is_empty());
}

#[test]
fn runtime_error_keeps_earlier_output() {
    let mut output = Vec::new();
    let err = run(r#"begin variable z; print "before"; print 1 / z end"#, &mut output).unwrap_err();

    assert_eq!(err.stage(), "runtime");
    assert_eq!(err.exit_code(), 5);
    assert_eq!(output, b"before");
}

#[test]
fn runs_are_independent() {
    let source = "begin variable n; n := n + 1; print n end";
    assert_output(source, "1");
    assert_output(source, "1");
}
