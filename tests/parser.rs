use hansen::{
    ast::{ArithmeticOperator, Expr, Position, PrintArgument, Program, RelationalOperator, Statement},
    error::SyntaxError,
    interpreter::{lexer::tokenize, parser::parse},
};

fn parse_source(source: &str) -> Result<Program, SyntaxError> {
    let tokens = tokenize(source).unwrap();
    parse(&tokens)
}

fn first_statement(source: &str) -> Statement {
    parse_source(source).unwrap().body.statements.remove(0)
}

/// Renders an expression with full parentheses, to check its shape.
fn shape(expr: &Expr) -> String {
    match expr {
        Expr::Integer { value, .. } => value.to_string(),
        Expr::Variable { name, .. } => name.clone(),
        Expr::BinaryOp { left, op, right, .. } => {
            format!("({} {} {})", shape(left), op.symbol(), shape(right))
        },
    }
}

fn assigned_shape(source: &str) -> String {
    match first_statement(source) {
        Statement::Assignment { value, .. } => shape(&value),
        other => panic!("expected an assignment, got {other:?}"),
    }
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    assert_eq!(assigned_shape("begin x := 1 + 2 * 3 end"), "(1 + (2 * 3))");
    assert_eq!(assigned_shape("begin x := (1 + 2) * 3 end"), "((1 + 2) * 3)");
}

#[test]
fn operators_are_left_associative() {
    assert_eq!(assigned_shape("begin x := 8 - 3 - 2 end"), "((8 - 3) - 2)");
    assert_eq!(assigned_shape("begin x := 100 / 10 / 5 end"), "((100 / 10) / 5)");
    assert_eq!(assigned_shape("begin x := a * b / c + d - e end"), "((((a * b) / c) + d) - e)");
}

#[test]
fn dangling_else_binds_to_nearest_if() {
    let statement = first_statement("begin if a < b then if c < d then x := 1 else x := 2 end");

    let Statement::If { then_branch,
                        else_branch: outer_else,
                        .. } = statement
    else {
        panic!("expected an if statement");
    };
    assert!(outer_else.is_none());
    assert!(matches!(*then_branch, Statement::If { else_branch: Some(_), .. }));
}

#[test]
fn condition_holds_one_relational_operator() {
    let Statement::While { condition, .. } = first_statement("begin while i <= n + 1 do i := i + 1 end")
    else {
        panic!("expected a while loop");
    };

    assert_eq!(condition.op, RelationalOperator::LessEqual);
    assert_eq!(shape(&condition.right), "(n + 1)");
}

#[test]
fn print_takes_string_or_expression() {
    let program = parse_source(r#"begin print "hi"; print 1 + x end"#).unwrap();

    assert!(matches!(&program.body.statements[0],
                     Statement::Print { argument: PrintArgument::Text(text), .. } if text == "hi"));
    assert!(matches!(&program.body.statements[1],
                     Statement::Print { argument: PrintArgument::Expr(Expr::BinaryOp { .. }), .. }));
}

#[test]
fn nested_blocks_keep_their_statements() {
    let program = parse_source("begin variable a; begin a := 1; begin a := 2 end end end").unwrap();

    assert_eq!(program.body.statements.len(), 2);
    assert_eq!(program.statement_count(), 5);
}

#[test]
fn statements_record_positions() {
    let statement = first_statement("begin\n  variable total\nend");

    assert_eq!(statement,
               Statement::VariableDeclaration { name:     "total".into(),
                                                position: Position::new(2, 12), });
}

#[test]
fn trailing_semicolon_is_an_error() {
    let err = parse_source("begin x := 1; end").unwrap_err();

    assert_eq!(err.position(), Some(Position::new(1, 15)));
    assert!(err.expected().contains(&"'print'"));
    assert!(err.to_string().starts_with("Error on line 1, column 15: Expected 'variable', identifier"));
}

#[test]
fn missing_semicolon_names_every_continuation() {
    let err = parse_source("begin x := 1 y := 2 end").unwrap_err();

    assert_eq!(err.to_string(),
               "Error on line 1, column 14: Expected '+', '-', '*', '/', ';' or 'end', found identifier 'y'.");
}

#[test]
fn operand_after_expression_statement_lists_operators() {
    let err = parse_source("begin x := 1 2 end").unwrap_err();

    assert_eq!(err,
               SyntaxError::UnexpectedToken { expected: &["'+'", "'-'", "'*'", "'/'", "';'", "'end'"],
                                              found:    "integer literal 2".into(),
                                              position: Position::new(1, 14), });
}

#[test]
fn statement_without_trailing_expression_lists_only_separators() {
    let err = parse_source("begin variable x y end").unwrap_err();
    assert_eq!(err.expected(), &["';'", "'end'"]);

    let err = parse_source("begin while a < b do begin x := 1 end y end").unwrap_err();
    assert_eq!(err.expected(), &["';'", "'end'"]);

    let err = parse_source(r#"begin if a < b then x := 1 else print "s" y end"#).unwrap_err();
    assert_eq!(err.expected(), &["';'", "'end'"]);
}

#[test]
fn open_if_also_accepts_else() {
    let err = parse_source(r#"begin if a < b then print "s" y end"#).unwrap_err();
    assert_eq!(err.expected(), &["'else'", "';'", "'end'"]);

    let err = parse_source("begin while a < b do if a = 1 then x := 1 y end").unwrap_err();
    assert_eq!(err.expected(), &["'+'", "'-'", "'*'", "'/'", "'else'", "';'", "'end'"]);
}

#[test]
fn unclosed_parenthesis_lists_operators() {
    let err = parse_source("begin x := (1 2) end").unwrap_err();

    assert_eq!(err.expected(), &["'+'", "'-'", "'*'", "'/'", "')'"]);
}

#[test]
fn tokens_after_final_end_are_an_error() {
    let err = parse_source("begin x := 1 end end").unwrap_err();

    assert_eq!(err,
               SyntaxError::UnexpectedToken { expected: &["end of input"],
                                              found:    "'end'".into(),
                                              position: Position::new(1, 18), });
}

#[test]
fn missing_end_is_reported_at_end_of_input() {
    let err = parse_source("begin x := 1").unwrap_err();

    assert_eq!(err.position(), None);
    assert_eq!(err.to_string(), "Error at end of input: Expected '+', '-', '*', '/', ';' or 'end'.");

    let err = parse_source("begin variable x").unwrap_err();
    assert_eq!(err.to_string(), "Error at end of input: Expected ';' or 'end'.");
}

#[test]
fn missing_then_and_do() {
    let err = parse_source("begin if x = 1 x := 2 end").unwrap_err();
    assert_eq!(err.expected(), &["'+'", "'-'", "'*'", "'/'", "'then'"]);

    let err = parse_source("begin while x = 1 x := 2 end").unwrap_err();
    assert_eq!(err.expected(), &["'+'", "'-'", "'*'", "'/'", "'do'"]);
}

#[test]
fn comparisons_cannot_chain_or_appear_in_arithmetic() {
    let err = parse_source("begin if 1 < x < 3 then x := 0 end").unwrap_err();
    assert_eq!(err.expected(), &["'+'", "'-'", "'*'", "'/'", "'then'"]);

    let err = parse_source("begin x := 1 < 2 end").unwrap_err();
    assert_eq!(err.expected(), &["'+'", "'-'", "'*'", "'/'", "';'", "'end'"]);
}

#[test]
fn condition_requires_relational_operator() {
    let err = parse_source("begin if x then x := 0 end").unwrap_err();
    assert_eq!(err.expected(),
               &["'+'", "'-'", "'*'", "'/'", "'<'", "'>'", "'<='", "'>='", "'='", "'<>'"]);

    let err = parse_source("begin if a b then x := 0 end").unwrap_err();
    assert_eq!(err.to_string(),
               "Error on line 1, column 12: Expected '+', '-', '*', '/', '<', '>', '<=', '>=', '=' or '<>', found identifier 'b'.");
}

#[test]
fn conditions_and_expressions_use_separate_operators() {
    let Statement::If { condition,
                        then_branch,
                        .. } = first_statement("begin if a + 1 <> b * 2 then x := a / b end")
    else {
        panic!("expected an if statement");
    };

    assert_eq!(condition.op, RelationalOperator::NotEqual);
    assert!(matches!(condition.left, Expr::BinaryOp { op: ArithmeticOperator::Add, .. }));
    assert!(matches!(condition.right, Expr::BinaryOp { op: ArithmeticOperator::Mul, .. }));
    assert!(matches!(*then_branch,
                     Statement::Assignment { value: Expr::BinaryOp { op: ArithmeticOperator::Div, .. },
                                             .. }));
}

#[test]
fn there_is_no_unary_minus() {
    let err = parse_source("begin x := -1 end").unwrap_err();

    assert_eq!(err.expected(), &["integer literal", "identifier", "'('"]);
}

#[test]
fn keywords_are_not_identifiers() {
    let err = parse_source("begin variable do end").unwrap_err();

    assert_eq!(err.to_string(), "Error on line 1, column 16: Expected identifier, found 'do'.");
}
