use crate::{
    ast::{Block, Condition, Expr, PrintArgument, Program, Statement},
    error::SemanticError,
    interpreter::symbol_table::SymbolTable,
};

/// Result type used by the semantic checker.
pub type CheckResult<T> = Result<T, SemanticError>;

/// Checks that every variable is declared exactly once and before any use.
///
/// The program is walked once, left to right. Nested blocks share the single
/// scope, so a declaration inside a `begin ... end` stays visible after it.
/// Declarations inside a loop body or an untaken branch still count, since
/// the walk follows source order rather than control flow.
///
/// # Parameters
/// - `program`: The parsed program.
///
/// # Returns
/// The symbol table holding one cell per declared variable, all set to 0.
///
/// # Errors
/// Returns the first `SemanticError` found:
/// - `Undeclared` when a name is assigned or read before its declaration,
/// - `Redeclared` when a name is declared a second time.
///
/// # Example
/// ```
/// use hansen::interpreter::{checker::check, lexer::tokenize, parser::parse};
///
/// let tokens = tokenize("begin variable a; a := 2; begin variable b; b := a end end").unwrap();
/// let program = parse(&tokens).unwrap();
/// let symbols = check(&program).unwrap();
///
/// assert_eq!(symbols.len(), 2);
/// assert_eq!(symbols.get("b"), Some(0));
/// ```
pub fn check(program: &Program) -> CheckResult<SymbolTable> {
    let mut symbols = SymbolTable::new();
    check_block(&program.body, &mut symbols)?;

    tracing::debug!(variables = symbols.len(), "semantic check passed");
    Ok(symbols)
}

fn check_block(block: &Block, symbols: &mut SymbolTable) -> CheckResult<()> {
    block.statements
         .iter()
         .try_for_each(|statement| check_statement(statement, symbols))
}

fn check_statement(statement: &Statement, symbols: &mut SymbolTable) -> CheckResult<()> {
    match statement {
        Statement::VariableDeclaration { name, position } => {
            symbols.declare(name, *position)
                   .map_err(|previous| SemanticError::Redeclared { name: name.clone(),
                                                                   position: *position,
                                                                   previous })?;
            Ok(())
        },
        Statement::Assignment { name, value, position } => {
            if !symbols.contains(name) {
                return Err(SemanticError::Undeclared { name:     name.clone(),
                                                       position: *position, });
            }
            check_expr(value, symbols)
        },
        Statement::If { condition,
                        then_branch,
                        else_branch,
                        .. } => {
            check_condition(condition, symbols)?;
            check_statement(then_branch, symbols)?;
            if let Some(else_branch) = else_branch {
                check_statement(else_branch, symbols)?;
            }
            Ok(())
        },
        Statement::While { condition, body, .. } => {
            check_condition(condition, symbols)?;
            check_statement(body, symbols)
        },
        Statement::Block(block) => check_block(block, symbols),
        Statement::Print { argument, .. } => match argument {
            PrintArgument::Text(_) => Ok(()),
            PrintArgument::Expr(expr) => check_expr(expr, symbols),
        },
    }
}

fn check_condition(condition: &Condition, symbols: &SymbolTable) -> CheckResult<()> {
    check_expr(&condition.left, symbols)?;
    check_expr(&condition.right, symbols)
}

fn check_expr(expr: &Expr, symbols: &SymbolTable) -> CheckResult<()> {
    match expr {
        Expr::Integer { .. } => Ok(()),
        Expr::Variable { name, position } => {
            if symbols.contains(name) {
                Ok(())
            } else {
                Err(SemanticError::Undeclared { name:     name.clone(),
                                                position: *position, })
            }
        },
        Expr::BinaryOp { left, right, .. } => {
            check_expr(left, symbols)?;
            check_expr(right, symbols)
        },
    }
}
