use std::io::Write;

use crate::{
    ast::{Block, Condition, Expr, PrintArgument, Program, Statement},
    error::RuntimeError,
    interpreter::{
        evaluator::binary::{eval_arithmetic, eval_comparison},
        symbol_table::SymbolTable,
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Stores the runtime evaluation context.
///
/// This struct holds the interpreter state: the variable cells produced by
/// the checker and the stream that `print` writes to.
///
/// ## Usage
///
/// A `Context` is built from the [`SymbolTable`] returned by
/// [`check`](crate::interpreter::checker::check) and runs one program. Any
/// [`Write`] works as output; the CLI passes a buffered stdout, tests pass a
/// `Vec<u8>`.
///
/// ```
/// use hansen::interpreter::{
///     checker::check, evaluator::core::Context, lexer::tokenize, parser::parse,
/// };
///
/// let tokens = tokenize("begin variable n; n := 6 * 7; print n end").unwrap();
/// let program = parse(&tokens).unwrap();
/// let symbols = check(&program).unwrap();
///
/// let mut context = Context::new(symbols, Vec::new());
/// context.execute(&program).unwrap();
///
/// assert_eq!(context.symbols().get("n"), Some(42));
/// assert_eq!(context.into_output(), b"42");
/// ```
pub struct Context<W: Write> {
    symbols: SymbolTable,
    output:  W,
}

impl<W: Write> Context<W> {
    /// Creates a context over already checked variables.
    #[must_use]
    pub const fn new(symbols: SymbolTable, output: W) -> Self {
        Self { symbols, output }
    }

    /// The variable cells in their current state.
    #[must_use]
    pub const fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Gives back the output stream.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs a whole program and flushes the output.
    ///
    /// # Errors
    /// Stops at the first `RuntimeError`. Output written before the failure
    /// stays in the stream.
    pub fn execute(&mut self, program: &Program) -> EvalResult<()> {
        self.eval_block(&program.body)?;
        self.output.flush()?;
        Ok(())
    }

    /// Executes a single statement.
    ///
    /// Assignments store into the variable's cell, `if` runs at most one
    /// branch, `while` tests its condition before every iteration, nested
    /// blocks run in the same scope, and `print` writes its argument with no
    /// trailing newline. Declarations do nothing at run time: the checker has
    /// already created every cell with the value 0.
    ///
    /// # Parameters
    /// - `statement`: Statement to execute.
    pub fn eval_statement(&mut self, statement: &Statement) -> EvalResult<()> {
        match statement {
            Statement::VariableDeclaration { .. } => Ok(()),
            Statement::Assignment { name, value, position } => {
                let value = self.eval_expr(value)?;
                if self.symbols.set(name, value) {
                    Ok(())
                } else {
                    Err(RuntimeError::UnknownVariable { name:     name.clone(),
                                                        position: *position, })
                }
            },
            Statement::If { condition,
                            then_branch,
                            else_branch,
                            .. } => {
                if self.eval_condition(condition)? {
                    self.eval_statement(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.eval_statement(else_branch)
                } else {
                    Ok(())
                }
            },
            Statement::While { condition,
                               body,
                               position, } => {
                let mut iterations: u64 = 0;
                while self.eval_condition(condition)? {
                    iterations += 1;
                    tracing::trace!(line = position.line, iterations, "while iteration");
                    self.eval_statement(body)?;
                }
                Ok(())
            },
            Statement::Block(block) => self.eval_block(block),
            Statement::Print { argument, .. } => match argument {
                PrintArgument::Text(text) => {
                    self.output.write_all(text.as_bytes()).map_err(RuntimeError::from)
                },
                PrintArgument::Expr(expr) => {
                    let value = self.eval_expr(expr)?;
                    write!(self.output, "{value}").map_err(RuntimeError::from)
                },
            },
        }
    }

    fn eval_block(&mut self, block: &Block) -> EvalResult<()> {
        block.statements
             .iter()
             .try_for_each(|statement| self.eval_statement(statement))
    }

    /// Evaluates an expression to an integer.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    ///
    /// # Errors
    /// Division by zero, overflow, or a variable missing from the table.
    pub fn eval_expr(&self, expr: &Expr) -> EvalResult<i64> {
        match expr {
            Expr::Integer { value, .. } => Ok(*value),
            Expr::Variable { name, position } => {
                self.symbols
                    .get(name)
                    .ok_or_else(|| RuntimeError::UnknownVariable { name:     name.clone(),
                                                                   position: *position, })
            },
            Expr::BinaryOp { left,
                             op,
                             right,
                             position, } => {
                let left = self.eval_expr(left)?;
                let right = self.eval_expr(right)?;
                eval_arithmetic(*op, left, right, *position)
            },
        }
    }

    /// Evaluates the condition of an `if` or `while`.
    ///
    /// Both sides are evaluated, left first, before they are compared.
    pub fn eval_condition(&self, condition: &Condition) -> EvalResult<bool> {
        let left = self.eval_expr(&condition.left)?;
        let right = self.eval_expr(&condition.right)?;
        Ok(eval_comparison(condition.op, left, right))
    }
}
