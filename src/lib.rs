//! # hansen
//!
//! hansen is a compiler and interpreter for HansenLite, a small imperative
//! teaching language with integer variables, `if`, `while` and `print`.
//! Source text goes through a lexer, a parser and a semantic checker; the
//! checked program is then either run directly or translated into ARM
//! assembly.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::io::Write;

use crate::{
    ast::Program,
    error::Error,
    interpreter::{
        checker::check, evaluator::core::Context, lexer::tokenize, parser::parse,
        symbol_table::SymbolTable,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the statement and expression types that represent a
/// program as a tree. The AST is built by the parser, checked by the checker,
/// and consumed by the evaluator and the code generator.
///
/// # Responsibilities
/// - Defines statement, expression and condition types for every construct.
/// - Attaches source positions to nodes for error reporting.
pub mod ast;
/// Translates checked programs into ARM assembly.
///
/// This is the back end of the compiler. It relies on the checker having run:
/// every variable it meets must have a slot in the symbol table.
pub mod codegen;
/// Provides unified error types for every stage of the pipeline.
///
/// This module defines all errors that can be raised during lexing, parsing,
/// checking, evaluating or emitting code. Each carries the source position of
/// the failure, and the top-level [`Error`](error::Error) names the stage it
/// came from.
///
/// # Responsibilities
/// - Defines one error enum per stage.
/// - Attaches line and column numbers for context.
/// - Maps each failure to a process exit status.
pub mod error;
/// Orchestrates the front end and the interpreter.
///
/// This module ties together lexing, parsing, checking and evaluation. Each
/// stage is usable on its own; the functions at the crate root chain them.
pub mod interpreter;

/// Runs the front end: lexing, parsing and checking.
///
/// # Returns
/// The parsed program together with its symbol table, with every variable
/// set to 0.
///
/// # Errors
/// The first lexical, syntax or semantic error.
///
/// # Example
/// ```
/// let (program, symbols) = hansen::compile("begin variable x; x := 1 end").unwrap();
///
/// assert_eq!(program.statement_count(), 2);
/// assert!(symbols.contains("x"));
/// ```
pub fn compile(source: &str) -> Result<(Program, SymbolTable), Error> {
    let tokens = tokenize(source)?;
    let program = parse(&tokens)?;
    let symbols = check(&program)?;
    Ok((program, symbols))
}

/// Compiles and runs a program, writing its output to `out`.
///
/// Nothing is written unless the program passes every front-end stage. A
/// runtime error stops execution, but output produced before it has already
/// been written.
///
/// # Errors
/// Returns the first error of any stage.
pub fn run<W: Write>(source: &str, out: W) -> Result<(), Error> {
    let (program, symbols) = compile(source)?;
    let mut context = Context::new(symbols, out);
    context.execute(&program)?;
    Ok(())
}

/// Compiles and runs a program, returning everything it printed.
///
/// # Errors
/// Returns an error if any stage fails. Output produced before a runtime
/// error is discarded; use [`run`] to keep it.
///
/// # Examples
/// ```
/// use hansen::get_result;
///
/// let source = r#"
/// begin
///     variable n;
///     n := 9;
///     print "n squared is ";
///     print n * n;
///     print "\n"
/// end
/// "#;
/// assert_eq!(get_result(source).unwrap(), "n squared is 81\n");
///
/// // Example with an intentional error (undeclared variable).
/// let source = "begin po := 1 end";
/// assert!(get_result(source).is_err());
/// ```
pub fn get_result(source: &str) -> Result<String, Error> {
    let mut output = Vec::new();
    run(source, &mut output)?;
    Ok(String::from_utf8_lossy(&output).into_owned())
}

/// Compiles a program all the way to ARM assembly.
///
/// # Errors
/// Returns the first front-end error, or a code generation error.
///
/// # Example
/// ```
/// let asm = hansen::emit_assembly("begin print 42 end").unwrap();
///
/// assert!(asm.contains("main:"));
/// assert!(asm.contains("ldr r0, =42"));
/// ```
pub fn emit_assembly(source: &str) -> Result<String, Error> {
    let (program, symbols) = compile(source)?;
    Ok(codegen::emit_assembly(&program, &symbols)?)
}
