/// The checker module enforces the declaration rules before anything runs.
///
/// It walks the parsed program once, in source order, and builds the symbol
/// table that the evaluator and the code generator work from.
///
/// # Responsibilities
/// - Rejects references to variables that have not been declared yet.
/// - Rejects a second declaration of the same name.
/// - Creates one zeroed cell per declared variable.
pub mod checker;
/// The evaluator module executes a checked program.
///
/// The evaluator walks the AST, computes integer expressions, updates
/// variable cells and writes `print` output to any `std::io::Write` stream.
///
/// # Responsibilities
/// - Runs statements in order, with pretest loops and nearest-if `else`.
/// - Reports runtime errors such as division by zero or overflow.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens, each
/// paired with the line and column where it starts. Comments and whitespace
/// are dropped here.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with source positions.
/// - Decodes integer and string literals.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser is a recursive descent parser over the token stream produced by
/// the lexer. It stops at the first token that does not fit the grammar and
/// reports what it expected there.
pub mod parser;
/// The symbol table holds every declared variable and its value.
///
/// There is one flat scope per program. Each variable also gets a slot
/// number, its declaration index, which the code generator turns into a
/// stack offset.
pub mod symbol_table;
