use std::fmt;

/// A 1-based location in the source text.
///
/// Every token and every AST node carries the position of its first character
/// so that diagnostics from any stage can point back at the program text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Line number, starting at 1.
    pub line:   usize,
    /// Column number in characters, starting at 1.
    pub column: usize,
}

impl Position {
    /// Creates a position from a line and a column.
    ///
    /// ## Example
    /// ```
    /// use hansen::ast::Position;
    ///
    /// let position = Position::new(3, 7);
    /// assert_eq!(position.to_string(), "line 3, column 7");
    /// ```
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// An operator of an arithmetic expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithmeticOperator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`, truncating toward zero.
    Div,
}

impl ArithmeticOperator {
    /// The operator as it is written in source code.
    ///
    /// ## Example
    /// ```
    /// use hansen::ast::ArithmeticOperator;
    ///
    /// assert_eq!(ArithmeticOperator::Div.symbol(), "/");
    /// ```
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        }
    }
}

impl fmt::Display for ArithmeticOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// The comparison of a [`Condition`]. Comparisons never produce an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationalOperator {
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `<=`
    LessEqual,
    /// `>=`
    GreaterEqual,
    /// `=`
    Equal,
    /// `<>`
    NotEqual,
}

impl RelationalOperator {
    /// The operator as it is written in source code.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::Equal => "=",
            Self::NotEqual => "<>",
        }
    }

    /// The operator that holds exactly when `self` does not.
    ///
    /// ## Example
    /// ```
    /// use hansen::ast::RelationalOperator;
    ///
    /// assert_eq!(RelationalOperator::Less.negate(), RelationalOperator::GreaterEqual);
    /// assert_eq!(RelationalOperator::NotEqual.negate(), RelationalOperator::Equal);
    /// ```
    #[must_use]
    pub const fn negate(self) -> Self {
        match self {
            Self::Less => Self::GreaterEqual,
            Self::Greater => Self::LessEqual,
            Self::LessEqual => Self::Greater,
            Self::GreaterEqual => Self::Less,
            Self::Equal => Self::NotEqual,
            Self::NotEqual => Self::Equal,
        }
    }
}

impl fmt::Display for RelationalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// An integer-valued expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// An integer literal such as `546`.
    Integer {
        /// The literal value.
        value:    i64,
        /// Where the literal starts.
        position: Position,
    },
    /// A reference to a declared variable.
    Variable {
        /// Name of the variable.
        name:     String,
        /// Where the reference starts.
        position: Position,
    },
    /// An arithmetic operation on two sub-expressions.
    BinaryOp {
        /// Left operand.
        left:     Box<Self>,
        /// The operator.
        op:       ArithmeticOperator,
        /// Right operand.
        right:    Box<Self>,
        /// Position of the operator token.
        position: Position,
    },
}

impl Expr {
    /// Gets the source position of `self`.
    /// ## Example
    /// ```
    /// use hansen::ast::{Expr, Position};
    ///
    /// let expr = Expr::Variable { name:     "a".to_string(),
    ///                             position: Position::new(5, 4), };
    ///
    /// assert_eq!(expr.position(), Position::new(5, 4));
    /// ```
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::Integer { position, .. }
            | Self::Variable { position, .. }
            | Self::BinaryOp { position, .. } => *position,
        }
    }
}

/// The test of an `if` or `while` statement: `Expr RelOp Expr`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    /// Left-hand expression.
    pub left:     Expr,
    /// The comparison.
    pub op:       RelationalOperator,
    /// Right-hand expression.
    pub right:    Expr,
    /// Position of the relational operator.
    pub position: Position,
}

/// What a `print` statement writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrintArgument {
    /// A string literal, already decoded by the lexer.
    Text(String),
    /// An expression whose value is printed in base 10.
    Expr(Expr),
}

/// A `begin ... end` statement list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// The statements, in source order. Never empty.
    pub statements: Vec<Statement>,
    /// Position of the `begin` keyword.
    pub position:   Position,
}

/// A single statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `variable <name>`
    VariableDeclaration {
        /// The declared name.
        name:     String,
        /// Position of the name.
        position: Position,
    },
    /// `<name> := <expr>`
    Assignment {
        /// The target variable.
        name:     String,
        /// The assigned expression.
        value:    Expr,
        /// Position of the target name.
        position: Position,
    },
    /// `if <cond> then <stmt> [else <stmt>]`
    If {
        /// The branch condition.
        condition:   Condition,
        /// Executed when the condition holds.
        then_branch: Box<Self>,
        /// Executed otherwise, if present.
        else_branch: Option<Box<Self>>,
        /// Position of the `if` keyword.
        position:    Position,
    },
    /// `while <cond> do <stmt>`
    While {
        /// Tested before every iteration.
        condition: Condition,
        /// The loop body.
        body:      Box<Self>,
        /// Position of the `while` keyword.
        position:  Position,
    },
    /// A nested `begin ... end` block.
    Block(Block),
    /// `print <expr>` or `print "<text>"`
    Print {
        /// What to print.
        argument: PrintArgument,
        /// Position of the `print` keyword.
        position: Position,
    },
}

impl Statement {
    /// Gets the source position of `self`.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::VariableDeclaration { position, .. }
            | Self::Assignment { position, .. }
            | Self::If { position, .. }
            | Self::While { position, .. }
            | Self::Print { position, .. } => *position,
            Self::Block(block) => block.position,
        }
    }
}

/// A whole program: one outer `begin ... end` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    /// The outermost block.
    pub body: Block,
}

impl Program {
    /// Counts every statement in the program, including nested ones.
    ///
    /// ## Example
    /// ```
    /// use hansen::{interpreter::{lexer::tokenize, parser::parse}};
    ///
    /// let tokens = tokenize("begin variable x; if x = 0 then x := 1 end").unwrap();
    /// let program = parse(&tokens).unwrap();
    ///
    /// assert_eq!(program.statement_count(), 3);
    /// ```
    #[must_use]
    pub fn statement_count(&self) -> usize {
        fn count(statement: &Statement) -> usize {
            match statement {
                Statement::If { then_branch,
                                else_branch,
                                .. } => {
                    1 + count(then_branch) + else_branch.as_deref().map_or(0, count)
                },
                Statement::While { body, .. } => 1 + count(body),
                Statement::Block(block) => 1 + block.statements.iter().map(count).sum::<usize>(),
                _ => 1,
            }
        }

        self.body.statements.iter().map(count).sum()
    }
}
