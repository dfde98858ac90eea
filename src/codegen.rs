//! ARM assembly output.
//!
//! Translates a checked program into GNU-syntax assembly for 32-bit ARM
//! Linux, linked against the C library for `printf` and the EABI runtime for
//! division. Every variable lives in a 4-byte stack slot below the frame
//! pointer; expressions are computed into `r0` with `r1` as a scratch
//! register and the stack holding pending left operands.
//!
//! Constants are loaded with `ldr rN, =value`, so a literal pool is dumped
//! with `.ltorg` after every unconditional branch and at least every
//! [`LITERAL_POOL_INTERVAL`] instructions, keeping each pool within reach of
//! the loads that use it.

use crate::{
    ast::{
        ArithmeticOperator,
        Block,
        Condition,
        Expr,
        Position,
        PrintArgument,
        Program,
        RelationalOperator,
        Statement,
    },
    error::CodegenError,
    interpreter::symbol_table::SymbolTable,
};

/// Result type used by the code generator.
pub type CodegenResult<T> = Result<T, CodegenError>;

/// Largest offset below `fp` that a single `ldr`/`str` can address.
const MAX_FRAME_OFFSET: usize = 4095;

/// Most instructions emitted between two literal pools.
pub const LITERAL_POOL_INTERVAL: usize = 256;

/// Written to stderr when the program divides by zero.
const DIVISION_BY_ZERO: &str = "Division by zero.\n";

/// Exit status of a program stopped by a division by zero.
const DIVISION_BY_ZERO_STATUS: i32 = 5;

/// Emits assembly for a checked program.
///
/// `symbols` must be the table the checker built for `program`; its slots
/// decide the stack layout. Integer literals must fit in 32 bits, and
/// arithmetic wraps at 32 bits on the target rather than trapping. A division
/// by zero prints `Division by zero.` to stderr and exits with status 5.
///
/// # Parameters
/// - `program`: The parsed program.
/// - `symbols`: Its checked variables.
///
/// # Returns
/// The complete assembly source, ending with a newline.
///
/// # Errors
/// - `LiteralOutOfRange` for a literal above `i32::MAX`.
/// - `TooManyVariables` when the frame outgrows the reach of `ldr`/`str`.
/// - `UnknownVariable` when a name has no slot in `symbols`.
///
/// # Example
/// ```
/// use hansen::{
///     codegen::emit_assembly,
///     interpreter::{checker::check, lexer::tokenize, parser::parse},
/// };
///
/// let tokens = tokenize(r#"begin variable x; x := 2 + 3; print "x is "; print x end"#).unwrap();
/// let program = parse(&tokens).unwrap();
/// let symbols = check(&program).unwrap();
///
/// let asm = emit_assembly(&program, &symbols).unwrap();
/// assert!(asm.contains("str_0:\t.asciz \"x is \""));
/// assert!(asm.contains("\tbl printf\n"));
/// assert!(asm.contains("\tstr r0, [fp, #-4]\n"));
/// ```
pub fn emit_assembly(program: &Program, symbols: &SymbolTable) -> CodegenResult<String> {
    let frame = frame_size(symbols.len())?;

    let mut emitter = Emitter { symbols,
                                strings: Vec::new(),
                                text: String::new(),
                                labels: 0,
                                pools: 0,
                                since_pool: 0,
                                divides: false };

    emitter.prologue(frame, symbols.len());
    emitter.block(&program.body)?;
    emitter.epilogue();

    let mut out = data_section(&emitter.strings, emitter.divides);
    out.push_str(&emitter.text);

    tracing::debug!(bytes = out.len(), strings = emitter.strings.len(), "assembly emitted");
    Ok(out)
}

/// Bytes reserved below `fp` for `count` variables, kept 8-byte aligned.
fn frame_size(count: usize) -> CodegenResult<usize> {
    let bytes = count * 4;
    if bytes > MAX_FRAME_OFFSET {
        return Err(CodegenError::TooManyVariables { count });
    }
    Ok(bytes.next_multiple_of(8))
}

/// Builds the `.data` section: the two `printf` formats, the division by
/// zero message when some expression divides, then one constant per distinct
/// string literal.
fn data_section(strings: &[String], divides: bool) -> String {
    let mut out = String::from("\t.data\n");
    out.push_str("ifmt:\t.asciz \"%d\"\n");
    out.push_str("sfmt:\t.asciz \"%s\"\n");
    if divides {
        out.push_str(&format!("div_msg:\t.asciz \"{}\"\n", escape(DIVISION_BY_ZERO)));
    }
    for (index, text) in strings.iter().enumerate() {
        out.push_str(&format!("str_{index}:\t.asciz \"{}\"\n", escape(text)));
    }
    out.push('\n');
    out
}

/// Escapes text for an `.asciz` directive.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c if c.is_ascii_control() => out.push_str(&format!("\\{:03o}", u32::from(c))),
            c => out.push(c),
        }
    }
    out
}

/// ARM condition code under which `op` holds after `cmp r0, r1`.
const fn condition_code(op: RelationalOperator) -> &'static str {
    match op {
        RelationalOperator::Less => "lt",
        RelationalOperator::Greater => "gt",
        RelationalOperator::LessEqual => "le",
        RelationalOperator::GreaterEqual => "ge",
        RelationalOperator::Equal => "eq",
        RelationalOperator::NotEqual => "ne",
    }
}

struct Emitter<'a> {
    symbols:    &'a SymbolTable,
    strings:    Vec<String>,
    text:       String,
    labels:     usize,
    pools:      usize,
    since_pool: usize,
    divides:    bool,
}

impl Emitter<'_> {
    fn instruction(&mut self, line: &str) {
        // Leave room for the branch over the pool.
        if self.since_pool + 1 >= LITERAL_POOL_INTERVAL {
            let label = format!("pool_{}", self.pools);
            self.pools += 1;
            self.text.push_str(&format!("\tb {label}\n"));
            self.literal_pool();
            self.label(&label);
        }

        self.text.push('\t');
        self.text.push_str(line);
        self.text.push('\n');
        self.since_pool += 1;
    }

    /// A branch that never falls through, followed by a literal pool.
    fn jump(&mut self, target: &str) {
        self.text.push_str(&format!("\tb {target}\n"));
        self.literal_pool();
    }

    fn literal_pool(&mut self) {
        self.text.push_str("\t.ltorg\n");
        self.since_pool = 0;
    }

    fn label(&mut self, name: &str) {
        self.text.push_str(name);
        self.text.push_str(":\n");
    }

    fn next_label(&mut self) -> usize {
        let label = self.labels;
        self.labels += 1;
        label
    }

    fn prologue(&mut self, frame: usize, count: usize) {
        self.text.push_str("\t.text\n\t.align 2\n\t.global main\n");
        self.label("main");
        self.instruction("push {fp, lr}");
        self.instruction("mov fp, sp");
        if frame > 0 {
            self.instruction(&format!("ldr r1, ={frame}"));
            self.instruction("sub sp, sp, r1");
            self.instruction("mov r0, #0");
            for slot in 0..count {
                self.instruction(&format!("str r0, [fp, #-{}]", 4 * (slot + 1)));
            }
        }
    }

    fn epilogue(&mut self) {
        self.instruction("mov r0, #0");
        self.instruction("mov sp, fp");
        self.instruction("pop {fp, pc}");

        if self.divides {
            self.label("div_zero");
            self.instruction("mov r0, #2");
            self.instruction("ldr r1, =div_msg");
            self.instruction(&format!("mov r2, #{}", DIVISION_BY_ZERO.len()));
            self.instruction("bl write");
            self.instruction(&format!("mov r0, #{DIVISION_BY_ZERO_STATUS}"));
            self.instruction("bl exit");
        }
        self.literal_pool();
    }

    /// Frame offset of a variable, as written in `[fp, #-offset]`.
    fn offset(&self, name: &str, position: Position) -> CodegenResult<usize> {
        self.symbols
            .lookup(name)
            .map(|symbol| 4 * (symbol.slot + 1))
            .ok_or_else(|| CodegenError::UnknownVariable { name: name.to_string(),
                                                           position })
    }

    fn string_index(&mut self, text: &str) -> usize {
        if let Some(index) = self.strings.iter().position(|s| s == text) {
            return index;
        }
        self.strings.push(text.to_string());
        self.strings.len() - 1
    }

    fn block(&mut self, block: &Block) -> CodegenResult<()> {
        block.statements.iter().try_for_each(|statement| self.statement(statement))
    }

    fn statement(&mut self, statement: &Statement) -> CodegenResult<()> {
        match statement {
            Statement::VariableDeclaration { .. } => {},
            Statement::Assignment { name, value, position } => {
                let offset = self.offset(name, *position)?;
                self.expr(value)?;
                self.instruction(&format!("str r0, [fp, #-{offset}]"));
            },
            Statement::If { condition,
                            then_branch,
                            else_branch,
                            .. } => {
                let label = self.next_label();
                self.condition(condition, &format!("else_{label}"))?;
                self.statement(then_branch)?;
                self.jump(&format!("end_{label}"));
                self.label(&format!("else_{label}"));
                if let Some(else_branch) = else_branch {
                    self.statement(else_branch)?;
                }
                self.label(&format!("end_{label}"));
            },
            Statement::While { condition, body, .. } => {
                let label = self.next_label();
                self.label(&format!("begin_{label}"));
                self.condition(condition, &format!("end_{label}"))?;
                self.statement(body)?;
                self.jump(&format!("begin_{label}"));
                self.label(&format!("end_{label}"));
            },
            Statement::Block(block) => self.block(block)?,
            Statement::Print { argument, .. } => {
                match argument {
                    PrintArgument::Text(text) => {
                        let index = self.string_index(text);
                        self.instruction(&format!("ldr r1, =str_{index}"));
                        self.instruction("ldr r0, =sfmt");
                    },
                    PrintArgument::Expr(expr) => {
                        self.expr(expr)?;
                        self.instruction("mov r1, r0");
                        self.instruction("ldr r0, =ifmt");
                    },
                }
                self.instruction("bl printf");
            },
        }
        Ok(())
    }

    /// Evaluates both sides and jumps to `target` when the condition is false.
    fn condition(&mut self, condition: &Condition, target: &str) -> CodegenResult<()> {
        self.operands(&condition.left, &condition.right)?;
        self.instruction("cmp r0, r1");
        self.instruction(&format!("b{} {target}", condition_code(condition.op.negate())));
        Ok(())
    }

    /// Leaves `left` in `r0` and `right` in `r1`.
    fn operands(&mut self, left: &Expr, right: &Expr) -> CodegenResult<()> {
        self.expr(left)?;
        self.instruction("push {r0}");
        self.expr(right)?;
        self.instruction("mov r1, r0");
        self.instruction("pop {r0}");
        Ok(())
    }

    fn expr(&mut self, expr: &Expr) -> CodegenResult<()> {
        match expr {
            Expr::Integer { value, position } => {
                let Ok(value) = i32::try_from(*value) else {
                    return Err(CodegenError::LiteralOutOfRange { value:    *value,
                                                                 position: *position, });
                };
                self.instruction(&format!("ldr r0, ={value}"));
            },
            Expr::Variable { name, position } => {
                let offset = self.offset(name, *position)?;
                self.instruction(&format!("ldr r0, [fp, #-{offset}]"));
            },
            Expr::BinaryOp { left, op, right, .. } => {
                self.operands(left, right)?;
                match op {
                    ArithmeticOperator::Add => self.instruction("add r0, r0, r1"),
                    ArithmeticOperator::Sub => self.instruction("sub r0, r0, r1"),
                    ArithmeticOperator::Mul => self.instruction("mul r0, r1, r0"),
                    ArithmeticOperator::Div => {
                        self.divides = true;
                        self.instruction("cmp r1, #0");
                        self.instruction("beq div_zero");
                        self.instruction("bl __aeabi_idiv");
                    },
                }
            },
        }
        Ok(())
    }
}
