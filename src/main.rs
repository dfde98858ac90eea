use std::{
    fs,
    io::{self, BufWriter, Write},
    path::PathBuf,
    process,
    time::Instant,
};

use clap::{Parser, ValueEnum};
use hansen::{
    ast::Program,
    codegen,
    compile,
    error::Error,
    interpreter::{evaluator::core::Context, lexer::tokenize, symbol_table::SymbolTable},
};
use tracing::{Level, info};

/// hansen compiles and runs programs written in HansenLite, a small
/// imperative teaching language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells hansen to read the program from a file instead of the argument.
    #[arg(short, long)]
    file: bool,

    /// What to produce from the program.
    #[arg(short, long, value_enum, default_value_t = Emit::Run)]
    emit: Emit,

    /// Writes generated assembly to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Logs more detail to stderr. Repeat for more (-v info, -vv debug,
    /// -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    contents: String,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Emit {
    /// Run the program and print its output.
    Run,
    /// List the tokens with their positions.
    Tokens,
    /// Print the checked syntax tree.
    Ast,
    /// Only check the program.
    Check,
    /// Generate ARM assembly.
    Asm,
}

const fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt().with_writer(io::stderr)
                             .with_target(false)
                             .with_max_level(log_level(args.verbose))
                             .init();

    let (name, script) = if args.file {
        let script = fs::read_to_string(&args.contents).unwrap_or_else(|_| {
                                                            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                                                                      &args.contents);
                                                            process::exit(1);
                                                        });
        (args.contents.clone(), script)
    } else {
        ("<argument>".to_string(), args.contents.clone())
    };

    if let Err(e) = execute(&args, &name, &script) {
        eprintln!("{e}");
        process::exit(e.exit_code());
    }
}

/// Failure of the command as a whole: either a pipeline stage or writing the
/// result somewhere.
enum Failure {
    Pipeline(Error),
    Io(io::Error),
}

impl Failure {
    const fn exit_code(&self) -> i32 {
        match self {
            Self::Pipeline(e) => e.exit_code(),
            Self::Io(_) => 1,
        }
    }
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pipeline(e) => write!(f, "{e}"),
            Self::Io(e) => write!(f, "Failed to write output: {e}"),
        }
    }
}

impl From<Error> for Failure {
    fn from(e: Error) -> Self {
        Self::Pipeline(e)
    }
}

impl From<io::Error> for Failure {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

fn execute(args: &Args, name: &str, script: &str) -> Result<(), Failure> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match args.emit {
        Emit::Tokens => {
            let tokens = tokenize(script).map_err(Error::from)?;
            for (token, position) in &tokens {
                writeln!(out, "{}:{}\t{token}", position.line, position.column)?;
            }
            out.flush()?;
        },
        Emit::Run => {
            let (program, symbols) = compile_timed(name, script)?;
            let mut context = Context::new(symbols, out);
            let result = context.execute(&program);
            // Keep whatever was printed before a runtime error.
            context.into_output().flush()?;
            result.map_err(Error::from)?;
        },
        Emit::Ast => {
            let (program, _) = compile_timed(name, script)?;
            writeln!(out, "{program:#?}")?;
            out.flush()?;
        },
        Emit::Check => {
            let (_, symbols) = compile_timed(name, script)?;
            writeln!(out, "ok: {} variables declared", symbols.len())?;
            out.flush()?;
        },
        Emit::Asm => {
            let (program, symbols) = compile_timed(name, script)?;
            let asm = codegen::emit_assembly(&program, &symbols).map_err(Error::from)?;
            if let Some(path) = &args.output {
                fs::write(path, asm)?;
                info!("wrote assembly to {}", path.display());
            } else {
                out.write_all(asm.as_bytes())?;
                out.flush()?;
            }
        },
    }

    Ok(())
}

/// Lexes, parses and checks `script`, logging how long it took.
fn compile_timed(name: &str, script: &str) -> Result<(Program, SymbolTable), Error> {
    let started = Instant::now();
    let compiled = compile(script)?;
    info!("compiled {name} in {}ms", started.elapsed().as_millis());
    Ok(compiled)
}
