use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, Level};

use tally_driver::config::{self, LogConfig};
use tally_driver::logging::{self, LogFormat};
use tally_driver::{describe_error, evaluate_traced, Evaluation, SAMPLE_INPUTS};

#[derive(Parser)]
#[command(
    name = "tally",
    version = "0.1.0",
    about = "Evaluate flat integer expressions of + and -",
    long_about = "Evaluates expressions such as `10 + 5 - 3` left to right.\nOnly non-negative integers, `+`, `-` and spaces are accepted."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Global log level (defaults to $TALLY_LOG, then `warn`)
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    /// Log output format
    #[arg(long, global = true, default_value = "compact")]
    log_format: LogFormat,

    /// Disable colored diagnostics
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate an expression and print its value
    Eval {
        #[command(flatten)]
        input: InputArgs,

        /// Show the lexer and parser stages
        #[arg(short, long)]
        verbose: bool,
    },

    /// Lex an expression and show tokens (debug)
    Lex {
        #[command(flatten)]
        input: InputArgs,

        /// Show token positions
        #[arg(short, long)]
        positions: bool,
    },

    /// Evaluate the built-in sample expressions
    Demo,
}

#[derive(Args)]
struct InputArgs {
    /// Expression to evaluate
    #[arg(required_unless_present = "file", conflicts_with = "file", allow_hyphen_values = true)]
    expr: Option<String>,

    /// Read expressions from a file, one per line
    #[arg(short, long)]
    file: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

/// One expression to run, with the name diagnostics should show for it.
struct Job {
    name: String,
    source: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut log_config = LogConfig::from_env();
    if let Some(level) = cli.log_level {
        log_config.global = level.into();
    }
    log_config.format = cli.log_format;
    if let Err(e) = logging::init(&log_config) {
        eprintln!("Error initializing logging: {}", e);
    }

    let color = config::color_enabled(cli.no_color);

    match cli.command {
        Commands::Eval { input, verbose } => eval_command(input, verbose, color),
        Commands::Lex { input, positions } => lex_command(input, positions, color),
        Commands::Demo => demo_command(color),
    }
}

fn eval_command(input: InputArgs, verbose: bool, color: bool) -> ExitCode {
    let jobs = match load_jobs(input) {
        Ok(jobs) => jobs,
        Err(code) => return code,
    };

    let mut failed = false;
    for job in &jobs {
        let evaluation = evaluate_traced(&job.source);
        if verbose {
            print_stages(&evaluation);
        } else if let Ok(value) = &evaluation.result {
            println!("{}", value);
        }

        if let Some(report) = evaluation.render(&job.name, color) {
            eprint!("{}", report);
            failed = true;
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn lex_command(input: InputArgs, positions: bool, color: bool) -> ExitCode {
    let jobs = match load_jobs(input) {
        Ok(jobs) => jobs,
        Err(code) => return code,
    };

    let mut failed = false;
    for job in &jobs {
        let evaluation = evaluate_traced(&job.source);

        println!("Tokens for {}:\n", job.name);
        println!("{}", "=".repeat(40));

        for (i, node) in evaluation.tokens.iter().enumerate() {
            if positions {
                println!(
                    "{:4} | {:12} | {}..{}",
                    i,
                    format!("{:?}", node.value),
                    node.span.start,
                    node.span.end
                );
            } else {
                println!("{:4} | {:?}", i, node.value);
            }
        }

        println!("{}", "=".repeat(40));
        println!("\nTotal tokens: {}", evaluation.tokens.len());

        // Parse errors are not this command's business.
        if !evaluation.lexed() {
            if let Some(report) = evaluation.render(&job.name, color) {
                eprint!("{}", report);
            }
            failed = true;
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn demo_command(color: bool) -> ExitCode {
    for (i, source) in SAMPLE_INPUTS.iter().enumerate() {
        if i > 0 {
            println!();
        }
        let evaluation = evaluate_traced(source);
        print_stages(&evaluation);
        if let Some(report) = evaluation.render("<sample>", color) {
            eprint!("{}", report);
        }
    }
    ExitCode::SUCCESS
}

fn print_stages(evaluation: &Evaluation<'_>) {
    println!("Evaluating: {}", evaluation.input);
    if evaluation.lexed() {
        println!("Lexer output: {:?}", evaluation.token_values());
    }
    match &evaluation.result {
        Ok(value) => println!("Parser output: {}", value),
        Err(e) => println!("{}", describe_error(e)),
    }
}

fn load_jobs(input: InputArgs) -> Result<Vec<Job>, ExitCode> {
    match (input.expr, input.file) {
        (Some(expr), _) => Ok(vec![Job {
            name: "<input>".to_string(),
            source: expr,
        }]),
        (None, Some(path)) => {
            let contents = match fs::read_to_string(&path) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Error reading file: {}", e);
                    return Err(ExitCode::FAILURE);
                }
            };
            info!(target: "tally::driver", path = %path.display(), "loaded expressions");
            Ok(contents
                .lines()
                .enumerate()
                .filter(|(_, line)| !line.trim().is_empty())
                .map(|(i, line)| Job {
                    name: format!("{}:{}", path.display(), i + 1),
                    source: line.to_string(),
                })
                .collect())
        }
        (None, None) => {
            eprintln!("Error: no expression given");
            Err(ExitCode::FAILURE)
        }
    }
}
