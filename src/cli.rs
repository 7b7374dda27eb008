use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{info, warn};

use exprcalc::Expression;

/// Log level for the application
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_log_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Evaluate arithmetic expressions through both infix and postfix evaluation
#[derive(Parser, Debug)]
#[command(name = "exprcalc")]
#[command(version)]
pub struct CliArgs {
    /// Expressions to evaluate; read from stdin, one per line, when omitted
    pub expressions: Vec<String>,

    /// Print the token classification listing for valid expressions too
    #[arg(short, long)]
    pub analysis: bool,

    /// Log level (default: warn)
    #[arg(short, long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,
}

pub fn init_logging(log_level: &LogLevel) {
    env_logger::Builder::from_default_env()
        .filter_level(log_level.to_log_level_filter())
        .init();
}

/// Prints the four renderings of one expression, or its diagnostic report.
/// Returns whether the expression was valid.
fn evaluate(source: &str, analysis: bool, out: &mut impl Write) -> Result<bool> {
    let expr = match Expression::new(source) {
        Ok(expr) => expr,
        Err(report) => {
            warn!("rejected {:?}", source);
            writeln!(out, "invalid expression:\n{}", report)?;
            return Ok(false);
        }
    };
    if analysis {
        writeln!(out, "{}", Expression::analyse(source))?;
    }
    writeln!(out, "infix:              {}", expr.infix_expression())?;
    writeln!(out, "postfix:            {}", expr.postfix_expression())?;
    let infix = expr
        .evaluate_from_infix()
        .context("infix evaluation failed")?;
    let postfix = expr
        .evaluate_from_postfix()
        .context("postfix evaluation failed")?;
    writeln!(out, "infix evaluation:   {}", infix)?;
    writeln!(out, "postfix evaluation: {}", postfix)?;
    Ok(true)
}

pub fn run() -> Result<()> {
    let args = CliArgs::parse();
    init_logging(&args.log_level);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut all_valid = true;

    if args.expressions.is_empty() {
        info!("reading expressions from stdin");
        for line in io::stdin().lock().lines() {
            let line = line.context("failed to read stdin")?;
            let line = line.trim();
            if line == "exit" {
                break;
            }
            if line.is_empty() {
                continue;
            }
            all_valid &= evaluate(line, args.analysis, &mut out)?;
        }
    } else {
        for source in &args.expressions {
            all_valid &= evaluate(source, args.analysis, &mut out)?;
        }
    }

    if !all_valid {
        anyhow::bail!("some expressions were invalid");
    }
    Ok(())
}
