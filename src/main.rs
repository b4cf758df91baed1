use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;
use polyexpand::{
  expand, expansion_report, parse_expr, CommutativeTermCollector,
  ExpandOptions, DEFAULT_MAX_EXPONENT,
};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Increase log verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count, global = true)]
  verbose: u8,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Expand an expression into a collected sum of monomials
  Expand {
    #[command(flatten)]
    input: ExpandArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
  },
  /// List the monomials of the expanded expression with their coefficients
  Terms {
    #[command(flatten)]
    input: ExpandArgs,
  },
}

#[derive(Args)]
struct ExpandArgs {
  /// The expression to expand, e.g. "(a + b)^2"
  expression: String,

  /// Symbol treated as part of the coefficient (repeatable)
  #[arg(short, long = "param", value_name = "NAME")]
  params: Vec<String>,

  /// Distribute products without merging like terms
  #[arg(long)]
  non_commutative: bool,

  /// Largest integer power a sum is expanded to
  #[arg(long, default_value_t = DEFAULT_MAX_EXPONENT)]
  max_exponent: u32,
}

impl ExpandArgs {
  fn options(&self) -> ExpandOptions {
    ExpandOptions::default()
      .with_parameters(self.params.iter().cloned())
      .commutative(!self.non_commutative)
      .with_max_exponent(self.max_exponent)
  }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
  Text,
  Json,
}

fn init_logger(verbose: u8) {
  let level = match verbose {
    0 => LevelFilter::Warn,
    1 => LevelFilter::Info,
    2 => LevelFilter::Debug,
    _ => LevelFilter::Trace,
  };
  // A logger may already be installed; expansion works without one.
  let _ = TermLogger::init(
    level,
    Config::default(),
    TerminalMode::Stderr,
    ColorChoice::Auto,
  );
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  init_logger(cli.verbose);

  match cli.command {
    Commands::Expand { input, format } => {
      let expr = parse_expr(&input.expression)
        .with_context(|| format!("could not parse `{}`", input.expression))?;
      let options = input.options();
      info!("expanding `{}` with {:?}", expr, options);
      let result = expand(&expr, &options)
        .with_context(|| format!("could not expand `{}`", input.expression))?;
      match format {
        OutputFormat::Text => println!("{result}"),
        OutputFormat::Json => {
          println!("{}", expansion_report(&input.expression, &result))
        }
      }
    }
    Commands::Terms { input } => {
      let expr = parse_expr(&input.expression)
        .with_context(|| format!("could not parse `{}`", input.expression))?;
      let options = input.options();
      let result = expand(&expr, &options)
        .with_context(|| format!("could not expand `{}`", input.expression))?;
      if options.commutative {
        let collector = CommutativeTermCollector::new(options.parameters);
        for (signature, coefficient) in collector.monomials(&result)? {
          println!("{}\t{}", coefficient.to_expr(), signature.to_expr());
        }
      } else {
        for term in result.additive_terms() {
          println!("{term}");
        }
      }
    }
  }
  Ok(())
}
