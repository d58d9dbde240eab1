//! Command-line interface for the sketchgrid utility
//!
//! Reads flowchart or sequence diagram markup from a file or stdin and
//! writes the rendered grid to a file or stdout.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use sketchgrid::core::logging::init_logging;
use sketchgrid::plugins::Dispatcher;
use sketchgrid::{CharacterSet, RenderConfig};

/// Sketchgrid - render diagram markup as character art
#[derive(Parser)]
#[command(name = "sketchgrid")]
#[command(about = "Render flowchart and sequence diagram markup as box-drawing character art")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, global = true)]
    pub log_format: Option<LogFormat>,
}

/// Log level options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a diagram to character art
    Render {
        /// Input file containing the diagram markup (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file for the rendered grid (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Draw with plain ASCII instead of box-drawing characters
        #[arg(long)]
        ascii: bool,
    },

    /// Print the detected diagram kind
    Detect {
        /// Input file to analyze (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

/// Main CLI application
pub struct SketchgridApp {
    dispatcher: Dispatcher,
}

impl SketchgridApp {
    pub fn new() -> Self {
        Self::with_config(RenderConfig::default())
    }

    pub fn with_config(config: RenderConfig) -> Self {
        Self {
            dispatcher: Dispatcher::with_config(config),
        }
    }

    /// Run the application with the given CLI arguments
    ///
    /// Flags left unset fall through to the environment and the library
    /// defaults in [`init_logging`].
    pub fn run(mut self, cli: Cli) -> Result<()> {
        let level = cli.log_level.map(|level| level.as_str());
        let format = cli.log_format.map(|format| format.as_str());

        if let Err(e) = init_logging(level, format) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Sketchgrid v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Render {
                input,
                output,
                ascii,
            } => {
                if ascii {
                    self.dispatcher =
                        Dispatcher::with_config(RenderConfig::new(CharacterSet::Ascii));
                }
                self.render_command(input, output, cli.verbose)
            }
            Commands::Detect { input } => self.detect_command(input, cli.verbose),
        }
    }

    fn render_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input.as_deref())?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let art = self
            .dispatcher
            .render(&content)
            .context("Failed to render diagram")?;
        debug!(bytes = art.len(), "Rendered diagram");

        self.write_output(output.as_deref(), &art)
    }

    fn detect_command(&self, input: Option<PathBuf>, verbose: bool) -> Result<()> {
        let content = self.read_input(input.as_deref())?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        println!("{}", self.dispatcher.detect(&content));
        Ok(())
    }

    /// Read input from a file, or stdin when the path is absent or `-`
    pub fn read_input(&self, input: Option<&Path>) -> Result<String> {
        match input {
            Some(path) if !is_stdio(path) => fs::read_to_string(path)
                .with_context(|| format!("Failed to read input file '{}'", path.display())),
            _ => {
                let mut content = String::new();
                io::stdin()
                    .read_to_string(&mut content)
                    .context("Failed to read stdin")?;
                Ok(content)
            }
        }
    }

    /// Write output to a file, or stdout when the path is absent or `-`
    ///
    /// Stdout always ends with a newline; files get the grid unchanged.
    pub fn write_output(&self, output: Option<&Path>, content: &str) -> Result<()> {
        match output {
            Some(path) if !is_stdio(path) => fs::write(path, content)
                .with_context(|| format!("Failed to write output file '{}'", path.display())),
            _ => {
                let mut stdout = io::stdout().lock();
                if content.ends_with('\n') {
                    write!(stdout, "{}", content)?;
                } else {
                    writeln!(stdout, "{}", content)?;
                }
                stdout.flush()?;
                Ok(())
            }
        }
    }
}

impl Default for SketchgridApp {
    fn default() -> Self {
        Self::new()
    }
}

fn is_stdio(path: &Path) -> bool {
    path == Path::new("-")
}
