mod config;
mod logger;
mod transform;

use std::fs;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use uniscript_core::{Transform, UniscriptCompiler};
use uniscript_sandbox::{Logger, Notification, instrument, relay};
use walkdir::WalkDir;

use crate::config::{Config, DEFAULT_CONFIG};
use crate::logger::TerminalLogger;
use crate::transform::{CommandTransform, ConfiguredTransform};

/// Extension of Uniscript sources picked up from directories.
const SOURCE_EXTENSION: &str = "uni";

/// Compile Uniscript sources into standalone HTML documents.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[arg(
        short = 'C',
        long,
        value_name = "PATH",
        help = "Config file (defaults to ./uniscript.toml when present)"
    )]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile a source file, a directory of sources, or stdin
    Compile {
        #[arg(short, long, help = "Source file or directory (defaults to stdin)")]
        input: Option<PathBuf>,

        #[arg(short, long, help = "Output file, or output directory for a directory input")]
        output: PathBuf,

        #[arg(long, help = "Inject the sandbox error shim into the document")]
        instrument: bool,
    },
    /// Print sandbox notifications (one JSON object per line)
    Relay {
        #[arg(short, long, help = "Notification stream (defaults to stdin)")]
        input: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    execute(cli)
}

fn execute(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load(path, true),
        None => Config::load(Path::new(DEFAULT_CONFIG), false),
    }
    .context("failed to load configuration")?;

    match cli.command {
        Commands::Compile {
            input,
            output,
            instrument,
        } => {
            let instrument = instrument || config.sandbox.instrument;
            let transform = match &config.transform.typescript {
                Some(command) => CommandTransform::new(command)
                    .map(ConfiguredTransform::Command)
                    .context("empty TypeScript transform command")?,
                None => ConfiguredTransform::Passthrough,
            };
            let mut compiler =
                UniscriptCompiler::with_transform(transform).with_options(config.compile);

            match input {
                Some(path) if path.is_dir() => {
                    compile_dir(&mut compiler, &path, &output, instrument)?
                }
                Some(path) => {
                    let source = fs::read_to_string(&path)
                        .with_context(|| format!("failed to read input file {}", path.display()))?;
                    compile_one(&mut compiler, &source, &output, instrument)?;
                }
                None => {
                    let mut source = String::new();
                    io::stdin().read_to_string(&mut source)?;
                    compile_one(&mut compiler, &source, &output, instrument)?;
                }
            }
            TerminalLogger.success("Compiled successfully!");
        }
        Commands::Relay { input } => {
            let reader: Box<dyn BufRead> = match &input {
                Some(path) => Box::new(BufReader::new(fs::File::open(path).with_context(
                    || format!("failed to open notification stream {}", path.display()),
                )?)),
                None => Box::new(io::stdin().lock()),
            };
            relay_stream(reader, &TerminalLogger)?;
        }
    }

    Ok(())
}

fn compile_one<T: Transform>(
    compiler: &mut UniscriptCompiler<T>,
    source: &str,
    output: &Path,
    instrument_output: bool,
) -> Result<()> {
    let html = compiler.compile(source)?;
    let html = if instrument_output {
        instrument(&html)
    } else {
        html
    };
    write_output(output, html.as_bytes())?;
    crate::log!("compile"; "{} blocks -> {}", compiler.blocks().len(), output.display());
    Ok(())
}

fn compile_dir<T: Transform>(
    compiler: &mut UniscriptCompiler<T>,
    root: &Path,
    output: &Path,
    instrument_output: bool,
) -> Result<()> {
    let mut compiled = 0;
    for entry in WalkDir::new(root).into_iter().filter_map(Result::ok) {
        let path = entry.path();
        if !path.is_file() || path.extension().is_none_or(|ext| ext != SOURCE_EXTENSION) {
            continue;
        }
        let relative = path.strip_prefix(root).unwrap_or(path);
        let target = output.join(relative).with_extension("html");
        let source = fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {}", path.display()))?;
        compile_one(compiler, &source, &target, instrument_output)
            .with_context(|| format!("failed to compile {}", path.display()))?;
        compiled += 1;
    }
    if compiled == 0 {
        bail!("no .{SOURCE_EXTENSION} sources found under {}", root.display());
    }
    Ok(())
}

/// Relay every notification line; lines that do not decode are reported
/// and skipped.
fn relay_stream<R: BufRead, L: Logger>(reader: R, logger: &L) -> Result<()> {
    for line in reader.lines() {
        let line = line.context("failed to read notification stream")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match Notification::from_json(line) {
            Ok(notification) => relay(&notification, logger),
            Err(err) => logger.error(&err.to_string()),
        }
    }
    Ok(())
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {parent:?}"))?;
        }
    }
    fs::write(path, bytes)
        .with_context(|| format!("failed to write output file {}", path.display()))?;
    Ok(())
}
