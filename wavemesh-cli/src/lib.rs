/// Command line front end: arguments, path resolution and file handling
use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::{Component, Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use thiserror::Error;
use wavemesh_core::{encode, MeshStats, TextParser};

/// Output file name used when `-o` is not given
pub const DEFAULT_OUTPUT: &str = "output.bin";

/// Convert a text geometry file into a binary mesh.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "wavemesh",
    about = "Convert text geometry (v/vt/vn/f) into a binary mesh",
    long_about = "Convert text geometry (v/vt/vn/f) into a binary mesh.\n\n\
        OUTPUT LAYOUT (little-endian):\n\
          i32    byte length of the vertex data\n\
          f32[]  interleaved vertex records (position, tex coord, normal)\n\
          u16[]  triangle/polygon indices\n\
        \n\
        EXAMPLES:\n\
          wavemesh -f models/cube.obj\n\
          wavemesh --file models/cube.obj --output static/cube.bin",
    version
)]
pub struct Args {
    /// Input geometry file.
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Where to write the binary mesh.
    #[arg(short = 'o', long = "output", value_name = "FILE", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Default `env_logger` filter; `RUST_LOG` takes precedence
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("no input file specified (use -f/--file)")]
    MissingInputFile,

    #[error("input file does not exist: {}", .0.display())]
    InputNotFound(PathBuf),
}

/// Absolute input and output paths for one conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertConfig {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl ConvertConfig {
    /// Resolve `args` against the working directory `cwd`
    pub fn resolve(args: &Args, cwd: &Path) -> Result<Self, CliError> {
        let file = args.file.as_deref().ok_or(CliError::MissingInputFile)?;

        let input = absolutize(cwd, file);
        if !input.exists() {
            return Err(CliError::InputNotFound(input));
        }

        Ok(Self {
            input,
            output: absolutize(cwd, &args.output),
        })
    }
}

/// Join `path` onto `cwd` and fold `.` and `..` components lexically
fn absolutize(cwd: &Path, path: &Path) -> PathBuf {
    let mut resolved = PathBuf::new();
    for component in cwd.join(path).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            other => resolved.push(other.as_os_str()),
        }
    }
    resolved
}

/// Run one conversion.
///
/// The input is parsed and encoded completely before the output file is
/// created, so a failed parse never leaves a file behind.
pub fn run(config: &ConvertConfig) -> anyhow::Result<MeshStats> {
    let input = File::open(&config.input)
        .with_context(|| format!("failed to open {}", config.input.display()))?;

    let mut parser = TextParser::new();
    parser
        .read(BufReader::new(input))
        .with_context(|| format!("failed to parse {}", config.input.display()))?;
    let (mesh, stats) = parser.finish();
    let bytes = encode(&mesh).context("failed to encode mesh")?;

    if let Err(err) = write_output(&config.output, &bytes) {
        if fs::remove_file(&config.output).is_ok() {
            log::warn!("removed partial output {}", config.output.display());
        }
        return Err(err);
    }

    log::debug!(
        "{} unique vertices, {} indices, {} bytes",
        stats.unique_vertices,
        stats.indices,
        bytes.len()
    );
    Ok(stats)
}

fn write_output(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    let mut output =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    output
        .write_all(bytes)
        .and_then(|_| output.flush())
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
