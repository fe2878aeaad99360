//! Termanim - Run a Command Behind a Terminal Animation
//!
//! Starts a command, animates while it runs, erases the animation, then
//! replays the command's captured output and exits with its status.
//!
//! # Usage
//!
//! ```bash
//! # Default arrow
//! termanim -- cargo build --release
//!
//! # Stacked char waves with a message
//! termanim --animation char-waves --height 4 --message "Building" -- make
//!
//! # Scrolling text, messages before and after
//! termanim -a scrolling-text -m "Hello" --start-msg "Working:" --end-msg "Done" -- ./job.sh
//!
//! # Drive the child process cooperatively instead of on a thread
//! termanim --cooperative -- sleep 3
//!
//! # Verbose logging (written to stderr)
//! RUST_LOG=termanim_core=debug termanim -- sleep 1
//! ```
//!
//! # Environment Variables
//!
//! - `TERMANIM_CONFIG`: Configuration file path
//! - `TERMANIM_ANIMATION`, `TERMANIM_WIDTH`, `TERMANIM_HEIGHT`, `TERMANIM_CHAR`,
//!   `TERMANIM_CADENCE_MS`, `TERMANIM_MESSAGE`: Animation settings
//! - `RUST_LOG`: Log filter (overrides `--log-level`)

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::{ExitCode, ExitStatus, Output, Stdio};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{debug, info, warn};

use termanim_core::{
    default_config_path, load_config_from_path, task, work, Animate, AnimateError,
    AnimationConfig, AnimationKind, Annotate, AsyncWork, ConfigOverrides, Work,
};

/// Termanim - run a command while a terminal animation plays
#[derive(Parser, Debug)]
#[command(name = "termanim")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Animation to draw (see --list)
    #[arg(short = 'a', long, value_name = "NAME")]
    animation: Option<AnimationKind>,

    /// Frame width in columns
    #[arg(short = 'w', long)]
    width: Option<usize>,

    /// Line count for stacked animations
    #[arg(long)]
    height: Option<usize>,

    /// Glyph for char waves
    #[arg(long = "char", value_name = "GLYPH")]
    character: Option<String>,

    /// Delay between frames in milliseconds
    #[arg(long, value_name = "MS")]
    cadence_ms: Option<u64>,

    /// Message after each frame (the scrolled text for scrolling-text)
    #[arg(short = 'm', long)]
    message: Option<String>,

    /// Restart scrolling text instead of settling on blank frames
    #[arg(long)]
    repeat: bool,

    /// Print this before the animation starts
    #[arg(long, value_name = "TEXT")]
    start_msg: Option<String>,

    /// Print this after the animation is erased
    #[arg(long, value_name = "TEXT")]
    end_msg: Option<String>,

    /// Configuration file path
    #[arg(short = 'c', long, env = "TERMANIM_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Await the command on an async runtime instead of blocking a thread
    #[arg(long)]
    cooperative: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, env = "TERMANIM_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// List the available animations and exit
    #[arg(long)]
    list: bool,

    /// Command to run, with its arguments
    #[arg(trailing_var_arg = true, required_unless_present = "list", value_name = "COMMAND")]
    command: Vec<String>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            kind: self.animation,
            width: self.width,
            height: self.height,
            character: self.character.clone(),
            cadence_ms: self.cadence_ms,
            message: self.message.clone(),
            repeat: self.repeat.then_some(true),
        }
    }

    fn annotate(&self) -> Option<Annotate> {
        if self.start_msg.is_none() && self.end_msg.is_none() {
            return None;
        }
        let mut annotate = Annotate::new().start_no_newline(true);
        if let Some(ref message) = self.start_msg {
            annotate = annotate.start_msg(format!("{message} "));
        }
        if let Some(ref message) = self.end_msg {
            annotate = annotate.end_msg(message.clone());
        }
        Some(annotate)
    }
}

/// The child process to run
#[derive(Debug)]
struct CommandLine<'a> {
    program: &'a str,
    args: &'a [String],
}

fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!("termanim={level},termanim_core={level}"))
    });

    // Stdout belongs to the animation and the replayed output.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// Resolve file, environment and CLI settings, then validate them
fn resolve_config(args: &Args) -> Result<AnimationConfig> {
    if let Some(ref path) = args.config {
        if !path.exists() {
            bail!("Config file {} does not exist", path.display());
        }
    }
    let path = args.config.clone().or_else(default_config_path);
    let mut config = load_config_from_path(path).context("Failed to load configuration")?;
    args.overrides().apply(&mut config);
    config.validate().context("Invalid animation settings")?;
    Ok(config)
}

fn run_direct(animate: Animate, annotate: Option<Annotate>, cmd: &CommandLine<'_>) -> Result<Output> {
    let animated = animate.wrap(work(|| {
        std::process::Command::new(cmd.program)
            .args(cmd.args)
            .stdin(Stdio::null())
            .output()
    }))?;

    let outcome = match annotate {
        Some(annotate) => annotate.wrap(animated)?.call(),
        None => {
            let mut animated = animated;
            animated.call()
        }
    };
    settle(outcome, cmd)
}

fn run_cooperative(
    animate: Animate,
    annotate: Option<Annotate>,
    cmd: &CommandLine<'_>,
) -> Result<Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let animated = animate.wrap(task(move || async move {
        tokio::process::Command::new(cmd.program)
            .args(cmd.args)
            .stdin(Stdio::null())
            .output()
            .await
    }))?;

    let outcome = match annotate {
        Some(annotate) => {
            let mut annotated = annotate.wrap(animated)?;
            runtime.block_on(annotated.call_async())
        }
        None => {
            let mut animated = animated;
            runtime.block_on(animated.call_async())
        }
    };
    settle(outcome, cmd)
}

/// The child's output, even when the animation could not be drawn
fn settle(
    outcome: Result<io::Result<Output>, AnimateError<io::Result<Output>>>,
    cmd: &CommandLine<'_>,
) -> Result<Output> {
    let output = match outcome {
        Ok(output) => output,
        Err(AnimateError::Render { source, outcome }) => {
            warn!(error = %source, "Animation stopped early");
            outcome
        }
        Err(error) => return Err(error).context("Animation failed"),
    };
    output.with_context(|| format!("Failed to run {}", cmd.program))
}

/// Write the child's captured output now that the animation is gone
fn replay(output: &Output) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&output.stdout)?;
    stdout.flush()?;
    let mut stderr = std::io::stderr().lock();
    stderr.write_all(&output.stderr)?;
    stderr.flush()?;
    Ok(())
}

/// Exit code mirroring the child's status
fn exit_code(status: ExitStatus) -> u8 {
    // No code means the child was killed by a signal.
    status
        .code()
        .map_or(1, |code| u8::try_from(code).unwrap_or(1))
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    init_logging(&args.log_level)?;

    if args.list {
        for kind in AnimationKind::ALL {
            println!("{kind}");
        }
        return Ok(ExitCode::SUCCESS);
    }

    let config = resolve_config(&args)?;
    info!(
        animation = %config.kind,
        width = config.effective_width(),
        source = %config.source(),
        "Configuration resolved"
    );

    let Some((program, rest)) = args.command.split_first() else {
        bail!("No command given");
    };
    let cmd = CommandLine {
        program: program.as_str(),
        args: rest,
    };

    let animate = Animate::from_config(&config)?
        .with_span(tracing::info_span!("animation", kind = %config.kind));
    let output = if args.cooperative {
        run_cooperative(animate, args.annotate(), &cmd)?
    } else {
        run_direct(animate, args.annotate(), &cmd)?
    };

    debug!(status = %output.status, "Command finished");
    replay(&output)?;
    Ok(ExitCode::from(exit_code(output.status)))
}
