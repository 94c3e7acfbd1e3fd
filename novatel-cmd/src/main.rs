mod receiver;
mod render;

use std::fs::File;
use std::io::{stderr, stdin, stdout, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use novatel::framing::{read_frames, RawFrame, ScanOpts, Scanner};
use novatel::messages::decode;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use receiver::LogName;
use render::{Format, Renderer};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available serial ports.
    Ports,
    /// Request logs from a receiver connected to a serial port.
    ///
    /// Each log is requested once using a `LOG <name> ONCE` command and the first
    /// binary log received afterwards is decoded and printed.
    Read {
        /// Serial port device, e.g., /dev/ttyUSB0 or COM3.
        #[arg(short, long)]
        port: String,

        /// Serial port baud rate.
        #[arg(short, long, default_value_t = 9600)]
        baud: u32,

        /// Logs to request, in order.
        #[arg(short, long, value_delimiter = ',', default_values = ["versionb", "bestposb"])]
        log: Vec<LogName>,

        /// Time allowed for each log to arrive.
        #[arg(long, default_value_t = 10_000, value_name = "ms")]
        timeout_ms: u64,

        /// Wait for each log until it arrives or the program is interrupted.
        #[arg(long, action, conflicts_with = "timeout_ms")]
        no_timeout: bool,

        /// Delay between sending a log command and reading the reply.
        #[arg(long, default_value_t = 1000, value_name = "ms")]
        settle_ms: u64,

        /// Do not send a serial break before the first command.
        ///
        /// The break resets a receiver port left in an unknown mode, but also
        /// stops any logs already scheduled on it.
        #[arg(long, action)]
        no_break: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: Format,
    },
    /// Decode binary logs from captured receiver output.
    Decode {
        /// Input file, or - for stdin.
        input: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: Format,
    },
}

fn print_frame(renderer: &Renderer, frame: &RawFrame) -> Result<()> {
    match decode(frame) {
        Ok(Some(record)) => {
            let out = renderer.render(frame, &record)?;
            writeln!(stdout(), "{out}").context("writing to stdout")
        }
        Ok(None) => {
            debug!(message_id = frame.message_id(), "skipping undecoded log");
            Ok(())
        }
        Err(err) => {
            warn!("failed to decode message {}: {err}", frame.message_id());
            Ok(())
        }
    }
}

fn read(
    port: &str,
    baud: u32,
    logs: &[LogName],
    opts: &ScanOpts,
    settle: Duration,
    send_break: bool,
    renderer: &Renderer,
) -> Result<()> {
    let mut port = receiver::open(port, baud)?;
    if send_break {
        receiver::send_break(&mut *port)?;
    }
    receiver::discard_pending(&mut *port)?;

    for log in logs {
        receiver::request_log(&mut *port, *log, settle)?;

        let mut scanner = Scanner::new(&mut port, opts.clone());
        match scanner.next_frame() {
            Ok(Some(frame)) => print_frame(renderer, &frame)?,
            Ok(None) => bail!("port closed while waiting for {}", log.command_name()),
            Err(err) if err.is_timeout() => {
                writeln!(stdout(), "timeout retrieving {}", log.command_name())
                    .context("writing to stdout")?;
            }
            Err(err) => {
                return Err(err).with_context(|| format!("reading {}", log.command_name()))
            }
        }
        debug!("{:?}", scanner.stats);
    }

    Ok(())
}

fn decode_input(input: &Path, renderer: &Renderer) -> Result<()> {
    let reader: Box<dyn Read + Send> = if input.as_os_str() == "-" {
        Box::new(BufReader::new(stdin()))
    } else {
        let file = File::open(input).with_context(|| format!("opening input {input:?}"))?;
        Box::new(BufReader::new(file))
    };

    let mut frames = read_frames(reader, ScanOpts::new().without_timeout());
    for frame in frames.by_ref() {
        let frame = frame.context("reading input")?;
        print_frame(renderer, &frame)?;
    }

    let stats = frames.stats();
    info!(
        "{} frames, {} checksum mismatches, {} malformed, {} bytes skipped",
        stats.frames, stats.checksum_mismatches, stats.malformed, stats.skipped_bytes
    );
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(stderr)
        .with_ansi(false)
        .without_time()
        .with_env_filter(
            EnvFilter::try_from_env("NOVATEL_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    debug!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    match &cli.command {
        Commands::Ports => receiver::list_ports(),
        Commands::Read {
            port,
            baud,
            log,
            timeout_ms,
            no_timeout,
            settle_ms,
            no_break,
            format,
        } => {
            let opts = if *no_timeout {
                ScanOpts::new().without_timeout()
            } else {
                ScanOpts::new().with_timeout(Duration::from_millis(*timeout_ms))
            };
            info!("reading {log:?} from {port} at {baud} baud");
            read(
                port,
                *baud,
                log,
                &opts,
                Duration::from_millis(*settle_ms),
                !no_break,
                &Renderer::new(format)?,
            )
        }
        Commands::Decode { input, format } => decode_input(input, &Renderer::new(format)?),
    }
}
