//! `pacer`: terminal kiosk front-end for a paced token stream.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use pacer::{
    ApiClient, ConsoleDisplay, KeyInput, KioskConfig, SessionEvent, StreamSession, Typewriter,
    TypewriterConfig,
};
use std::path::PathBuf;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

/// Status lines cycled while output is held back.
const STALLING_TEXT: &[&str] = &[
    "Generating…",
    "Still generating…",
    "This is going to take a while.",
    "Still generating… *sigh*",
];

/// How long each stalling line stays up.
const STALL_STEP: Duration = Duration::from_secs(3);

/// Session poll timeout; bounds how late gate and status changes land.
const POLL_TIMEOUT: Duration = Duration::from_millis(50);

#[derive(Copy, Clone, Debug, Default, ValueEnum)]
enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Self::ERROR,
            LogLevel::Warn => Self::WARN,
            LogLevel::Info => Self::INFO,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Trace => Self::TRACE,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "pacer", about = "Paced token-streaming kiosk display")]
struct Cli {
    /// TOML config file
    #[arg(long, env = "PACER_CONFIG")]
    config: Option<PathBuf>,

    /// Token socket address (host:port)
    #[arg(long)]
    connect: Option<String>,

    /// Base URL of the script service
    #[arg(long)]
    api_host: Option<String>,

    /// Milliseconds between token releases
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Keep output held back this long, showing a status line
    #[arg(long, default_value_t = 0)]
    hold_ms: u64,

    /// Request a script for this audience prompt
    #[arg(long, conflicts_with = "ppt")]
    prompt: Option<String>,

    /// Request a person / place / thing script
    #[arg(long, num_args = 3, value_names = ["PERSON", "PLACE", "THING"])]
    ppt: Option<Vec<String>>,

    /// Typewrite this message before streaming
    #[arg(long)]
    welcome: Option<String>,

    /// Exit once the connection closes and every token is shown
    /// (q, Esc or Ctrl-C always quit)
    #[arg(long)]
    once: bool,

    /// Logging verbosity level (written to stderr); `RUST_LOG` takes precedence
    #[arg(long, default_value = "warn")]
    log_level: LogLevel,
}

impl Cli {
    /// File config with command-line overrides applied.
    fn kiosk_config(&self) -> anyhow::Result<KioskConfig> {
        let mut config = match &self.config {
            Some(path) => KioskConfig::from_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => KioskConfig::default(),
        };

        if let Some(addr) = &self.connect {
            config.stream_addr.clone_from(addr);
        }
        if let Some(host) = &self.api_host {
            config.api_host.clone_from(host);
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(cli.log_level, std::env::var("RUST_LOG").ok().as_deref()))
        .init();

    let config = cli.kiosk_config()?;
    let mut console = ConsoleDisplay::stdout()?;
    let keys = KeyInput::enable()?;

    if let Some(welcome) = &cli.welcome {
        typewrite(&mut console, config.typewriter(), welcome)?;
    }

    let mut session_config = config.session();
    session_config.start_running = config.start_running && cli.hold_ms == 0;
    let mut session = StreamSession::connect(&session_config)?;

    let generation = request_script(&cli, &config)?;
    stream(
        &mut session,
        &mut console,
        &keys,
        Duration::from_millis(cli.hold_ms),
        cli.once,
    )?;

    session.dispose();
    if let Some(handle) = generation {
        let _ = handle.join();
    }
    Ok(())
}

/// `RUST_LOG` directives when set and valid, otherwise the `--log-level` filter.
fn log_filter(level: LogLevel, rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::default().add_directive(LevelFilter::from(level).into()))
}

/// Type `text` onto the console with typewriter pacing.
fn typewrite(
    console: &mut ConsoleDisplay,
    config: TypewriterConfig,
    text: &str,
) -> pacer::Result<()> {
    let mut typewriter = Typewriter::with_config(config);
    typewriter.set_text(text);

    while let Some(delay) = typewriter.step() {
        console.render(typewriter.display())?;
        thread::sleep(delay);
    }
    console.render(typewriter.display())
}

/// Fire the script request on a background thread, if one was asked for.
fn request_script(cli: &Cli, config: &KioskConfig) -> anyhow::Result<Option<JoinHandle<()>>> {
    let client = ApiClient::new(config.api_host.as_str());

    let request: Box<dyn FnOnce() -> pacer::Result<()> + Send> = match (&cli.prompt, &cli.ppt) {
        (Some(prompt), _) => {
            let prompt = prompt.clone();
            Box::new(move || client.generate_script(&prompt))
        }
        (None, Some(ppt)) => {
            let (person, place, thing) = (ppt[0].clone(), ppt[1].clone(), ppt[2].clone());
            Box::new(move || client.generate_script_ppt(&person, &place, &thing))
        }
        (None, None) => return Ok(None),
    };

    let handle = thread::Builder::new()
        .name("pacer-generate".to_string())
        .spawn(move || match request() {
            Ok(()) => tracing::info!("script ready"),
            Err(e) => tracing::error!(error = %e, "script request failed"),
        })?;
    Ok(Some(handle))
}

/// Main display loop: hold, then reveal tokens as the session releases them.
///
/// Returns when a quit key is pressed, or with `once` after the stream ends.
fn stream(
    session: &mut StreamSession,
    console: &mut ConsoleDisplay,
    keys: &KeyInput,
    hold: Duration,
    once: bool,
) -> anyhow::Result<()> {
    let started = Instant::now();
    let mut stall_line = None;
    let mut finished = false;

    loop {
        if keys.quit_requested()? {
            tracing::info!("quit requested");
            return Ok(());
        }

        if !session.run_gate() {
            let elapsed = started.elapsed();
            if elapsed >= hold {
                console.clear_status()?;
                session.set_run_gate(true);
            } else {
                let line = stall_index(elapsed);
                if stall_line != Some(line) {
                    console.show_status(STALLING_TEXT[line])?;
                    stall_line = Some(line);
                }
            }
        }

        match session.poll(POLL_TIMEOUT) {
            Some(SessionEvent::Released(_)) => console.render(session.display())?,
            Some(SessionEvent::Connected) => finished = false,
            Some(SessionEvent::Disconnected { .. } | SessionEvent::TransportClosed) => {
                finished = true;
            }
            _ => {}
        }

        if once && finished && session.run_gate() && session.is_drained() {
            return Ok(());
        }
    }
}

/// Which stalling line to show after `elapsed` of holding.
fn stall_index(elapsed: Duration) -> usize {
    let step = usize::try_from(elapsed.as_millis() / STALL_STEP.as_millis()).unwrap_or(usize::MAX);
    step.min(STALLING_TEXT.len() - 1)
}
