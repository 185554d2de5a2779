use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use memory_pilot::config::{validate_config, Config, ConfigLoader};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "memory-pilot", version, about = "Telemetry reader and waypoint pilot")]
struct Cli {
    /// Configuration file
    #[arg(short, long, default_value = "pilot.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
#[cfg_attr(not(windows), allow(dead_code))]
enum Commands {
    /// Print the player's coordinates
    Coords {
        /// Number of reads (0 = until Ctrl+C)
        #[arg(short = 'n', long, default_value_t = 0)]
        count: u64,
        /// Seconds between reads
        #[arg(short, long, default_value_t = 1.0)]
        delay: f64,
        /// Stop after this many seconds (0 = no limit)
        #[arg(short, long, default_value_t = 0)]
        time: u64,
        /// Also print the raw IEEE-754 bits
        #[arg(long)]
        hex: bool,
        /// Only print when the position changes
        #[arg(short, long)]
        quiet: bool,
    },
    /// Print player vitals and the resolved addresses
    Status,
    /// Record a waypoint path from live movement
    Record {
        /// Output file, defaults to navigation.path_file
        #[arg(short, long)]
        path: Option<PathBuf>,
    },
    /// Follow a recorded path back and forth
    Navigate {
        /// Path file, defaults to navigation.path_file
        #[arg(short, long)]
        path: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ConfigLoader::new(&cli.config)
        .load_or_default()
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;
    validate_config(&config)?;

    init_logging(&config)?;
    info!("Starting Memory-Pilot v{}", memory_pilot::VERSION);

    run(cli.command, config).await
}

fn init_logging(config: &Config) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(format!("memory_pilot={}", config.logging.level))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
    Ok(())
}

#[cfg(not(windows))]
async fn run(_command: Commands, _config: Config) -> Result<()> {
    anyhow::bail!("live attachment requires Windows")
}

#[cfg(windows)]
async fn run(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Coords {
            count,
            delay,
            time,
            hex,
            quiet,
        } => {
            let opts = live::CoordsOptions {
                count,
                delay,
                time,
                hex,
                quiet,
            };
            live::coords(&config, opts).await
        }
        Commands::Status => live::status(&config).await,
        Commands::Record { path } => {
            let file = path.unwrap_or_else(|| config.navigation.path_file.clone());
            live::record(&config, file).await
        }
        Commands::Navigate { path } => {
            let file = path.unwrap_or_else(|| config.navigation.path_file.clone());
            live::navigate(&config, file).await
        }
    }
}

#[cfg(windows)]
mod live {
    use anyhow::{bail, Result};
    use memory_pilot::config::Config;
    use memory_pilot::input::{
        ForegroundWindow, InputActuator, SendInputInjector, WindowActivator,
    };
    use memory_pilot::memory::MemoryClient;
    use memory_pilot::navigation::{
        read_path, shared, Command, NavigationController, PathRecorder, PathStore, WaypointPath,
    };
    use memory_pilot::process::{self, ProcessHandle};
    use memory_pilot::resolver::AddressResolver;
    use memory_pilot::telemetry::{TelemetryReader, TelemetrySource};
    use memory_pilot::{CancelToken, Vec3};
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::time::{Duration, Instant};
    use tokio::sync::watch;
    use tokio::time::{interval, MissedTickBehavior};
    use tracing::{debug, info, warn};

    type LiveReader = TelemetryReader<Arc<ProcessHandle>>;

    pub struct CoordsOptions {
        pub count: u64,
        pub delay: f64,
        pub time: u64,
        pub hex: bool,
        pub quiet: bool,
    }

    /// Cancelled on the first Ctrl+C
    fn cancel_on_ctrl_c() -> CancelToken {
        let cancel = CancelToken::new();
        let token = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Ctrl+C received");
                token.cancel();
            }
        });
        cancel
    }

    /// Attach, resolve addresses off the runtime threads, and build a reader
    async fn connect(config: &Config, cancel: &CancelToken) -> Result<LiveReader> {
        let handle = Arc::new(process::attach(&config.target)?);
        let profile = config.target.offset_profile();
        let scan = config.scanner.scan_options();
        let client = MemoryClient::new(handle, profile.architecture);
        let cancel = cancel.clone();

        let (client, resolver) = tokio::task::spawn_blocking(move || {
            AddressResolver::initialize(&client, profile, &scan, &cancel).map(|r| (client, r))
        })
        .await??;

        info!("Addresses resolved ({})", resolver.scheme());
        Ok(TelemetryReader::new(client, resolver))
    }

    fn print_coords(position: Vec3, hex: bool) {
        println!(
            "X: {:.4}  Y: {:.4}  Z: {:.4}",
            position.x, position.y, position.z
        );
        if hex {
            let [x, y, z] = position.hex_bits();
            println!("   {}  {}  {}", x, y, z);
        }
    }

    pub async fn coords(config: &Config, opts: CoordsOptions) -> Result<()> {
        if !(opts.delay.is_finite() && opts.delay > 0.0) {
            bail!("delay must be a positive number of seconds");
        }
        let cancel = cancel_on_ctrl_c();
        let mut reader = connect(config, &cancel).await?;

        let started = Instant::now();
        let limit = (opts.time > 0).then(|| Duration::from_secs(opts.time));
        let mut ticker = interval(Duration::from_secs_f64(opts.delay));
        let mut last: Option<Vec3> = None;
        let mut reads = 0u64;

        while !cancel.is_cancelled() {
            ticker.tick().await;
            let snapshot = reader.read();
            match snapshot.fault() {
                None => {
                    let position = snapshot.position();
                    if !opts.quiet || last != Some(position) {
                        print_coords(position, opts.hex);
                    }
                    last = Some(position);
                }
                Some(fault) if !opts.quiet => println!("Coordinates unavailable: {}", fault),
                Some(_) => {}
            }

            reads += 1;
            if opts.count > 0 && reads >= opts.count {
                break;
            }
            if limit.is_some_and(|limit| started.elapsed() >= limit) {
                break;
            }
        }
        Ok(())
    }

    pub async fn status(config: &Config) -> Result<()> {
        let cancel = cancel_on_ctrl_c();
        let mut reader = connect(config, &cancel).await?;
        let resolver = reader.resolver();
        let addresses = resolver.addresses();

        println!("Profile: {}", resolver.profile().name);
        println!("Scheme:  {}", resolver.scheme());
        println!("Module:  {}", resolver.module_base());
        println!(
            "Fields:  x={} y={} z={} facing=({}, {})",
            addresses.x, addresses.y, addresses.z, addresses.facing_x, addresses.facing_y
        );

        match reader.player_info() {
            Some(player) => println!("{}", player),
            None => println!("Player module not loaded"),
        }

        let snapshot = reader.read();
        match snapshot.fault() {
            None => {
                let p = snapshot.position();
                let o = snapshot.orientation();
                println!("Position: ({:.2}, {:.2}, {:.2})", p.x, p.y, p.z);
                println!("Facing:   ({:.3}, {:.3})", o.x, o.y);
            }
            Some(fault) => println!("Telemetry: {}", fault),
        }
        Ok(())
    }

    pub async fn record(config: &Config, file: PathBuf) -> Result<()> {
        let cancel = cancel_on_ctrl_c();
        let mut reader = connect(config, &cancel).await?;
        let mut window = ForegroundWindow::new(config.target.window_classes.clone());
        if let Err(e) = window.activate() {
            warn!("Could not focus the target window: {}", e);
        }

        let recorder = PathRecorder::new(shared(WaypointPath::new()), config.recorder.min_spacing);
        let mut ticker = interval(Duration::from_millis(config.recorder.poll_interval_ms));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!("Recording to {}, press Ctrl+C to stop", file.display());

        while !cancel.is_cancelled() {
            ticker.tick().await;
            let snapshot = reader.read();
            if snapshot.is_valid() && recorder.observe(snapshot.position()) {
                let p = snapshot.position();
                let count = read_path(recorder.path()).len();
                println!("#{:<4} ({:.2}, {:.2})", count, p.x, p.y);
            }
        }

        let path = read_path(recorder.path()).clone();
        if path.is_empty() {
            warn!("No waypoints recorded, nothing saved");
            return Ok(());
        }
        PathStore::new(&file).save(&path)?;
        Ok(())
    }

    pub async fn navigate(config: &Config, file: PathBuf) -> Result<()> {
        let path = PathStore::new(&file).load()?;
        let mut controller = NavigationController::new(shared(path), config.navigation.tuning())?;

        let cancel = CancelToken::new();
        let (commands_tx, commands) = watch::channel(Command::Resume);
        {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    info!("Ctrl+C received, stopping");
                    cancel.cancel();
                    let _ = commands_tx.send(Command::StopAll);
                }
            });
        }

        let mut reader = connect(config, &cancel).await?;
        let mut actuator = InputActuator::new(SendInputInjector);
        let mut window = ForegroundWindow::new(config.target.window_classes.clone());
        let mut ticker = interval(config.navigation.tick_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            let stopping = matches!(*commands.borrow(), Command::StopAll);
            if !stopping {
                if let Err(e) = window.activate() {
                    warn!("Skipping tick, target window not focusable: {}", e);
                    continue;
                }
            }

            let directives = controller.tick(&mut reader, &mut actuator, &commands);
            if let Some(e) = controller.last_error().filter(|e| !e.is_transient()) {
                warn!("Navigation stalled: {}", e);
            }
            if !directives.is_empty() {
                debug!(
                    "Waypoint {} ({:?}, {:?}): {}",
                    controller.index(),
                    controller.direction(),
                    controller.state(),
                    directives
                );
            }
            if stopping {
                break;
            }
        }

        actuator.release_all()?;
        info!("Navigation stopped, all keys released");
        Ok(())
    }
}
