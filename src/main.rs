use std::fs::File;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::terminal;
use log::{info, warn};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use noisequiz::audio;
use noisequiz::config::{config_path, load_config};
use noisequiz::tui;
use noisequiz::{AudioPlayback, Catalog, Controller, NullPlayback};

#[derive(Parser)]
#[command(name = "noisequiz")]
#[command(about = "Name the noise: a listening quiz for the terminal")]
#[command(after_help = "WAV files are not bundled. Put them where the \"audio\" paths in \
sounds.json point, relative to the data dir (data/sounds/*.wav for the sample data). \
Sounds whose files are missing are left out of every round.")]
struct Args {
    /// Directory holding sounds.json, recipients.json and the WAV files
    /// they reference [default: current directory]
    data_dir: Option<PathBuf>,

    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fixed seed for reproducible rounds
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let args = Args::parse();
    let data_dir = args
        .data_dir
        .clone()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());
    let config = load_config(config_path(args.config.as_deref(), &data_dir).as_deref());
    init_logging(args.log_file.as_ref().or(config.log_file.as_ref()))?;
    info!("data dir {}", data_dir.display());

    let playback: Box<dyn AudioPlayback> =
        match audio::start_audio(data_dir.clone(), config.master_gain(), config.sample_rate()) {
            Ok(handle) => Box::new(handle),
            Err(e) => {
                warn!("no audio output ({e:#}), playing silently");
                Box::new(NullPlayback)
            }
        };

    let catalog = Catalog::load(&data_dir);
    let mut controller = Controller::new(catalog, config.rules(), playback, args.seed);
    if controller.preload_catalog() == 0 {
        warn!(
            "no playable sounds under {}, see --help for where the WAV files go",
            data_dir.display()
        );
    }

    terminal::enable_raw_mode()?;
    let _guard = RawModeGuard; // restores the terminal however we leave
    let backend = CrosstermBackend::new(std::io::stdout());
    let mut term = Terminal::new(backend)?;
    term.clear()?;

    let tick_rate = Duration::from_millis(16); // ~60fps
    let mut last_tick = Instant::now();
    let blink_start = Instant::now();

    loop {
        let blink_on = (blink_start.elapsed().as_millis() / 250) % 2 == 0;
        let ds = controller.display_state();
        term.draw(|frame| {
            let area = frame.area();
            tui::view::render(frame, area, &ds, blink_on);
        })?;

        for event in tui::input::poll_input(tick_rate)? {
            if !controller.handle_input(event) {
                term.clear()?;
                return Ok(());
            }
        }

        let elapsed = last_tick.elapsed().as_secs_f64();
        last_tick = Instant::now();
        controller.tick(elapsed);
    }
}

// The TUI owns the terminal, so logs only go somewhere useful when piped to a file.
fn init_logging(log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        None => {
            builder.filter_level(log::LevelFilter::Off);
        }
    }
    builder.init();
    Ok(())
}

struct RawModeGuard;
impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}
