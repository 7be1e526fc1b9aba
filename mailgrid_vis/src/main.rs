//! MailGrid Visualizer CLI
//!
//! Loads a playback record (and optionally a map), replays it through the
//! playback driver, and writes the resulting SVG page.

use clap::Parser;
use mailgrid_core::{GridConfig, GridMap, PlaybackState, Record, SvgScene, VisError};
use mailgrid_env::TokioContext;
use mailgrid_vis::{ReplaySchedule, VirtualClock};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Render robot playback records as animated SVG pages
#[derive(Parser, Debug)]
#[command(name = "mailgrid-vis")]
#[command(about = "Replay a mailgrid robot record onto an SVG grid", long_about = None)]
struct Args {
    /// Playback record JSON (`{init, data}`)
    #[arg(short, long)]
    record: String,

    /// Map JSON (`{cells, span}`); without it the grid extent is derived
    /// from the record
    #[arg(short, long)]
    map: Option<String>,

    /// Output HTML path
    #[arg(short, long, default_value = "visualization.html")]
    out: String,

    /// Replay all frames on the scheduler before writing the page
    #[arg(long)]
    replay: bool,

    /// With --replay: drive the schedule on a virtual clock (no real delay)
    #[arg(long)]
    instant: bool,

    /// Advance through frames 0..=N instantly, then write the snapshot
    #[arg(short, long, conflicts_with = "replay")]
    frame: Option<usize>,

    /// Seconds of animation per unit of move cost
    #[arg(short, long, default_value = "0.5")]
    speed: f64,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

async fn run(args: &Args) -> Result<(), VisError> {
    let record = Record::load(&args.record)?;
    info!(
        "loaded record: {} robots, {} frames",
        record.robot_count(),
        record.frame_count()
    );

    let config = GridConfig {
        speed: args.speed,
        ..GridConfig::default()
    };
    config.validate()?;

    let scene = match &args.map {
        Some(path) => {
            let map = GridMap::load(path)?;
            info!("loaded map: {}x{} cells", map.rows(), map.cols());
            SvgScene::from_map(map, config)
        }
        None => SvgScene::from_record(&record, config),
    };

    let robots = scene.spawn_robots(&record);
    let mut state = PlaybackState::new(&record, robots)?;

    if args.replay {
        let schedule = ReplaySchedule::build(record.frame_count(), &config)?;
        if args.instant {
            let clock = VirtualClock::new();
            schedule.run(&clock, &mut state, &record, &config).await?;
        } else {
            let ctx = TokioContext::new();
            schedule.run(&ctx, &mut state, &record, &config).await?;
        }
        info!("replayed {} frames", record.frame_count());
    } else if let Some(last) = args.frame {
        for frame in 0..=last {
            state.advance(&record, frame, &config)?;
        }
        info!("advanced through frame {}", last);
    }

    let html = scene.render_html(state.visuals());
    std::fs::write(&args.out, html)?;
    info!("wrote {}", args.out);
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    if let Err(e) = run(&args).await {
        error!("{}", e);
        std::process::exit(1);
    }
}
