use anyhow::{Context, Result};
use cover_drive::{
    config::Config,
    cues,
    engine::Engine,
    error::Error,
    evaluate::{evaluate_shot, ShotEvaluation},
    metrics::Extractor,
    provider::JsonLinesProvider,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};
use structopt::StructOpt;
use tracing::{debug, info, warn};
use tracing_subscriber::layer::SubscriberExt;

#[derive(structopt::StructOpt)]
struct Opt {
    /// Recorded pose landmarks, one JSON object per frame per line.
    #[structopt(parse(from_os_str))]
    landmarks: PathBuf,

    /// TOML file overriding thresholds and extractor settings.
    #[structopt(short, long, parse(from_os_str))]
    config: Option<PathBuf>,

    /// Where to write the shot evaluation.
    #[structopt(short, long, default_value = "evaluation.json", parse(from_os_str))]
    output: PathBuf,

    /// Number of extraction worker threads.
    #[structopt(short, long, default_value = "4")]
    workers: usize,

    #[structopt(short = "-q", long, default_value = "64")]
    queue_size: usize,

    #[structopt(short, long, default_value = "info", env = "RUST_LOG")]
    log_level: tracing_subscriber::filter::EnvFilter,

    #[structopt(short, long)]
    show_progress: bool,
}

fn write_evaluation(evaluation: &ShotEvaluation, path: &Path) -> Result<(), Error> {
    let json = serde_json::to_string_pretty(evaluation).map_err(Error::SerializeEvaluation)?;
    std::fs::write(path, json).map_err(|e| Error::WriteEvaluation(e, path.to_path_buf()))
}

fn main() -> Result<()> {
    let opt = Opt::from_args();

    tracing::subscriber::set_global_default(
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer())
            .with(opt.log_level),
    )?;

    let config = match &opt.config {
        Some(path) => Config::load(path).context("failed loading config")?,
        None => Config::default(),
    };

    let file = File::open(&opt.landmarks)
        .with_context(|| format!("failed opening {}", opt.landmarks.display()))?;
    let provider = JsonLinesProvider::new(BufReader::new(file));

    let running = Arc::new(AtomicBool::new(true));
    let running_ctrl_c = running.clone();

    ctrlc::set_handler(move || {
        running_ctrl_c.store(false, Ordering::SeqCst);
    })
    .context("failed setting Ctrl-C handler")?;

    let pb_frames = if opt.show_progress {
        Some(
            ProgressBar::new_spinner().with_style(
                ProgressStyle::default_spinner()
                    .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
                    .template("{prefix:.bold.dim} {spinner} {wide_msg}"),
            ),
        )
    } else {
        None
    };

    let mut engine = Engine::new(
        provider,
        Extractor::new(config.extractor),
        opt.workers,
        opt.queue_size,
    );

    let metrics = match engine.run(&running, |index| {
        if let Some(pb) = pb_frames.as_ref() {
            pb.set_message(format!("frame {}", index));
            pb.inc(1);
        }
    }) {
        Ok(metrics) => metrics,
        Err(Error::Interrupted) => {
            warn!("interrupted, shot not evaluated");
            return Ok(());
        }
        Err(e) => return Err(e).context("failed extracting frame metrics"),
    };

    if let Some(pb) = pb_frames.as_ref() {
        pb.finish_and_clear();
    }

    for m in &metrics {
        let frame_cues = cues::live_cues(m, &config.evaluator.cues);
        if !frame_cues.is_empty() {
            debug!(
                frame = m.frame_index,
                time = m.timestamp_seconds,
                cues = ?frame_cues.iter().map(|c| c.message()).collect::<Vec<_>>()
            );
        }
    }

    let evaluation = evaluate_shot(&metrics, &config.evaluator);

    let stats = engine.stats();
    info!(
        frames = stats.frames_read,
        with_pose = stats.frames_with_pose,
        seconds = stats.processing_time.as_secs_f64(),
        fps = stats.average_fps(),
        "processing complete"
    );

    write_evaluation(&evaluation, &opt.output).context("failed saving evaluation")?;
    info!(path = %opt.output.display(), "evaluation saved");

    info!(overall = evaluation.overall_score, "shot scores");
    for (category, score) in &evaluation.scores {
        info!(%category, score = score.score, feedback = %score.feedback);
    }
    for tip in &evaluation.recommendations {
        info!(recommendation = %tip);
    }

    Ok(())
}
