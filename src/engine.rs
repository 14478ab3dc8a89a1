use crate::{
    error::Error,
    metrics::{Extractor, FrameMetrics},
    pose::Pose,
    provider::LandmarkProvider,
};
use std::{
    sync::atomic::{AtomicBool, Ordering},
    time::{Duration, Instant},
};
use tracing::{debug, info};

/// Counters for one run over a shot.
#[derive(Debug, Copy, Clone, Default)]
pub struct Stats {
    pub frames_read: usize,
    pub frames_with_pose: usize,
    pub processing_time: Duration,
}

impl Stats {
    pub fn average_fps(&self) -> f64 {
        let secs = self.processing_time.as_secs_f64();
        if secs > 0.0 {
            self.frames_read as f64 / secs
        } else {
            0.0
        }
    }
}

/// Pulls frames from a provider and extracts metrics on a pool of workers.
pub struct Engine<P> {
    provider: P,
    extractor: Extractor,
    workers: usize,
    queue_size: usize,
    stats: Stats,
}

impl<P> Engine<P>
where
    P: LandmarkProvider,
{
    pub fn new(provider: P, extractor: Extractor, workers: usize, queue_size: usize) -> Self {
        Self {
            provider,
            extractor,
            workers: workers.max(1),
            queue_size: queue_size.max(1),
            stats: Stats::default(),
        }
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Extract metrics for every frame with a pose, sorted by frame index.
    ///
    /// Frames are read on the calling thread while workers run the extractor.
    /// Clearing `running` stops reading and yields [`Error::Interrupted`].
    /// `on_frame` is called once per frame read.
    pub fn run<F>(
        &mut self,
        running: &AtomicBool,
        mut on_frame: F,
    ) -> Result<Vec<FrameMetrics>, Error>
    where
        F: FnMut(u64),
    {
        let start = Instant::now();
        let extractor = &self.extractor;
        let provider = &mut self.provider;
        let stats = &mut self.stats;
        let workers = self.workers;
        let queue_size = self.queue_size;

        info!(workers, queue_size, "starting extraction");

        let (read, mut metrics) = crossbeam::thread::scope(|scope| {
            let (poses_tx, poses_rx) = crossbeam::channel::bounded::<Tagged<Pose>>(queue_size);
            let (metrics_tx, metrics_rx) = crossbeam::channel::unbounded();

            for _ in 0..workers {
                let poses_rx = poses_rx.clone();
                let metrics_tx = metrics_tx.clone();
                scope.spawn(move |_| {
                    for (seq, index, pose) in poses_rx {
                        let metrics = extractor.extract(&pose, index);
                        if metrics_tx.send((seq, metrics)).is_err() {
                            break;
                        }
                    }
                });
            }
            drop(poses_rx);
            drop(metrics_tx);

            let read = read_frames(provider, running, stats, &poses_tx, &mut on_frame);
            drop(poses_tx);

            (read, metrics_rx.iter().collect::<Vec<(usize, FrameMetrics)>>())
        })
        .map_err(|_| Error::WorkerPanicked)?;

        self.stats.processing_time = start.elapsed();
        read?;

        // repeated frame indices keep the order they were read in
        metrics.sort_by_key(|(seq, m)| (m.frame_index, *seq));
        let metrics: Vec<_> = metrics.into_iter().map(|(_, m)| m).collect();

        info!(
            frames_read = self.stats.frames_read,
            frames_with_pose = self.stats.frames_with_pose,
            elapsed_ms = self.stats.processing_time.as_millis() as u64,
            fps = self.stats.average_fps(),
            "extraction finished"
        );
        Ok(metrics)
    }
}

/// Read order, frame index, payload.
type Tagged<T> = (usize, u64, T);

fn read_frames<P, F>(
    provider: &mut P,
    running: &AtomicBool,
    stats: &mut Stats,
    poses_tx: &crossbeam::channel::Sender<Tagged<Pose>>,
    on_frame: &mut F,
) -> Result<(), Error>
where
    P: LandmarkProvider,
    F: FnMut(u64),
{
    while running.load(Ordering::SeqCst) {
        let frame = match provider.next_frame()? {
            Some(frame) => frame,
            None => return Ok(()),
        };
        let seq = stats.frames_read;
        stats.frames_read += 1;
        on_frame(frame.index);

        match frame.pose {
            Some(pose) => {
                stats.frames_with_pose += 1;
                if poses_tx.send((seq, frame.index, pose)).is_err() {
                    return Err(Error::WorkerPanicked);
                }
            }
            None => debug!(frame = frame.index, "no pose detected"),
        }
    }
    Err(Error::Interrupted)
}
