use crate::{
    error::Error,
    pose::{Pose, RawLandmark, NUM_LANDMARKS},
};
use serde::Deserialize;
use std::io::BufRead;

/// One decoded video frame as seen by the core: its index and, if a person
/// was detected, the validated pose.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub index: u64,
    pub pose: Option<Pose>,
}

pub trait LandmarkProvider {
    /// Return the next frame, or `None` once the source is exhausted.
    fn next_frame(&mut self) -> Result<Option<Frame>, Error>;

    /// Return the number of landmarks the provider is expected to produce.
    fn expected_landmarks(&self) -> usize {
        NUM_LANDMARKS
    }

    /// Validate a raw landmark set and turn it into a [`Pose`].
    fn validate(&self, raw: &[RawLandmark]) -> Result<Pose, Error> {
        let expected = self.expected_landmarks();
        if raw.len() != expected {
            Err(Error::SchemaViolation {
                expected,
                got: raw.len(),
            })
        } else {
            Pose::from_raw(raw)
        }
    }
}

#[derive(Debug, Deserialize)]
struct RecordedFrame {
    #[serde(default)]
    frame_index: Option<u64>,
    landmarks: Option<Vec<RawLandmark>>,
}

/// Reads landmarks recorded one frame per line as JSON:
///
/// ```json
/// {"frame_index": 1, "landmarks": [{"x": 0.5, "y": 0.4, "z": 0.0, "visibility": 0.9}, ...]}
/// {"frame_index": 2, "landmarks": null}
/// ```
///
/// `frame_index` may be omitted, in which case frames are numbered from 1.
pub struct JsonLinesProvider<R> {
    reader: R,
    line: String,
    line_num: usize,
    next_index: u64,
}

impl<R: BufRead> JsonLinesProvider<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            line_num: 0,
            next_index: 1,
        }
    }
}

impl<R: BufRead> LandmarkProvider for JsonLinesProvider<R> {
    fn next_frame(&mut self) -> Result<Option<Frame>, Error> {
        loop {
            self.line.clear();
            if self
                .reader
                .read_line(&mut self.line)
                .map_err(Error::ReadLandmarks)?
                == 0
            {
                return Ok(None);
            }
            self.line_num += 1;

            let line = self.line.trim();
            if line.is_empty() {
                continue;
            }

            let recorded: RecordedFrame = serde_json::from_str(line)
                .map_err(|e| Error::ParseLandmarks(e, self.line_num))?;
            let index = recorded.frame_index.unwrap_or(self.next_index);
            self.next_index = index
                .checked_add(1)
                .ok_or(Error::FrameIndexOverflow(self.line_num))?;

            let pose = recorded
                .landmarks
                .map(|raw| self.validate(&raw))
                .transpose()?;
            return Ok(Some(Frame { index, pose }));
        }
    }
}
