use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("landmark schema violation: expected {expected} landmarks, got {got}")]
    SchemaViolation { expected: usize, got: usize },

    #[error("failed to construct NotNan from f64: {1}")]
    ConstructNotNan(#[source] ordered_float::FloatIsNan, f64),

    #[error("landmark coordinate is not finite: {0}")]
    InfiniteCoordinate(f64),

    #[error("frame index on line {0} leaves no room for the next frame")]
    FrameIndexOverflow(usize),

    #[error("failed to read landmarks")]
    ReadLandmarks(#[source] std::io::Error),

    #[error("failed to parse landmarks on line {1}")]
    ParseLandmarks(#[source] serde_json::Error, usize),

    #[error("failed to read config file: {1:?}")]
    ReadConfig(#[source] std::io::Error, PathBuf),

    #[error("failed to parse config file: {1:?}")]
    ParseConfig(#[source] toml::de::Error, PathBuf),

    #[error("failed to serialize shot evaluation")]
    SerializeEvaluation(#[source] serde_json::Error),

    #[error("failed to write shot evaluation to {1:?}")]
    WriteEvaluation(#[source] std::io::Error, PathBuf),

    #[error("frame processing was interrupted")]
    Interrupted,

    #[error("an extraction worker panicked")]
    WorkerPanicked,
}
