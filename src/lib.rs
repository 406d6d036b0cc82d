pub mod config;
pub mod debug;
pub mod detection;
pub mod error;
pub mod matching;
pub mod models;
pub mod records;

pub use config::ExtractorConfig;
pub use detection::{detect, extract, DetectionPipeline, ExtractionStages, RegionExtractor};
pub use error::{Error, Result};
pub use matching::{FeatureDescriptor, FeatureMatchPolicy, MatchContext, MatchPolicy, StubPolicy};
pub use models::{DetectionResult, Outcome, Region};
pub use records::{Record, RecordStore};
