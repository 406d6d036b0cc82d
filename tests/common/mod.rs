mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from tabletscan for tests
#[allow(unused_imports)]
pub use tabletscan::{
    DetectionPipeline, DetectionResult, Error, ExtractorConfig, FeatureDescriptor,
    FeatureMatchPolicy, MatchContext, MatchPolicy, Outcome, Record, RecordStore, Region,
    StubPolicy,
};
