pub mod answer_synthesizer;
pub mod query_classifier;

pub use answer_synthesizer::{parse_peer_addresses, partition_families, AnswerSynthesizer};
pub use query_classifier::{QueryClassifier, ZoneHandler, ZoneTable};
