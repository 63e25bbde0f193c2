pub mod build_source;
pub mod comparison_engine;
pub mod universe_collector;
pub mod version_comparator;

pub use build_source::BuildSource;
pub use comparison_engine::ComparisonEngine;
pub use universe_collector::UniverseCollector;
pub use version_comparator::VersionComparator;
