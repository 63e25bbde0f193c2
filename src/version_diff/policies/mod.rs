pub mod rebuild_policy;

pub use rebuild_policy::{NameRule, PolicyFilter};
