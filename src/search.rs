pub mod engine;

pub use engine::{LineSearcher, SearchOptions};
