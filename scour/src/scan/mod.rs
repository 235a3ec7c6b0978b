//! Concurrent scan-and-match: one parallel task per candidate file, with
//! results reassembled in directory-enumeration order so that output is
//! deterministic regardless of completion order.

pub mod engine;
pub mod matcher;
pub mod processor;

pub use engine::scan;
pub use matcher::QueryMatcher;
pub use processor::FileProcessor;
