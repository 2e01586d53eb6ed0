pub mod providers;
pub mod search_resolver;
pub mod verdict;

pub use search_resolver::{Resolution, SearchOutcome, SearchResolver};
