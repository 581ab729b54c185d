pub mod trending;

pub use trending::{PostSource, TrendStore, TrendingService};
