pub mod trend_refresh;

pub use trend_refresh::TrendRefreshJob;
