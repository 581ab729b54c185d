pub mod trends;

pub use trends::{get_trends, TrendsHandlerState};
