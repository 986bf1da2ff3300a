mod models;
mod service;
mod table;

pub use models::{Holding, PortfolioReport, PortfolioRow, TOTAL_SYMBOL};
pub use service::PortfolioAggregator;
pub use table::render_table;
