pub mod chart;
pub mod export;
pub mod pagination;
pub mod query;
pub mod query_history;
pub mod saved_query;
pub mod settings;
pub mod sort;
pub mod viewport;

pub use chart::*;
pub use export::*;
pub use pagination::*;
pub use query::*;
pub use query_history::*;
pub use saved_query::*;
pub use settings::*;
pub use sort::*;
pub use viewport::*;
