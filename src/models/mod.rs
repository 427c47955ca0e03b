pub mod query;
pub mod query_history;
pub mod saved_query;
pub mod settings;
pub mod view;

pub use query::*;
pub use query_history::*;
pub use saved_query::*;
pub use settings::*;
pub use view::*;
