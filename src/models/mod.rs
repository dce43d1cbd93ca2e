pub mod config;
pub mod state;
pub mod timeline;
pub mod weekday;

pub use config::*;
pub use state::*;
pub use timeline::*;
pub use weekday::*;
