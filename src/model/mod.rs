pub mod config;
pub mod state;
pub mod tab;
pub mod task;

pub use config::*;
pub use state::*;
pub use tab::*;
pub use task::*;
