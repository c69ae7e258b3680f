pub mod codec;
pub mod config_io;
pub mod legacy;
pub mod logging;
pub mod paths;
pub mod recovery;
pub mod state;
