mod config;
mod logging;

pub use config::{config_file_path, load_config};
pub use logging::init_logging;
