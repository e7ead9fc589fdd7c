use log::LevelFilter;

use crate::logging::{init_logger, set_log_level as apply_log_level};

#[uniffi::export]
pub fn set_debug_log_level() {
    init_logger(LevelFilter::Trace);
}

#[uniffi::export]
pub fn set_log_level(level: &str) -> bool {
    apply_log_level(level)
}
