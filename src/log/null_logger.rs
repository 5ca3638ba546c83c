//! Stand-in used when the `logging` feature is off. Nothing is printed, but the level
//! bookkeeping in `LogConfiguration` still works so callers see the same API.

use crate::log::LogConfiguration;

impl LogConfiguration {
    pub(in crate::log) fn set_config(&mut self) {
        log::set_max_level(self.global_log_level);
    }
}
