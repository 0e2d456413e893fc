//! Global config handle.
//!
//! Uses `arc-swap` for lock-free reads and atomic config replacement.

use crate::config::InlineConfig;
use arc_swap::ArcSwap;
use std::sync::{Arc, LazyLock};

/// Global config storage.
pub static CONFIG: LazyLock<ArcSwap<InlineConfig>> =
    LazyLock::new(|| ArcSwap::from_pointee(InlineConfig::default()));

#[inline]
pub fn cfg() -> Arc<InlineConfig> {
    CONFIG.load_full()
}

#[inline]
pub fn init_config(config: InlineConfig) -> Arc<InlineConfig> {
    let arc = Arc::new(config);
    CONFIG.store(Arc::clone(&arc));
    arc
}
