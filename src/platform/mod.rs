//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (host clock in ms)
//! - Applying controller effects to the page (web only)

#[cfg(target_arch = "wasm32")]
pub mod dom;

/// Host clock in milliseconds, same timebase as animation frame timestamps
#[cfg(target_arch = "wasm32")]
pub fn now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Host clock in milliseconds since the first call
#[cfg(not(target_arch = "wasm32"))]
pub fn now() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static START: OnceLock<Instant> = OnceLock::new();
    START.get_or_init(Instant::now).elapsed().as_secs_f64() * 1000.0
}
