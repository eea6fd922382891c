mod api;
mod components;
pub mod config;
mod pages;
mod router;
mod state;
pub mod utils;

#[cfg(test)]
mod test_support;

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    if let Err(err) = console_log::init_with_level(level) {
        web_sys::console::error_1(&format!("Logger already initialized: {}", err).into());
    }
    log::info!("Starting Claims Console frontend");

    // Non-blocking; requests wait on the resolved base URL.
    wasm_bindgen_futures::spawn_local(async move {
        config::init().await;
        log::info!("Runtime config initialized");
    });

    router::mount_app();
}
