pub mod api;
pub mod components;
pub mod config;
pub mod pages;
pub mod router;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_support;

/// Installs the panic hook and the `log` backend. Safe to call more than once.
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    init_logging();
    log::info!("Starting Ushuari organization portal (wasm)");

    // Resolve the API base URL in the background; requests await it anyway.
    leptos::spawn_local(async move {
        config::init().await;
    });

    router::mount_app();
}
