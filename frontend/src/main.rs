use wasm_bindgen_futures::spawn_local;

fn main() {
    ushuari_frontend::init_logging();
    log::info!("Starting Ushuari organization portal: initializing runtime config");

    spawn_local(async move {
        ushuari_frontend::config::init().await;
        ushuari_frontend::router::mount_app();
    });
}
