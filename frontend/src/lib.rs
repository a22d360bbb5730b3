pub mod access;
pub mod api;
pub mod components;
pub mod config;
pub mod pages;
pub mod router;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_support;

/// Browser entry point: logging, session token hand-off, runtime config,
/// then the app.
pub fn run() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("logger already set: {}", err).into());
    }
    log::info!("starting Ironhall admin frontend");

    match api::auth::capture_token_from_location() {
        Ok(true) => log::info!("session token captured from login redirect"),
        Ok(false) => {}
        Err(err) => log::warn!("could not read login redirect token: {}", err),
    }

    leptos::spawn_local(async move {
        config::init().await;
        router::mount_app();
    });
}
