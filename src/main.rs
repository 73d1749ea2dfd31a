#![allow(warnings)]
//! Weather Admin Frontend Entry Point

mod app;
mod components;
mod context;
mod storage;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = rolling_logger::init_logger("WeatherAdmin", 200, log::LevelFilter::Info) {
        web_sys::console::warn_1(&format!("Logger already installed: {}", e).into());
    }
    mount_to_body(App);
}
