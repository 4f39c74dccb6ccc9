use dioxus::prelude::*;

mod camera;
mod components;
mod error;
mod filesystem;
mod galeria;
mod image_processing;
mod models;

use components::FotosScreen;

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    init_logging();
    dioxus::launch(App);
}

#[cfg(target_os = "android")]
fn init_logging() {
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(log::LevelFilter::Debug)
            .with_tag("fototeca"),
    );
}

#[cfg(not(target_os = "android"))]
fn init_logging() {
    env_logger::init();
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        div { style: "font-family: sans-serif;", FotosScreen {} }
    }
}
