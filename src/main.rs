mod app;
mod config;
mod engine;
mod library;
mod metadata;
mod mpris;
mod runtime;
mod transport;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
