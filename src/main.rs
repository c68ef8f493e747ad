//! Gyre viewer binary.
//!
//! Usage: `gyre [options.toml]`. Without an argument the built-in defaults
//! are used; with one, the TOML preset overrides any subset of them.

use std::path::Path;

use gyre::{options::Options, Viewer};

fn load_options(arg: Option<&str>) -> Result<Options, gyre::GyreError> {
    match arg {
        Some(path) => Options::load(Path::new(path)),
        None => Ok(Options::default()),
    }
}

fn main() {
    env_logger::init();

    let arg = std::env::args().nth(1);
    let options = match load_options(arg.as_deref()) {
        Ok(options) => options,
        Err(e) => {
            log::error!("{e}");
            log::error!("Usage: gyre [options.toml]");
            std::process::exit(1);
        }
    };

    if let Err(e) = Viewer::builder().with_options(options).build().run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
