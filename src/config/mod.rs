//! Configuration management for the engine

pub mod settings;

pub use settings::*;

use lazy_static::lazy_static;

lazy_static! {
    pub static ref CONFIG: Config =
        Config::load().unwrap_or_else(|err| panic!("configuration rejected: {err}"));
}
