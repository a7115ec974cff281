pub mod cli;
pub mod clock;
pub mod config;
pub mod contracts;
pub mod observe;
pub mod reader;

pub use {
    clock::{Clock, FixedClock, SystemClock},
    config::Config,
    reader::{Reliquary, ReliquaryReading},
};
