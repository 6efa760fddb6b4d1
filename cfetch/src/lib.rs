//! Fetches Codeforces problem statements and prints them as text or JSON.
mod cfetch;
pub mod config;
pub mod consts;
mod error;
pub mod http;
pub mod output;
mod target;
pub mod telemetry;

pub use cfetch::Cfetch;
pub use config::Config;
pub use error::Error;
pub use output::OutputFormat;
pub use target::Target;
