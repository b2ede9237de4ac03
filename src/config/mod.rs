//! Configuration for changepack.
//!
//! An optional `.changepack.yaml` in the working directory tunes where the
//! archive is written, how files are compressed, and which changed paths are
//! left out. Unknown fields are ignored and missing fields take defaults.

mod model;
mod operations;
pub mod types;


pub use model::Config;
pub use operations::DEFAULT_CONFIG_FILE;
pub use types::Compression;
