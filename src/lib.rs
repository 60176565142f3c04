pub mod channels;
pub mod config;
pub mod constants;
pub mod errors;
pub mod projection;
pub mod utils;

pub use channels::*;
pub use projection::*;
