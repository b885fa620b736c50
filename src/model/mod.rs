pub mod card;
pub mod config;
pub mod style;

pub use card::*;
pub use config::*;
pub use style::*;
