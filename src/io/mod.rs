pub mod config_io;
pub mod probe;
pub mod recovery;
pub mod slots;
