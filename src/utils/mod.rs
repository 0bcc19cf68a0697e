// Utility modules

pub mod file;

pub use file::FileUtils;
