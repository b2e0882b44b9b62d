pub mod check;
pub mod config;
pub mod dump;
pub mod infer;
pub mod loader;
pub mod paths;
pub mod validate;
