#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod config;
pub mod embed;
pub mod error;
pub mod loader;
pub mod traits;
pub mod types;
