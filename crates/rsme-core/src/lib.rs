pub mod config;
pub mod logging;

pub mod collab;
pub mod fetch;
pub mod locate;
pub mod pipeline;
