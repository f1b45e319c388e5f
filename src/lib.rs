pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod output;
pub mod parse;
pub mod pipeline;
pub mod reference;
pub mod table;
