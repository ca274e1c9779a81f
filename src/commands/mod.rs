pub mod config;
pub mod create;
pub mod delete;
pub mod help;
pub mod list;
pub mod result;
pub mod show;

pub use result::CommandResult;
