mod commands;
mod render;
mod setup;
mod shell;
mod styles;

pub use commands::run;
