mod args;
mod commands;
mod render;
mod styles;
mod templates;

pub use commands::run;
