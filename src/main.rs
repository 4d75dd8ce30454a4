use crate::cli::run;

pub mod cli;
pub mod config;
pub mod domain;
pub mod http;
pub mod render;
pub mod spotify;

fn main() -> anyhow::Result<()> {
    run()
}
