use std::path::PathBuf;

use chip::{definitions::cpu, runner::MAX_RATE};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "chip8-term",
    version,
    about = "Runs a CHIP-8 rom inside of the terminal."
)]
pub(crate) struct Args {
    /// The rom image, or a zip archive of rom images.
    #[arg(value_name = "PATH")]
    pub rom: PathBuf,

    /// The entry to run when PATH is a zip archive.
    #[arg(long, value_name = "NAME")]
    pub entry: Option<String>,

    /// Print the entries of the zip archive and exit.
    #[arg(long, default_value_t = false)]
    pub list: bool,

    /// Instructions executed per second.
    #[arg(long, default_value_t = cpu::HERTZ, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_RATE)))]
    pub ips: u32,
}
