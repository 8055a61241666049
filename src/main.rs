use std::{
    path::Path,
    time::{Duration, Instant},
};

use anyhow::{bail, Context};
use chip::{
    chip8::Machine,
    resources::{Rom, RomArchive},
    runner::{Config, Runner},
    ExecutionError,
};
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};

mod cli;
mod input;
mod terminal;

use cli::Args;
use input::KeyboardAdapter;
use terminal::{Bell, Screen, TerminalGuard};

/// How long to wait for terminal input between two runner updates.
const POLL_INTERVAL: Duration = Duration::from_millis(2);

type TermRunner = Runner<Screen, KeyboardAdapter, Bell>;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.list {
        for name in RomArchive::open(&args.rom)
            .with_context(|| format!("Unable to open the archive {}", args.rom.display()))?
            .file_names()
        {
            println!("{}", name);
        }
        return Ok(());
    }

    let rom = load_rom(&args)?;
    let mut machine = Machine::new();
    machine
        .load_rom(&rom)
        .with_context(|| format!("Unable to load the rom '{}'", rom.get_name()))?;

    let config = Config {
        instructions_per_second: args.ips,
        ..Config::default()
    };
    log::info!("running '{}' with {:?}", rom.get_name(), config);

    let screen = Screen::new(rom.get_name())?;
    let mut runner = Runner::new(machine, screen, KeyboardAdapter::new(), Bell, &config);

    let result = {
        let _guard = TerminalGuard::enter().context("Unable to set up the terminal")?;
        run(&mut runner)
    };

    if let Err(err) = &result {
        if err.is::<ExecutionError>() {
            log::error!("{}\n{}", err, runner.machine());
        }
    }
    result
}

/// Picks the rom either directly from the file or out of a zip archive.
fn load_rom(args: &Args) -> anyhow::Result<Rom> {
    if !is_archive(&args.rom) {
        if args.entry.is_some() {
            bail!("--entry can only be used with a zip archive");
        }
        return Rom::from_file(&args.rom)
            .with_context(|| format!("Unable to read the rom {}", args.rom.display()));
    }

    let mut archive = RomArchive::open(&args.rom)
        .with_context(|| format!("Unable to open the archive {}", args.rom.display()))?;

    let entry = match &args.entry {
        Some(entry) => entry.clone(),
        None => match archive.file_names().as_slice() {
            [only] => only.to_string(),
            names => bail!(
                "The archive contains {} roms, pick one with --entry (see --list)",
                names.len()
            ),
        },
    };

    archive
        .get_file_data(&entry)
        .with_context(|| format!("Unable to extract '{}' from {}", entry, args.rom.display()))
}

fn is_archive(path: &Path) -> bool {
    path.extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("zip"))
}

/// Feeds input and elapsed time into the runner until the user quits.
fn run(runner: &mut TermRunner) -> anyhow::Result<()> {
    runner.display_mut().draw()?;
    let mut last = Instant::now();

    loop {
        if event::poll(POLL_INTERVAL)? {
            while event::poll(Duration::ZERO)? {
                if let Event::Key(key) = event::read()? {
                    if is_quit(&key) {
                        log::info!("quit requested");
                        return Ok(());
                    }
                    if let KeyCode::Char(c) = key.code {
                        runner.keyboard_mut().press(c, Instant::now());
                    }
                }
            }
        }

        let now = Instant::now();
        runner.advance(now - last)?;
        last = now;

        let status = status_line(runner.machine());
        let screen = runner.display_mut();
        if let Some(err) = screen.take_error() {
            return Err(err).context("Unable to draw the screen");
        }
        screen.set_status(status)?;
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

fn status_line(machine: &Machine) -> String {
    format!(
        "{}  DT: {:02X}  ST: {:02X}{}  [Esc quits]",
        machine.name(),
        machine.get_delay_timer(),
        machine.get_sound_timer(),
        if machine.is_waiting() {
            "  waiting for a key"
        } else {
            ""
        }
    )
}
