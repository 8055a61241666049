//! Rendering and sound on top of crossterm and tui.
use std::io::{self, Stdout, Write};

use chip::{
    definitions::display::{HEIGHT, WIDTH},
    devices::{DisplayCommands, SoundCommands},
    display::Row,
};
use crossterm::{
    cursor::{Hide, Show},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use tui::{
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Points},
        Block, Borders, Paragraph,
    },
    Terminal,
};

/// Puts the terminal into raw mode on the alternate screen, everything is
/// restored once dropped.
pub(crate) struct TerminalGuard;

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let guard = TerminalGuard;
        let mut out = io::stdout();
        crossterm::execute!(out, EnterAlternateScreen, Hide)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut out = io::stdout();
        let _ = crossterm::execute!(out, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Draws the framebuffer with a status line below it.
pub(crate) struct Screen {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    title: String,
    frame: Vec<Row>,
    status: String,
    /// the first failed draw, the display callback can't return it
    error: Option<io::Error>,
}

impl Screen {
    pub fn new(title: &str) -> io::Result<Self> {
        Ok(Self {
            terminal: Terminal::new(CrosstermBackend::new(io::stdout()))?,
            title: title.to_string(),
            frame: vec![[false; WIDTH]; HEIGHT],
            status: String::new(),
            error: None,
        })
    }

    /// Replaces the status line, redraws only if it changed.
    pub fn set_status(&mut self, status: String) -> io::Result<()> {
        if status != self.status {
            self.status = status;
            self.draw()?;
        }
        Ok(())
    }

    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    pub fn draw(&mut self) -> io::Result<()> {
        let coords = lit_pixels(&self.frame);
        let title = self.title.as_str();
        let status = self.status.as_str();

        self.terminal.draw(|f| {
            let size = f.size();
            let board = Rect::new(0, 0, WIDTH as u16 + 2, HEIGHT as u16 + 2).intersection(size);
            let line = Rect::new(0, board.bottom(), board.width, 1).intersection(size);

            let canvas = Canvas::default()
                .block(
                    Block::default()
                        .title(title)
                        .borders(Borders::ALL)
                        .style(Style::default().bg(Color::Black)),
                )
                .x_bounds([0.0, (WIDTH - 1) as f64])
                .y_bounds([0.0, (HEIGHT - 1) as f64])
                .marker(Marker::Block)
                .paint(|ctx| {
                    ctx.draw(&Points {
                        coords: &coords,
                        color: Color::White,
                    });
                });
            f.render_widget(canvas, board);
            f.render_widget(Paragraph::new(status), line);
        })?;
        Ok(())
    }
}

impl DisplayCommands for Screen {
    fn display(&mut self, pixels: &[Row]) {
        self.frame.clear();
        self.frame.extend_from_slice(pixels);

        if let Err(err) = self.draw() {
            log::error!("unable to draw the screen: {}", err);
            self.error.get_or_insert(err);
        }
    }
}

/// The canvas origin is the bottom left, the framebuffer's the top left.
fn lit_pixels(frame: &[Row]) -> Vec<(f64, f64)> {
    frame
        .iter()
        .enumerate()
        .flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &on)| on)
                .map(move |(x, _)| (x as f64, (HEIGHT - 1 - y) as f64))
        })
        .collect()
}

/// Rings the terminal bell whenever the buzzer starts.
pub(crate) struct Bell;

impl SoundCommands for Bell {
    fn set_sound(&mut self, active: bool) {
        if !active {
            return;
        }
        let mut out = io::stdout();
        if let Err(err) = out.write_all(b"\x07").and_then(|_| out.flush()) {
            log::warn!("unable to ring the bell: {}", err);
        }
    }
}
