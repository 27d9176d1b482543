use crate::{Coords, TermInt};
use std::{fmt::Display, io::{self, Stdout, Write, stdout}};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, read};
use crossterm::style::StyledContent;

pub struct TermManager {
    stdout: Stdout,
}

impl TermManager {
    pub fn new() -> Self {
        TermManager { stdout: stdout() }
    }

    pub fn setup(&mut self) -> io::Result<()> {
        execute!(self.stdout, EnterAlternateScreen, cursor::Hide, cursor::DisableBlinking)?;
        terminal::enable_raw_mode()
    }

    pub fn restore(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
    }

    /// Blocks until a key press or a resize arrives.
    pub fn read_event_blocking(&self) -> io::Result<Event> {
        loop {
            match read()? {
                ev @ Event::Key(_) | ev @ Event::Resize(_, _) => return Ok(ev),
                _ => {}
            }
        }
    }

    pub fn get_terminal_size(&self) -> io::Result<Coords> {
        terminal::size()
    }

    pub fn print_at<D: Display>(&mut self, pos: Coords, content: StyledContent<D>) -> io::Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::PrintStyledContent(content))
    }

    pub fn clear(&mut self) -> io::Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All))
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }
}

/// Number of terminal columns `text` takes, assuming one column per char.
pub fn text_width(text: &str) -> TermInt {
    text.chars().count() as TermInt
}
