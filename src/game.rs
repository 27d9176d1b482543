use std::io;

use crate::TermInt;
use crate::render::{self, Layout, DEFAULT_SCALE, MAX_SCALE, MIN_SCALE};
use crate::term::TermManager;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use game_2048::{Command, Direction::*, Tiles};
use log::{debug, info};

/// What a key press asks for.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    Play(Command),
    Zoom(i8),
    Quit,
}

pub struct Game2048 {
    term: TermManager,
    tiles: Tiles,
    layout: Layout,
    scale: TermInt,
}

impl Game2048 {
    pub fn new(tiles: Tiles) -> Self {
        let layout = Layout::new((0, 0), tiles.side(), DEFAULT_SCALE);
        Game2048 { term: TermManager::new(), tiles, layout, scale: DEFAULT_SCALE }
    }

    pub fn tiles(&self) -> &Tiles {
        &self.tiles
    }

    /// Takes over the terminal until the player quits. The terminal is
    /// restored even when drawing fails.
    pub fn run(&mut self) -> io::Result<()> {
        self.term.setup()?;
        let res = self.play();
        self.term.restore()?;
        res
    }

    ///////////////////////////////////////////////////////////////////////////

    fn play(&mut self) -> io::Result<()> {
        info!("new game on a {0}x{0} grid", self.tiles.side());
        self.refresh()?;

        loop {
            render::draw(&mut self.term, &self.layout, &self.tiles)?;

            let key_ev = match self.term.read_event_blocking()? {
                Event::Key(key_ev) => key_ev,
                _ => {
                    self.refresh()?;
                    continue;
                }
            };

            let action = match decode(&key_ev) {
                Some(action) if accepts(&self.tiles, action) => action,
                _ => continue,
            };

            match action {
                Action::Quit => break,
                Action::Zoom(step) => self.zoom(step)?,
                Action::Play(Command::Reset) => {
                    info!("reset with score {}", self.tiles.score());
                    self.tiles.reset();
                    self.refresh()?;
                }
                Action::Play(command) => {
                    let changed = self.tiles.execute(command);
                    debug!("{:?} changed the grid: {}", command, changed);
                    self.log_outcome();
                }
            }
        }

        info!("quit with score {}", self.tiles.score());
        Ok(())
    }

    fn log_outcome(&self) {
        if self.tiles.is_win() {
            info!("won with score {}", self.tiles.score());
        } else if self.tiles.is_game_over() {
            info!("game over with score {}", self.tiles.score());
        }
    }

    fn zoom(&mut self, step: i8) -> io::Result<()> {
        let scale = (self.scale as i16 + step as i16).max(MIN_SCALE as i16).min(MAX_SCALE as i16);
        self.scale = scale as TermInt;
        self.refresh()
    }

    /// Recomputes the layout for the current terminal size and clears the screen.
    fn refresh(&mut self) -> io::Result<()> {
        let size = self.term.get_terminal_size()?;
        self.layout = Layout::new(size, self.tiles.side(), self.scale);
        self.term.clear()
    }
}

pub fn decode(key_ev: &KeyEvent) -> Option<Action> {
    if key_ev.kind != KeyEventKind::Press {
        return None;
    }

    if is_ctrl_c(key_ev) {
        return Some(Action::Quit);
    }

    let action = match key_ev.code {
        KeyCode::Char('w') | KeyCode::Up => Action::Play(Command::Move(Up)),
        KeyCode::Char('a') | KeyCode::Left => Action::Play(Command::Move(Left)),
        KeyCode::Char('s') | KeyCode::Down => Action::Play(Command::Move(Down)),
        KeyCode::Char('d') | KeyCode::Right => Action::Play(Command::Move(Right)),
        KeyCode::Char('u') => Action::Play(Command::Undo),
        KeyCode::Char('r') => Action::Play(Command::Reset),
        KeyCode::Char('+') => Action::Zoom(1),
        KeyCode::Char('-') => Action::Zoom(-1),
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        _ => return None,
    };

    Some(action)
}

/// Once the grid is won or over, only reset, zoom and quit get through.
pub fn accepts(tiles: &Tiles, action: Action) -> bool {
    match action {
        Action::Play(Command::Move(_)) | Action::Play(Command::Undo) => {
            !(tiles.is_win() || tiles.is_game_over())
        }
        _ => true,
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use game_2048::{Config, Tile};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_and_wasd_move() {
        assert_eq!(decode(&press(KeyCode::Up)), Some(Action::Play(Command::Move(Up))));
        assert_eq!(decode(&press(KeyCode::Char('a'))), Some(Action::Play(Command::Move(Left))));
        assert_eq!(decode(&press(KeyCode::Down)), Some(Action::Play(Command::Move(Down))));
        assert_eq!(decode(&press(KeyCode::Char('d'))), Some(Action::Play(Command::Move(Right))));
    }

    #[test]
    fn commands_and_zoom() {
        assert_eq!(decode(&press(KeyCode::Char('u'))), Some(Action::Play(Command::Undo)));
        assert_eq!(decode(&press(KeyCode::Char('r'))), Some(Action::Play(Command::Reset)));
        assert_eq!(decode(&press(KeyCode::Char('+'))), Some(Action::Zoom(1)));
        assert_eq!(decode(&press(KeyCode::Char('-'))), Some(Action::Zoom(-1)));
    }

    #[test]
    fn quit_keys() {
        assert_eq!(decode(&press(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(decode(&press(KeyCode::Esc)), Some(Action::Quit));

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(decode(&ctrl_c), Some(Action::Quit));
    }

    #[test]
    fn other_keys_and_releases_are_ignored() {
        assert_eq!(decode(&press(KeyCode::Char('x'))), None);
        assert_eq!(decode(&press(KeyCode::Enter)), None);

        let release = KeyEvent::new_with_kind_and_state(
            KeyCode::Up,
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        );
        assert_eq!(decode(&release), None);
    }

    fn grid(items: Vec<Tile>) -> Tiles {
        Tiles::from_items(Config::default().auto_spawn(false), items).unwrap()
    }

    const EVERY_ACTION: [Action; 8] = [
        Action::Play(Command::Move(Up)),
        Action::Play(Command::Move(Down)),
        Action::Play(Command::Move(Left)),
        Action::Play(Command::Move(Right)),
        Action::Play(Command::Undo),
        Action::Play(Command::Reset),
        Action::Zoom(1),
        Action::Quit,
    ];

    #[test]
    fn running_game_accepts_everything() {
        let tiles = grid(vec![
            2, 0, 0, 0,
            0, 0, 0, 0,
            0, 0, 0, 0,
            0, 0, 0, 0,
        ]);

        assert!(EVERY_ACTION.iter().all(|action| accepts(&tiles, *action)));
    }

    #[test]
    fn finished_game_only_resets_zooms_or_quits() {
        let over = grid(vec![
            2, 4, 8, 4,
            4, 2, 4, 2,
            8, 4, 2, 8,
            4, 2, 8, 4,
        ]);
        let won = grid(vec![
            2048, 0, 0, 0,
            0, 0, 0, 0,
            0, 0, 0, 0,
            0, 0, 0, 0,
        ]);

        for tiles in &[over, won] {
            for action in EVERY_ACTION.iter() {
                let expected = matches!(action, Action::Play(Command::Reset) | Action::Zoom(_) | Action::Quit);
                assert_eq!(accepts(tiles, *action), expected, "{:?}", action);
            }
        }
    }
}
