use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::controller::{ControlEvent, Controller};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Category,
    Search,
}

/// What the viewer shows: the controller plus which control has focus and
/// how far the table is scrolled.
#[derive(Debug)]
pub struct ViewerState {
    pub controller: Controller,
    pub focus: Focus,
    pub scroll: usize,
}

impl ViewerState {
    pub fn new(controller: Controller) -> Self {
        Self {
            controller,
            focus: Focus::Search,
            scroll: 0,
        }
    }

    /// Applies a key press. Returns `true` when the viewer should exit.
    pub fn on_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }
        match key.code {
            KeyCode::Esc => return true,
            KeyCode::Tab | KeyCode::BackTab => self.toggle_focus(),
            KeyCode::PageDown => self.scroll_down(10),
            KeyCode::PageUp => self.scroll_up(10),
            _ => match self.focus {
                Focus::Category => return self.on_category_key(key.code),
                Focus::Search => self.on_search_key(key.code),
            },
        }
        false
    }

    fn on_category_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Right | KeyCode::Down | KeyCode::Char('l') | KeyCode::Char('j') => {
                self.controller.select_next_category();
                self.scroll = 0;
            }
            KeyCode::Left | KeyCode::Up | KeyCode::Char('h') | KeyCode::Char('k') => {
                self.controller.select_previous_category();
                self.scroll = 0;
            }
            KeyCode::Backspace | KeyCode::Delete => {
                self.controller
                    .handle(ControlEvent::CategoryChanged(String::new()));
                self.scroll = 0;
            }
            _ => {}
        }
        false
    }

    fn on_search_key(&mut self, code: KeyCode) {
        let mut search = self.controller.search().to_string();
        match code {
            KeyCode::Char(c) => search.push(c),
            KeyCode::Backspace => {
                search.pop();
            }
            KeyCode::Down => return self.scroll_down(1),
            KeyCode::Up => return self.scroll_up(1),
            _ => return,
        }
        self.controller.handle(ControlEvent::SearchInput(search));
        self.scroll = 0;
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Category => Focus::Search,
            Focus::Search => Focus::Category,
        };
    }

    fn scroll_down(&mut self, by: usize) {
        let last = self.controller.table().len().saturating_sub(1);
        self.scroll = (self.scroll + by).min(last);
    }

    fn scroll_up(&mut self, by: usize) {
        self.scroll = self.scroll.saturating_sub(by);
    }
}
