use anyhow::{anyhow, Result};
use chrono::Utc;
use ratatui::widgets::TableState;

use chores_core::{parse_input, ChoreOverview, Tag};

use crate::{build_chore, apply_fields, Services, KNOWN_KEYS};

pub enum InputMode {
    Normal,
    Adding,
    Editing,
}

pub struct App {
    pub services: Services,
    pub overviews: Vec<ChoreOverview>,
    pub tags: Vec<Tag>,
    pub state: TableState,
    pub input: String,
    pub input_mode: InputMode,
    pub cursor_position: usize,
    pub error: Option<String>,
}

impl App {
    pub fn new(services: Services) -> Result<App> {
        let mut app = App {
            services,
            overviews: Vec::new(),
            tags: Vec::new(),
            state: TableState::default(),
            input: String::new(),
            input_mode: InputMode::Normal,
            cursor_position: 0,
            error: None,
        };
        app.reload()?;
        if !app.overviews.is_empty() {
            app.state.select(Some(0));
        }
        Ok(app)
    }

    fn reload(&mut self) -> Result<()> {
        self.overviews = self
            .services
            .listing()
            .build(&self.services.owner, None, Utc::now())?;
        self.tags = self.services.tags.list(&self.services.owner)?;
        Ok(())
    }

    /// Reloads, parking any failure in the error line instead of tearing
    /// the screen down.
    pub fn refresh(&mut self) {
        if let Err(err) = self.reload() {
            self.error = Some(err.to_string());
        }
    }

    pub fn next(&mut self) {
        if self.overviews.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i >= self.overviews.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.overviews.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    self.overviews.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn complete_selected(&mut self) {
        let Some(i) = self.state.selected() else {
            return;
        };
        let Some(id) = self.overviews.get(i).map(|overview| overview.id) else {
            return;
        };

        if let Err(err) = self
            .services
            .chores
            .complete(&self.services.owner, &id, Utc::now())
        {
            self.error = Some(err.to_string());
        } else {
            self.error = None;
        }
        self.refresh();
    }

    pub fn delete_selected(&mut self) {
        let Some(i) = self.state.selected() else {
            return;
        };
        let Some(id) = self.overviews.get(i).map(|overview| overview.id) else {
            return;
        };

        if let Err(err) = self.services.chores.delete(&self.services.owner, &id) {
            self.error = Some(err.to_string());
        } else {
            self.error = None;
        }
        self.refresh();

        // Keep the selection in range after the list shrank.
        if self.overviews.is_empty() {
            self.state.select(None);
        } else if i >= self.overviews.len() {
            self.state.select(Some(self.overviews.len() - 1));
        } else {
            self.state.select(Some(i));
        }
    }

    pub fn enter_add_mode(&mut self) {
        self.input_mode = InputMode::Adding;
        self.input.clear();
        self.cursor_position = 0;
    }

    pub fn enter_edit_mode(&mut self) {
        if self.state.selected().is_some() {
            self.input_mode = InputMode::Editing;
            self.input.clear();
            self.cursor_position = 0;
        }
    }

    pub fn exit_input_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn input_char(&mut self, c: char) {
        let byte_index = self
            .input
            .chars()
            .take(self.cursor_position)
            .map(|c| c.len_utf8())
            .sum();
        self.input.insert(byte_index, c);
        self.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let byte_index: usize = self
                .input
                .chars()
                .take(self.cursor_position - 1)
                .map(|c| c.len_utf8())
                .sum();
            self.input.remove(byte_index);
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            self.cursor_position += 1;
        }
    }

    pub fn submit_command(&mut self) {
        if self.input.trim().is_empty() {
            self.exit_input_mode();
            return;
        }

        match self.input_mode {
            InputMode::Adding => self.submit_add(),
            InputMode::Editing => self.submit_edit(),
            InputMode::Normal => {}
        }

        self.input.clear();
        self.cursor_position = 0;
        self.exit_input_mode();
    }

    fn submit_add(&mut self) {
        let words: Vec<String> = self.input.split_whitespace().map(|s| s.to_string()).collect();

        let result = parse_input(&words, KNOWN_KEYS)
            .and_then(|parsed| {
                if parsed.name.is_empty() {
                    return Err(anyhow!("A chore name is required"));
                }
                build_chore(&self.services, parsed)
            })
            .and_then(|chore| self.services.chores.create(chore));

        match result {
            Ok(_) => {
                self.error = None;
                self.refresh();
                if !self.overviews.is_empty() {
                    self.state.select(Some(0));
                }
            }
            Err(err) => self.error = Some(err.to_string()),
        }
    }

    fn submit_edit(&mut self) {
        let Some(i) = self.state.selected() else {
            return;
        };
        let Some(id) = self.overviews.get(i).map(|overview| overview.id) else {
            return;
        };

        let words: Vec<String> = self.input.split_whitespace().map(|s| s.to_string()).collect();

        let result = parse_input(&words, KNOWN_KEYS).and_then(|parsed| {
            let mut chore = self.services.chores.get(&self.services.owner, &id)?;
            if !parsed.name.is_empty() {
                chore.name = parsed.name;
            }
            apply_fields(&self.services, &mut chore, &parsed.fields)?;
            self.services.chores.update(&self.services.owner, &chore)
        });

        match result {
            Ok(()) => self.error = None,
            Err(err) => self.error = Some(err.to_string()),
        }
        self.refresh();
    }
}
