//! # Interactive Browser
//!
//! `browse` shows a search box over the catalog. Typing updates the results
//! on every keystroke, while the share link on the status line follows the
//! query through the [`QueryStateStore`] debounce.
//!
//! The event loop never sleeps past the store's next deadline, so a pending
//! share-link write lands on time even when no key is pressed.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};
use vdplugins::api::VdApi;
use vdplugins::catalog::{CatalogSource, LoadState};
use vdplugins::clipboard::{CopyOutcome, FallbackCopier, PrimaryClipboard};
use vdplugins::error::Result;
use vdplugins::model::CatalogEntry;
use vdplugins::state::{QueryStateStore, SessionLocation};

const TICK_RATE: Duration = Duration::from_millis(50);

enum Listing {
    Loading,
    Failed(String),
    Ready(Vec<CatalogEntry>),
}

pub struct BrowseApp<S: CatalogSource + 'static, P: PrimaryClipboard, C: FallbackCopier> {
    api: VdApi<S, P, C>,
    store: QueryStateStore,
    location: SessionLocation,
    listing: Listing,
    stale: Rc<Cell<bool>>,
    /// Byte offset into the query.
    cursor: usize,
    selected: usize,
    status: Option<String>,
    should_quit: bool,
}

/// Run the browser until the user quits, returning the final share link.
pub fn run<S: CatalogSource + 'static, P: PrimaryClipboard, C: FallbackCopier>(
    api: VdApi<S, P, C>,
    share: Option<&str>,
) -> Result<String> {
    let mut app = BrowseApp::new(api, share);
    let mut terminal = ratatui::try_init()?;
    let outcome = app.run(&mut terminal);
    ratatui::restore();
    outcome?;
    Ok(app.finish())
}

impl<S: CatalogSource + 'static, P: PrimaryClipboard, C: FallbackCopier> BrowseApp<S, P, C> {
    pub fn new(api: VdApi<S, P, C>, share: Option<&str>) -> Self {
        let base = api.config().share_url.clone();
        let location = match share {
            Some(link) => SessionLocation::from_share(base, link),
            None => SessionLocation::new(base),
        };
        let mut store = QueryStateStore::initialize(location.clone(), api.config().debounce());

        let stale = Rc::new(Cell::new(true));
        let flag = Rc::clone(&stale);
        store.subscribe(move |_| flag.set(true));

        let cursor = store.query().len();
        Self {
            api,
            store,
            location,
            listing: Listing::Loading,
            stale,
            cursor,
            selected: 0,
            status: None,
            should_quit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> Result<()> {
        loop {
            self.refresh();
            terminal.draw(|frame| draw(frame, self))?;

            let timeout = match self.store.next_deadline() {
                Some(deadline) => deadline
                    .saturating_duration_since(Instant::now())
                    .min(TICK_RATE),
                None => TICK_RATE,
            };
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key, Instant::now());
                    }
                }
            }
            self.store.tick(Instant::now());

            if self.should_quit {
                return Ok(());
            }
        }
    }

    /// Flush the pending write and hand back the link the session ended on.
    pub fn finish(&mut self) -> String {
        self.store.flush();
        self.location.href()
    }

    /// Recompute the result list if the query or the catalog changed.
    fn refresh(&mut self) {
        if matches!(self.listing, Listing::Ready(_)) && !self.stale.get() {
            return;
        }

        let catalog = match self.api.catalog_state() {
            LoadState::Pending => {
                self.listing = Listing::Loading;
                return;
            }
            LoadState::Errored(msg) => {
                self.listing = Listing::Failed(msg.clone());
                return;
            }
            LoadState::Ready(entries) => Arc::clone(entries),
        };
        self.stale.set(false);

        let matches: Vec<CatalogEntry> = self
            .api
            .results(&catalog, self.store.query())
            .into_iter()
            .map(|m| m.entry.clone())
            .collect();
        self.selected = self.selected.min(matches.len().saturating_sub(1));
        self.listing = Listing::Ready(matches);
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Enter => self.copy_selected(),
            KeyCode::Char('y') if ctrl => self.copy_selected(),
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => {
                if self.selected + 1 < self.result_count() {
                    self.selected += 1;
                }
            }
            KeyCode::Char(c) if !ctrl => {
                let mut query = self.store.query().to_string();
                query.insert(self.cursor, c);
                self.cursor += c.len_utf8();
                self.edit(query, now);
            }
            KeyCode::Backspace => {
                if let Some(prev) = self.prev_boundary() {
                    let mut query = self.store.query().to_string();
                    query.remove(prev);
                    self.cursor = prev;
                    self.edit(query, now);
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.store.query().len() {
                    let mut query = self.store.query().to_string();
                    query.remove(self.cursor);
                    self.edit(query, now);
                }
            }
            KeyCode::Left => {
                if let Some(prev) = self.prev_boundary() {
                    self.cursor = prev;
                }
            }
            KeyCode::Right => {
                if let Some(c) = self.store.query()[self.cursor..].chars().next() {
                    self.cursor += c.len_utf8();
                }
            }
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.store.query().len(),
            _ => {}
        }
    }

    fn edit(&mut self, query: String, now: Instant) {
        self.store.set_query(query, now);
        self.selected = 0;
        self.status = None;
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.store.query()[..self.cursor]
            .char_indices()
            .last()
            .map(|(i, _)| i)
    }

    fn result_count(&self) -> usize {
        match &self.listing {
            Listing::Ready(entries) => entries.len(),
            _ => 0,
        }
    }

    fn copy_selected(&mut self) {
        let Listing::Ready(entries) = &self.listing else {
            return;
        };
        let Some(entry) = entries.get(self.selected) else {
            return;
        };
        let (name, url) = (entry.name.clone(), entry.url.clone());

        self.status = match self.api.copy_text(&url) {
            CopyOutcome::Primary | CopyOutcome::Fallback => {
                Some(format!("Copied link for {}", name))
            }
            CopyOutcome::Failed => None,
        };
    }
}

fn draw<S: CatalogSource + 'static, P: PrimaryClipboard, C: FallbackCopier>(
    frame: &mut Frame,
    app: &BrowseApp<S, P, C>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search box
            Constraint::Min(3),    // Results
            Constraint::Length(1), // Status line
        ])
        .split(frame.area());

    draw_search_box(frame, app, chunks[0]);
    draw_results(frame, app, chunks[1]);
    draw_status_line(frame, app, chunks[2]);
}

fn draw_search_box<S: CatalogSource + 'static, P: PrimaryClipboard, C: FallbackCopier>(
    frame: &mut Frame,
    app: &BrowseApp<S, P, C>,
    area: Rect,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Search ");
    let query = app.store.query();
    frame.render_widget(Paragraph::new(query).block(block), area);

    let before_cursor = Line::raw(&query[..app.cursor]).width() as u16;
    frame.set_cursor_position((area.x + 1 + before_cursor, area.y + 1));
}

fn draw_results<S: CatalogSource + 'static, P: PrimaryClipboard, C: FallbackCopier>(
    frame: &mut Frame,
    app: &BrowseApp<S, P, C>,
    area: Rect,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Plugins ");

    let entries = match &app.listing {
        Listing::Loading => {
            let text = Paragraph::new("Loading...").style(Style::default().fg(Color::Yellow));
            frame.render_widget(text.block(block), area);
            return;
        }
        Listing::Failed(msg) => {
            let text = Paragraph::new(vec![
                Line::styled("Could not fetch plugins", Style::default().fg(Color::Red)),
                Line::styled(msg.as_str(), Style::default().fg(Color::DarkGray)),
            ]);
            frame.render_widget(text.block(block), area);
            return;
        }
        Listing::Ready(entries) if entries.is_empty() => {
            let text = Paragraph::new("No plugins found.").style(Style::default().fg(Color::DarkGray));
            frame.render_widget(text.block(block), area);
            return;
        }
        Listing::Ready(entries) => entries,
    };

    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| {
            let header = Line::from(vec![
                Span::styled(entry.name.as_str(), Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(
                    format!("  by {}", entry.author_names()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]);
            ListItem::new(vec![header, Line::raw(format!("  {}", entry.description))])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan));
    let mut state = ListState::default().with_selected(Some(app.selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_status_line<S: CatalogSource + 'static, P: PrimaryClipboard, C: FallbackCopier>(
    frame: &mut Frame,
    app: &BrowseApp<S, P, C>,
    area: Rect,
) {
    let mut spans = vec![Span::styled(
        format!(" {}", app.location.href()),
        Style::default().fg(Color::DarkGray),
    )];
    if let Some(status) = &app.status {
        spans.push(Span::styled(
            format!("  {}", status),
            Style::default().fg(Color::Green),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
