use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind}, execute, terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen}};
use ratatui::{backend::CrosstermBackend, Terminal, widgets::{Block, Borders, List, ListItem, Paragraph, ListState}, layout::{Layout, Constraint, Direction}, style::{Style, Modifier, Color}};

use todochain::application::chain_service::{ChainService, NodeService};
use todochain::chain::runtime::Chain;
use todochain::domain::account::Address;
use todochain::domain::store::EventStore;
use todochain::domain::todo::{CreateTodo, Priority, Todo, TodoPatch, TodoStats};
use todochain::infrastructure::sqlite_event_store::SqliteEventStore;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let database_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://chain-events.db".to_string());
    prepare_sqlite_file(&database_url)?;
    let store = SqliteEventStore::connect(&database_url).await?;
    store.init().await?;

    // single-account devnet: mint (or read) an account and provision its list
    let account = match std::env::var("ACCOUNT") {
        Ok(s) => s.parse()?,
        Err(_) => Address::random(),
    };
    let service = NodeService::new(Chain::new(account), store);
    let contract = service.create_todo_list(account).await?;

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, service, account, contract).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    res
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode { View, Create, Edit }

#[derive(Clone, Copy, PartialEq, Eq)]
enum Filter { All, Pending, Completed }

#[derive(Clone, Copy, PartialEq, Eq)]
enum ActiveField { Title, Description, Priority }

struct App<S: EventStore> {
    service: NodeService<S>,
    account: Address,
    contract: Address,
    items: Vec<Todo>,
    stats: TodoStats,
    selected: usize,
    last_tick: Instant,
    mode: Mode,
    list_state: ListState,
    filter: Filter,
    filtered_indices: Vec<usize>,
    field: ActiveField,
    draft_title: String,
    draft_desc: String,
    draft_priority: Priority,
}

impl<S: EventStore> App<S> {
    async fn load(&mut self) -> Result<()> {
        self.items = self.service.todos(self.contract, self.account).await?;
        self.stats = self.service.stats(self.contract, self.account).await?;
        self.recompute_filtered();
        Ok(())
    }

    fn recompute_filtered(&mut self) {
        self.filtered_indices.clear();
        for (i, todo) in self.items.iter().enumerate() {
            let include = match self.filter {
                Filter::All => true,
                Filter::Pending => !todo.completed,
                Filter::Completed => todo.completed,
            };
            if include { self.filtered_indices.push(i); }
        }
        // Clamp selection within filtered bounds
        let len = self.filtered_indices.len();
        if len == 0 { self.selected = 0; self.list_state.select(None); }
        else { if self.selected >= len { self.selected = len - 1; } self.list_state.select(Some(self.selected)); }
    }

    fn selected_todo(&self) -> Option<&Todo> {
        self.filtered_indices.get(self.selected).and_then(|&idx| self.items.get(idx))
    }

    fn cycle_draft_priority(&mut self) {
        self.draft_priority = match self.draft_priority {
            Priority::Low => Priority::Medium,
            Priority::Medium => Priority::High,
            Priority::High => Priority::Low,
        };
    }
}

async fn run_app<S: EventStore>(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, service: NodeService<S>, account: Address, contract: Address) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut app = App {
        service,
        account,
        contract,
        items: vec![],
        stats: TodoStats::default(),
        selected: 0,
        last_tick: Instant::now(),
        mode: Mode::View,
        list_state: ListState::default(),
        filter: Filter::All,
        filtered_indices: Vec::new(),
        field: ActiveField::Title,
        draft_title: String::new(),
        draft_desc: String::new(),
        draft_priority: Priority::Medium,
    };
    app.load().await?;

    loop {
        terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Min(1),
                    Constraint::Length(3),
                ])
                .split(f.size());

            let header = Paragraph::new("Todos (Enter: toggle, n: new, e: edit, d: delete, f: filter, q: quit)  |  New/Edit: Tab switches field, Space cycles priority, Enter to save, Esc to cancel")
                .block(Block::default().borders(Borders::ALL).title("todochain devnet"));
            f.render_widget(header, chunks[0]);

            let middle = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                .split(chunks[1]);

            let list_items: Vec<ListItem> = app.filtered_indices.iter().filter_map(|&idx| app.items.get(idx)).map(|t| {
                let mark = if t.completed { "[x]" } else { "[ ]" };
                let flag = match t.priority { Priority::High => "!", Priority::Medium => "-", Priority::Low => " " };
                ListItem::new(format!("{} {} #{} {}", mark, flag, t.id, t.title))
            }).collect();
            if app.filtered_indices.is_empty() { app.list_state.select(None); } else { app.list_state.select(Some(app.selected)); }
            let list = List::new(list_items)
                .block(Block::default().borders(Borders::ALL).title(format!("todos [{}]", match app.filter { Filter::All => "All", Filter::Pending => "Pending", Filter::Completed => "Completed" })))
                .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD | Modifier::REVERSED))
                .highlight_symbol(">> ");
            f.render_stateful_widget(list, middle[0], &mut app.list_state);

            // Details pane for selected record
            let detail = match app.selected_todo() {
                Some(t) => format!(
                    "Title:\n{}\n\nPriority: {}\nCompleted: {}\n\nDescription:\n{}",
                    t.title,
                    t.priority.as_str(),
                    if t.completed { "yes" } else { "no" },
                    if t.description.is_empty() { "(no description)" } else { &t.description },
                ),
                None => String::new(),
            };
            let details = Paragraph::new(detail)
                .block(Block::default().borders(Borders::ALL).title("details"));
            f.render_widget(details, middle[1]);

            let footer_text = match app.mode {
                Mode::View => format!(
                    "account={}  list={}  |  total {} · pending {} · done {} · high {}",
                    app.account, app.contract, app.stats.total, app.stats.pending, app.stats.completed, app.stats.high_priority,
                ),
                Mode::Create | Mode::Edit => format!(
                    "{} — Title: {}  |  Desc: {}  |  Priority: {}  (editing {})",
                    if app.mode == Mode::Create { "Create" } else { "Edit" },
                    app.draft_title,
                    app.draft_desc,
                    app.draft_priority.as_str(),
                    match app.field { ActiveField::Title => "title", ActiveField::Description => "desc", ActiveField::Priority => "priority" },
                ),
            };
            let footer = Paragraph::new(footer_text)
                .block(Block::default().borders(Borders::ALL).title(match app.mode { Mode::View => "info", Mode::Create => "create", Mode::Edit => "edit" }));
            f.render_widget(footer, chunks[2]);
        })?;

        let timeout = tick_rate.saturating_sub(app.last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Only act on key presses; ignore repeats and releases to prevent duplicate input
                if key.kind != KeyEventKind::Press { continue; }
                match app.mode {
                    Mode::View => match key.code {
                        KeyCode::Char('q') => break,
                        KeyCode::Up => { if app.selected > 0 { app.selected -= 1; } }
                        KeyCode::Down => { let len = app.filtered_indices.len(); if app.selected + 1 < len { app.selected += 1; } }
                        KeyCode::Enter => {
                            if let Some(todo) = app.selected_todo() {
                                let id = todo.id;
                                let _ = app.service.toggle_todo_completion(app.contract, app.account, id).await;
                                app.load().await?;
                            }
                        }
                        KeyCode::Char('n') => {
                            app.mode = Mode::Create;
                            app.field = ActiveField::Title;
                            app.draft_title.clear();
                            app.draft_desc.clear();
                            app.draft_priority = Priority::Medium;
                        }
                        KeyCode::Char('e') => {
                            if let Some(todo) = app.selected_todo().cloned() {
                                app.draft_title = todo.title.clone();
                                app.draft_desc = todo.description.clone();
                                app.draft_priority = todo.priority;
                                app.mode = Mode::Edit;
                                app.field = ActiveField::Title;
                            }
                        }
                        KeyCode::Char('d') => {
                            if let Some(todo) = app.selected_todo() {
                                let id = todo.id;
                                let _ = app.service.delete_todo(app.contract, app.account, id).await;
                                if app.selected > 0 { app.selected -= 1; }
                                app.load().await?;
                            }
                        }
                        KeyCode::Char('f') => {
                            app.filter = match app.filter { Filter::All => Filter::Pending, Filter::Pending => Filter::Completed, Filter::Completed => Filter::All };
                            app.recompute_filtered();
                        }
                        _ => {}
                    },
                    Mode::Create | Mode::Edit => match key.code {
                        KeyCode::Esc => { app.mode = Mode::View; app.draft_title.clear(); app.draft_desc.clear(); }
                        KeyCode::Enter => {
                            match app.mode {
                                Mode::Create => {
                                    let title = app.draft_title.trim().to_string();
                                    if !title.is_empty() {
                                        let input = CreateTodo { title, description: app.draft_desc.trim().to_string(), priority: app.draft_priority };
                                        let _ = app.service.create_todo(app.contract, app.account, input).await;
                                    }
                                }
                                Mode::Edit => {
                                    if let Some(todo) = app.selected_todo() {
                                        let id = todo.id;
                                        let title = app.draft_title.trim().to_string();
                                        let patch = TodoPatch {
                                            // contract rejects empty titles; skip the field instead
                                            title: if title.is_empty() { None } else { Some(title) },
                                            description: Some(app.draft_desc.trim().to_string()),
                                            priority: Some(app.draft_priority),
                                        };
                                        let _ = app.service.update_todo(app.contract, app.account, id, patch).await;
                                    }
                                }
                                Mode::View => {}
                            }
                            app.mode = Mode::View;
                            app.draft_title.clear();
                            app.draft_desc.clear();
                            app.load().await?;
                        }
                        KeyCode::Tab => {
                            app.field = match app.field {
                                ActiveField::Title => ActiveField::Description,
                                ActiveField::Description => ActiveField::Priority,
                                ActiveField::Priority => ActiveField::Title,
                            };
                        }
                        KeyCode::Backspace => {
                            match app.field {
                                ActiveField::Title => { app.draft_title.pop(); }
                                ActiveField::Description => { app.draft_desc.pop(); }
                                ActiveField::Priority => {}
                            }
                        }
                        KeyCode::Left | KeyCode::Right => {
                            if app.field == ActiveField::Priority { app.cycle_draft_priority(); }
                        }
                        KeyCode::Char(' ') if app.field == ActiveField::Priority => app.cycle_draft_priority(),
                        KeyCode::Char(c) => {
                            match app.field {
                                ActiveField::Title => app.draft_title.push(c),
                                ActiveField::Description => app.draft_desc.push(c),
                                ActiveField::Priority => {}
                            }
                        }
                        KeyCode::Up | KeyCode::Down => { /* ignore nav in input */ }
                        _ => {}
                    },
                }
            }
        }
        if app.last_tick.elapsed() >= tick_rate {
            app.last_tick = Instant::now();
        }
    }
    Ok(())
}

fn prepare_sqlite_file(database_url: &str) -> anyhow::Result<()> {
    if database_url.starts_with("sqlite::memory:") { return Ok(()); }
    if let Some(path) = database_url.strip_prefix("sqlite://") {
        let path = if cfg!(windows) && path.len() >= 3 && path.as_bytes()[0] == b'/' && path.as_bytes()[2] == b':' { &path[1..] } else { path };
        use std::{fs, path::Path, fs::OpenOptions};
        let p = Path::new(path);
        if let Some(parent) = p.parent() { if !parent.as_os_str().is_empty() { fs::create_dir_all(parent)?; } }
        if !p.exists() { let _ = OpenOptions::new().create(true).append(true).open(p)?; }
    }
    Ok(())
}
