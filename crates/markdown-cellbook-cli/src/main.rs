use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use markdown_cellbook_config::Config;
use markdown_cellbook_engine::{Cell, CellKind, NotebookFile, io, parse, serialize, supported_languages};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use std::{env, io::stdout, path::PathBuf, process};

struct App {
    notebook_path: PathBuf,
    files: Vec<NotebookFile>,
    file_list_state: ListState,
    cells: Vec<Cell>,
    status: String,
}

impl App {
    fn new(notebook_path: PathBuf) -> Result<Self> {
        let files = io::scan_notebook_files(&notebook_path)?;

        let mut app = Self {
            notebook_path,
            files,
            file_list_state: ListState::default(),
            cells: Vec::new(),
            status: String::new(),
        };

        // Select first file if available
        if !app.files.is_empty() {
            app.file_list_state.select(Some(0));
            app.load_selected_file();
        }

        Ok(app)
    }

    fn next_file(&mut self) {
        if self.files.is_empty() {
            return;
        }
        let i = match self.file_list_state.selected() {
            Some(i) => (i + 1) % self.files.len(),
            None => 0,
        };
        self.file_list_state.select(Some(i));
        self.load_selected_file();
    }

    fn previous_file(&mut self) {
        if self.files.is_empty() {
            return;
        }
        let i = match self.file_list_state.selected() {
            Some(i) => {
                if i == 0 {
                    self.files.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.file_list_state.select(Some(i));
        self.load_selected_file();
    }

    fn load_selected_file(&mut self) {
        self.cells.clear();
        self.status.clear();
        if let Some(index) = self.file_list_state.selected()
            && let Some(file) = self.files.get(index)
        {
            match io::read_file(file.relative_path(), &self.notebook_path) {
                Ok(content) => {
                    self.cells = parse(&content);
                    self.status = format!("{} cells", self.cells.len());
                }
                Err(e) => {
                    self.status = format!("Error reading file: {e}");
                }
            }
        }
    }

    /// Round-trip save: serialize the current cells and write them back.
    fn save_selected_file(&mut self) {
        if let Some(index) = self.file_list_state.selected()
            && let Some(file) = self.files.get(index)
        {
            let text = serialize(&self.cells);
            self.status = match io::write_file(file.relative_path(), &self.notebook_path, &text) {
                Ok(()) => format!("Saved {}", file.relative_path()),
                Err(e) => format!("Error saving file: {e}"),
            };
        }
    }

    fn render_cell_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(keys) = self.metadata_keys() {
            lines.push(format!("metadata: {keys}"));
            lines.push(String::new());
        }
        for (idx, cell) in self.cells.iter().enumerate() {
            let label = match cell.kind {
                CellKind::Prose => "prose".to_string(),
                CellKind::Code if cell.language.is_empty() => "code".to_string(),
                // Languages outside the advisory list get no highlight mode.
                CellKind::Code if !supported_languages().contains(&cell.language.as_str()) => {
                    format!("code ({}, no highlighting)", cell.language)
                }
                CellKind::Code => format!("code ({})", cell.language),
                CellKind::FrontMatter => "front matter (yaml)".to_string(),
            };
            lines.push(format!("[{idx}] {label}"));
            for content_line in cell.content.lines() {
                lines.push(format!("    {content_line}"));
            }
            lines.push(String::new());
        }
        lines
    }

    /// Document-level metadata keys from the front-matter cell, if any.
    fn metadata_keys(&self) -> Option<String> {
        let cell = self.cells.first()?;
        if cell.kind != CellKind::FrontMatter {
            return None;
        }
        let mapping = cell.yaml.as_ref()?.as_mapping()?;
        let keys: Vec<&str> = mapping.keys().filter_map(|key| key.as_str()).collect();
        if keys.is_empty() {
            None
        } else {
            Some(keys.join(", "))
        }
    }
}

fn main() -> Result<()> {
    // Determine notebook path from CLI args or config file
    let args: Vec<String> = env::args().collect();
    let config_path = Config::default_path();

    let notebook_path;
    let from_config;

    if args.len() == 2 {
        // CLI argument provided - use it
        notebook_path = PathBuf::from(&args[1]);
        from_config = false;
    } else if args.len() == 1 {
        // No CLI argument - try config file
        match Config::load() {
            Ok(Some(config)) => {
                notebook_path = config.notebook_path;
                from_config = true;
            }
            Ok(None) => {
                eprintln!("Error: No notebook path provided and no config file found");
                eprintln!("Usage: {} <notebook-folder-path>", args[0]);
                eprintln!("Or create a config file at {}", config_path.display());
                process::exit(1);
            }
            Err(e) => {
                eprintln!("Error: Failed to load config file: {e}");
                eprintln!("Usage: {} <notebook-folder-path>", args[0]);
                process::exit(1);
            }
        }
    } else {
        eprintln!("Usage: {} [notebook-folder-path]", args[0]);
        process::exit(1);
    };

    // Validate notebook directory using engine
    if let Err(e) = io::validate_notebook_dir(&notebook_path) {
        let source = if from_config {
            format!(" from config file '{}'", config_path.display())
        } else {
            String::new()
        };
        eprintln!(
            "Error: Notebook path '{}'{} is invalid: {e}",
            notebook_path.display(),
            source
        );
        process::exit(1);
    }

    // Create the app before touching the terminal, so a scan failure cannot
    // leave raw mode enabled.
    let mut app = App::new(notebook_path)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next_file(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_file(),
                KeyCode::Char('r') => app.load_selected_file(),
                KeyCode::Char('w') => app.save_selected_file(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)].as_ref())
        .split(f.area());

    // File list panel
    let file_items: Vec<ListItem> = app
        .files
        .iter()
        .map(|file| ListItem::new(vec![Line::from(Span::raw(file.relative_path().to_string()))]))
        .collect();

    let files_list = List::new(file_items)
        .block(Block::default().borders(Borders::ALL).title("Files"))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(files_list, chunks[0], &mut app.file_list_state);

    // Cells panel
    let cell_lines = app.render_cell_lines();
    let cells_text = if cell_lines.is_empty() {
        vec![Line::from("Select a file to view its cells")]
    } else {
        cell_lines
            .iter()
            .map(|line| Line::from(Span::raw(line.clone())))
            .collect()
    };

    let title = format!("Cells [{}]", app.status);
    let cells = Paragraph::new(cells_text)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(ratatui::widgets::Wrap { trim: false });

    f.render_widget(cells, chunks[1]);

    // Instructions
    let help_text = Line::from(vec![
        Span::raw("q: Quit | "),
        Span::raw("↑/k: Previous | "),
        Span::raw("↓/j: Next | "),
        Span::raw("r: Reload | w: Round-trip save"),
    ]);

    let help = Paragraph::new(vec![help_text]).block(Block::default());

    // Place help at bottom
    let bottom_chunk = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)].as_ref())
        .split(f.area());

    f.render_widget(help, bottom_chunk[1]);
}
