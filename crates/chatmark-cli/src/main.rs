mod terminal;

use anyhow::{Context, Result};
use chatmark_config::{Config, Platform};
use chatmark_engine::{ParseContext, RenderOptions, Rendered, RenderedMessage, dump_tree, parse_message, render_message};
use clap::{Parser, ValueEnum};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::{
    io::{Read, Stdout, stdout},
    path::PathBuf,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PlatformArg {
    Desktop,
    Mobile,
}

impl From<PlatformArg> for Platform {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Desktop => Platform::Desktop,
            PlatformArg::Mobile => Platform::Mobile,
        }
    }
}

/// Preview how a chat message renders.
#[derive(Debug, Parser)]
#[command(name = "chatmark", version)]
struct Cli {
    /// Message file; reads stdin when absent
    file: Option<PathBuf>,

    /// Render as a single-line preview
    #[arg(long)]
    preview: bool,

    /// Render only service decorations
    #[arg(long)]
    service_only: bool,

    /// Keep emoji-only messages at running-text size
    #[arg(long)]
    small_emoji: bool,

    /// Host platform; defaults to the config file's
    #[arg(long, value_enum)]
    platform: Option<PlatformArg>,

    /// Print the parsed tree and exit
    #[arg(long)]
    ast: bool,

    /// Print the rendered message without the interactive viewer
    #[arg(long)]
    print: bool,

    /// Config file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,
}

struct App {
    input: String,
    options: RenderOptions,
    rendered: RenderedMessage,
    scroll: u16,
}

impl App {
    fn new(input: String, options: RenderOptions) -> Self {
        let rendered = render_message(&input, &options);
        Self {
            input,
            options,
            rendered,
            scroll: 0,
        }
    }

    fn rerender(&mut self) {
        self.rendered = render_message(&self.input, &self.options);
        self.scroll = 0;
    }

    fn toggle_preview(&mut self) {
        self.options.preview = !self.options.preview;
        self.rerender();
    }

    fn toggle_service_only(&mut self) {
        self.options.service_only = !self.options.service_only;
        self.rerender();
    }

    fn toggle_small_emoji(&mut self) {
        self.options.small_standalone_emoji = !self.options.small_standalone_emoji;
        self.rerender();
    }

    fn toggle_platform(&mut self) {
        self.options.platform = match self.options.platform {
            Platform::Desktop => Platform::Mobile,
            Platform::Mobile => Platform::Desktop,
        };
        self.rerender();
    }

    fn status(&self) -> String {
        let mode = match &self.rendered.body {
            Rendered::Full(_) => "full",
            Rendered::Preview(_) => "preview",
            Rendered::BigEmoji(_) => "big emoji",
            Rendered::ServiceOnly(_) => "service only",
            Rendered::Plain(_) => "plain (parse failed)",
        };
        format!("{:?} | {mode}", self.options.platform)
    }
}

fn read_input(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            Ok(input)
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load_from_path(path)?.unwrap_or_default(),
        None => Config::load_or_default()?,
    };
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;
    log::debug!("Config path: {}", Config::config_path().display());

    let mut options = RenderOptions::from_config(&config)?;
    if let Some(platform) = cli.platform {
        options.platform = platform.into();
    }
    options.preview = cli.preview;
    options.service_only = cli.service_only;
    options.small_standalone_emoji |= cli.small_emoji;

    let input = read_input(cli.file.as_ref())?;

    if cli.ast {
        let context = ParseContext {
            platform: options.platform,
            meta: None,
            highlighter: options.highlighter.clone(),
        };
        println!("{}", dump_tree(&parse_message(&input, &context)?));
        return Ok(());
    }

    if cli.print {
        let text = terminal::to_text(&render_message(&input, &options));
        for line in terminal::to_plain_lines(&text) {
            println!("{line}");
        }
        return Ok(());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(input, options);
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.scroll = app.scroll.saturating_add(1),
                KeyCode::Up | KeyCode::Char('k') => app.scroll = app.scroll.saturating_sub(1),
                KeyCode::Char('p') => app.toggle_preview(),
                KeyCode::Char('s') => app.toggle_service_only(),
                KeyCode::Char('e') => app.toggle_small_emoji(),
                KeyCode::Char('m') => app.toggle_platform(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(f.area());

    let content = Paragraph::new(terminal::to_text(&app.rendered))
        .block(Block::default().borders(Borders::ALL).title(app.status()))
        .scroll((app.scroll, 0));
    f.render_widget(content, chunks[0]);

    let help_text = Line::from(vec![
        Span::raw("q: Quit | "),
        Span::raw("↑/k ↓/j: Scroll | "),
        Span::raw("p: Preview | s: Service only | e: Small emoji | m: Platform"),
    ]);
    f.render_widget(Paragraph::new(vec![help_text]), chunks[1]);
}
