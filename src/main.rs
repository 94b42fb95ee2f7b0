mod app;
mod event;
mod ui;

use std::fs::{self, File};
use std::io;
use std::sync::Mutex;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use app::{App, AppScreen, Feedback};
use event::{AppEvent, EventHandler, TICK_RATE};
use ui::components::editor_view::EditorView;
use ui::components::key_strip::KeyStrip;
use ui::components::menu::{Menu, MenuView};
use ui::layout::AppLayout;
use vimtype::config::Config;
use vimtype::keyboard::keyset::Difficulty;
use vimtype::session::SessionKind;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StartMode {
    Lesson,
    Drill,
    Challenge,
}

impl From<StartMode> for SessionKind {
    fn from(mode: StartMode) -> Self {
        match mode {
            StartMode::Lesson => SessionKind::Lesson,
            StartMode::Drill => SessionKind::Drill,
            StartMode::Challenge => SessionKind::Challenge,
        }
    }
}

#[derive(Parser)]
#[command(name = "vimtype", version, about = "Terminal trainer for modal editor navigation")]
struct Cli {
    #[arg(short, long, help = "Difficulty tier (easy, medium, hard, meister)")]
    difficulty: Option<Difficulty>,

    #[arg(short, long, value_enum, help = "Skip the menu and start a session")]
    start: Option<StartMode>,

    #[arg(long, help = "Seed for deterministic drill targets")]
    seed: Option<u64>,
}

/// Log to a file under the data dir; the terminal belongs to the TUI.
fn init_logging() -> Result<()> {
    let path = Config::log_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(&path)?;
    let filter = EnvFilter::try_from_env("VIMTYPE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    // A subscriber may already be installed when embedded; that one wins
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(err) = init_logging() {
        eprintln!("warning: logging disabled: {err:#}");
    }

    let config = Config::load().unwrap_or_else(|err| {
        warn!(error = %err, "config load failed, using defaults");
        Config::default()
    });
    let mut app = App::new(config, cli.seed);
    if let Some(difficulty) = cli.difficulty {
        app.set_difficulty(difficulty);
    }
    if let Some(mode) = cli.start {
        app.start_session(mode.into());
    }
    info!(difficulty = %app.difficulty, "vimtype started");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(TICK_RATE);

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = app.config.save() {
        warn!(error = %err, "config save failed");
    }

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick => app.tick(),
            AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Menu => handle_menu_key(app, key),
        AppScreen::Session => handle_session_key(app, key),
    }
}

fn handle_menu_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char(ch @ '1'..='9') => {
            if let Some(kind) = Menu::kind_for_key(ch) {
                app.start_session(kind);
            }
        }
        KeyCode::Up | KeyCode::Char('k') => app.menu.prev(),
        KeyCode::Down | KeyCode::Char('j') => app.menu.next(),
        KeyCode::Left | KeyCode::Char('h') => app.set_difficulty(app.difficulty.prev()),
        KeyCode::Right | KeyCode::Char('l') => app.set_difficulty(app.difficulty.next()),
        KeyCode::Enter => app.start_session(app.menu.selected_kind()),
        _ => {}
    }
}

fn handle_session_key(app: &mut App, key: KeyEvent) {
    // Esc belongs to the simulated editor, so leaving uses a chord
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('q') {
        app.leave_session();
        return;
    }
    if let Some(token) = event::to_key(&key) {
        app.handle_session_key(token);
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Menu => render_menu(frame, app),
        AppScreen::Session => render_session(frame, app),
    }
}

fn render_menu(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " vimtype ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {} keys ", app.key_set.len()),
            Style::default()
                .fg(colors.text_pending())
                .bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, layout[0]);

    let menu_area = ui::layout::centered_rect(50, 70, layout[1]);
    frame.render_widget(MenuView::new(&app.menu, app.difficulty, &app.theme), menu_area);

    let footer = Paragraph::new(Line::from(Span::styled(
        " [1-3] Start  [j/k] Select  [h/l] Difficulty  [q] Quit ",
        Style::default().fg(colors.text_pending()),
    )));
    frame.render_widget(footer, layout[2]);
}

fn render_session(frame: &mut ratatui::Frame, app: &App) {
    let Some(session) = app.session.as_deref() else {
        return;
    };
    let area = frame.area();
    let colors = &app.theme.colors;
    let app_layout = AppLayout::new(area, app.config.show_keyboard);

    let title = match session.kind() {
        SessionKind::Lesson => " Lesson ",
        SessionKind::Drill => " Drill ",
        SessionKind::Challenge => " Challenge ",
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            title,
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {} | {} ", app.difficulty.label(), session.progress_label()),
            Style::default()
                .fg(colors.text_pending())
                .bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, app_layout.header);

    let (instruction_fg, border_fg) = match app.feedback() {
        Some(Feedback::Success) => (colors.success(), colors.success()),
        Some(Feedback::Miss) => (colors.error(), colors.error()),
        None => (colors.fg(), colors.border()),
    };
    let instruction = Paragraph::new(Line::from(Span::styled(
        session.instruction(),
        Style::default()
            .fg(instruction_fg)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(Block::bordered().border_style(Style::default().fg(border_fg)));
    frame.render_widget(instruction, app_layout.instruction);

    frame.render_widget(EditorView::new(session.editor(), &app.theme), app_layout.editor);

    if let Some(keys_area) = app_layout.keys {
        let strip = KeyStrip::new(
            &app.key_set,
            session.highlighted_target(),
            app.pressed_key(),
            &app.theme,
        );
        frame.render_widget(strip, keys_area);
    }

    let hint = match session.kind() {
        SessionKind::Lesson => " [Space] Next step  [Ctrl+q] Menu  [Ctrl+c] Quit ",
        _ => " [Ctrl+q] Menu  [Ctrl+c] Quit ",
    };
    let footer = Paragraph::new(Line::from(Span::styled(
        hint,
        Style::default().fg(colors.text_pending()),
    )));
    frame.render_widget(footer, app_layout.footer);
}
