use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
        MouseButton, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;
use std::time::{Duration, Instant};
use student_roster::app::App;
use student_roster::config::RosterConfig;
use student_roster::input::{InputEvent, Key};
use student_roster::logging;
use student_roster::store::FileStorage;
use student_roster::surface::SceneView;
use student_roster::ui;

const FRAME: Duration = Duration::from_millis(16);

fn main() -> anyhow::Result<()> {
    let config = RosterConfig::load();
    logging::init_tracing(&config);
    if !RosterConfig::config_path().exists() {
        if let Err(e) = config.save() {
            tracing::warn!(error = %e, "could not write default config");
        }
    }

    let storage = FileStorage::new(config.resolved_data_path());
    tracing::info!(path = %storage.path().display(), "starting");
    let app = App::new(Box::new(storage));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let res = run_app(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "event loop failed");
        eprintln!("{:?}", err);
    }

    Ok(())
}

/// One engine tick per frame: drain pending terminal events, advance the app,
/// then redraw.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> anyhow::Result<()> {
    let start = Instant::now();
    loop {
        let size = terminal.size()?;
        let area = Rect::new(0, 0, size.width, size.height);

        let mut events = Vec::new();
        if event::poll(FRAME)? {
            loop {
                events.extend(translate(event::read()?, area));
                if !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }

        let now = start.elapsed().as_secs_f64();
        app.tick(&events, now);
        if app.should_quit {
            tracing::info!("quit");
            return Ok(());
        }
        terminal.draw(|f| ui::draw(f, &app, now))?;
    }
}

/// Maps a terminal event onto engine input. Mouse cells become logical points.
fn translate(event: Event, area: Rect) -> Vec<InputEvent> {
    match event {
        Event::Mouse(mouse) => {
            let p = SceneView::to_logical(area, mouse.column, mouse.row);
            let moved = InputEvent::PointerMoved { x: p.x, y: p.y };
            match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => vec![moved, InputEvent::PointerPressed],
                MouseEventKind::Up(MouseButton::Left) => vec![moved, InputEvent::PointerReleased],
                MouseEventKind::Moved | MouseEventKind::Drag(_) => vec![moved],
                MouseEventKind::ScrollDown => vec![InputEvent::Scroll(1)],
                MouseEventKind::ScrollUp => vec![InputEvent::Scroll(-1)],
                _ => Vec::new(),
            }
        }
        Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                vec![InputEvent::Key(Key::Quit)]
            }
            KeyCode::Char(c) => vec![InputEvent::Text(c)],
            KeyCode::Backspace => vec![InputEvent::Key(Key::Backspace)],
            KeyCode::Esc => vec![InputEvent::Key(Key::Escape)],
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}
