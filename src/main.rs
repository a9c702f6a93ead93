#![warn(clippy::all, clippy::pedantic)]

use std::io;
use std::os::fd::AsRawFd;
use std::time::{Duration, Instant};

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{debug, error, info};
use ratatui::{Terminal, prelude::*};

use tetrix::app::{App, AppResult};
use tetrix::components::MatchState;
use tetrix::config::Config;
use tetrix::engine;
use tetrix::input::{self, Command};
use tetrix::timing::TimingController;
use tetrix::{Time, ui};

fn main() -> AppResult<()> {
    // Create log file and redirect stderr to it so panics and log output
    // don't tear up the alternate screen
    let log_path = "tetrix.log";
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)?;

    let stderr_handle = std::io::stderr();
    let stderr_fd = stderr_handle.as_raw_fd();
    let log_file_fd = log_file.as_raw_fd();

    // Safety: We're redirecting stderr to our log file using standard POSIX operations
    unsafe {
        libc::dup2(log_file_fd, stderr_fd);
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_module_path(false)
        .init();

    info!("Starting TetriX");

    if Config::force_reload() {
        info!("Configuration loaded");
    } else {
        error!("Failed to load configuration, continuing with defaults");
    }

    // Terminal initialization
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let tick_rate = Duration::from_millis(33); // ~30 FPS render
    let game_tick_rate = Duration::from_millis(50); // Engine timers update less often

    let room_name = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Unnamed Room".to_string());
    let app = App::new(room_name);
    let res = run_app(&mut terminal, app, tick_rate, game_tick_rate);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("Game error: {err:?}");
    }

    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    tick_rate: Duration,
    game_tick_rate: Duration,
) -> AppResult<()> {
    let mut last_render = Instant::now();
    let mut last_game_tick = Instant::now();
    let mut timing = TimingController::new(app.world.resource::<MatchState>());

    // Flush any pending input events that might be in the buffer
    while event::poll(Duration::from_millis(0))? {
        let _ = event::read()?;
    }

    loop {
        // Draw the room
        if last_render.elapsed() >= tick_rate {
            terminal.draw(|f| ui::render(f, &mut app))?;
            last_render = Instant::now();
        }

        // Advance the drop timer and match clock
        if last_game_tick.elapsed() >= game_tick_rate {
            last_game_tick = Instant::now();

            let delta_seconds = {
                let mut time = app.world.resource_mut::<Time>();
                time.update();
                time.delta_seconds()
            };
            timing.update(&mut app.world, delta_seconds);
        }

        if app.should_quit {
            return Ok(());
        }

        // Process keyboard input; each key event maps to exactly one
        // engine command
        if event::poll(Duration::from_millis(5))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }
                debug!("Key event: {key:?}");

                if input::should_quit(key) {
                    app.should_quit = true;
                    continue;
                }

                let is_game_over = app.world.resource::<MatchState>().game_over;
                if is_game_over && key.code == KeyCode::Enter {
                    engine::apply(&mut app.world, Command::Restart);
                    continue;
                }

                if let Some(command) = input::map_key(key) {
                    engine::apply(&mut app.world, command);
                }
            }
        }
    }
}
