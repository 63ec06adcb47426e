mod event;
mod showcase;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::Backend, backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

use petal_config::Config;
use petal_logger::LogLevel;
use petal_theme::set_themes_dir;

use event::{Event, EventHandler};
use showcase::Showcase;

fn main() -> Result<()> {
    // Load config first to get theme and logging settings
    let config = Config::load().unwrap_or_default();

    // Initialize theme system with themes directory from config
    if let Ok(themes_dir) = Config::get_themes_dir() {
        set_themes_dir(themes_dir);
    }

    let min_level = config
        .logging
        .min_level
        .parse()
        .unwrap_or(LogLevel::Info);
    petal_logger::init(
        config.log_file_path().ok(),
        config.logging.max_entries,
        min_level,
    );
    log::info!("Petal showcase starting with theme '{}'", config.general.theme);

    let mut showcase = Showcase::new(&config)?;

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut showcase);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Print error if there was one
    if let Err(err) = result {
        log::error!("Showcase failed: {:?}", err);
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn run<B: Backend>(terminal: &mut Terminal<B>, showcase: &mut Showcase) -> Result<()> {
    let events = EventHandler::new(Duration::from_millis(250));
    let mut needs_redraw = true;

    while !showcase.should_quit {
        if needs_redraw {
            terminal.draw(|frame| showcase.render(frame))?;
            needs_redraw = false;
        }

        match events.next()? {
            Event::Key(key) => {
                showcase.handle_key(key)?;
                needs_redraw = true;
            }
            Event::Mouse(mouse) => {
                showcase.handle_mouse(mouse)?;
                needs_redraw = true;
            }
            Event::Resize => needs_redraw = true,
            Event::Tick => {}
        }
    }

    Ok(())
}
