use std::io;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::Backend, backend::CrosstermBackend, Terminal};
use tracing::info;

use cocoon_core::AppConfig;
use cocoon_tui::{
    app::App,
    event::{AppEvent, EventHandler},
    input::{handle_key_event, Action},
    keymap::Keymap,
    scroll::{ScrollConfigExt, Step},
    widgets,
};

pub async fn run(config: Arc<AppConfig>, no_reveal: bool) -> Result<()> {
    let config = if no_reveal {
        let mut config = (*config).clone();
        config.ui.intersection_observer = false;
        Arc::new(config)
    } else {
        config
    };

    // Create keymap from config
    let keymap = Keymap::from_config(&config.keymap);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("COCOON"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!(reveal = config.ui.intersection_observer, "starting");
    let result = run_app(&mut terminal, config, &keymap);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, config: Arc<AppConfig>, keymap: &Keymap) -> Result<()> {
    let mut app = App::new(config.clone());

    // Create event handler with animation FPS support
    let event_handler = EventHandler::new(
        config.ui.tick_rate_ms,
        config.ui.scroll.animation_tick_duration(),
    );

    // The first frames run the hero entrance
    let mut needs_fast_update = true;

    loop {
        app.prepare_frame(Instant::now(), terminal.size()?);
        terminal.draw(|frame| widgets::draw(frame, &app))?;

        // Handle events (use faster tick rate while anything animates)
        let event = if needs_fast_update {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };
        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, &app, keymap);
                    handle_action(&mut app, action);
                }
                AppEvent::Scroll(rows) => app.scroll_by(rows),
                // Layout follows the terminal size on the next frame
                AppEvent::Resize(_, _) | AppEvent::Tick => {}
            }
        }

        // Checked at the end of each iteration to pick the next tick rate
        needs_fast_update = app.needs_fast_update();

        if app.should_quit {
            break;
        }
    }

    app.unmount();
    info!("quit");
    Ok(())
}

fn handle_action(app: &mut App, action: Action) {
    // Any key other than a sequence prefix ends the sequence
    if !matches!(action, Action::Pending(_)) {
        app.clear_pending_key();
    }

    match action {
        Action::Quit => {
            app.should_quit = true;
        }
        Action::ScrollDown => app.step(Step::Line, true),
        Action::ScrollUp => app.step(Step::Line, false),
        Action::ScrollHalfPageDown => app.step(Step::HalfPage, true),
        Action::ScrollHalfPageUp => app.step(Step::HalfPage, false),
        Action::ScrollPageDown => app.step(Step::Page, true),
        Action::ScrollPageUp => app.step(Step::Page, false),
        Action::JumpToTop => app.jump_to_top(),
        Action::JumpToBottom => app.jump_to_bottom(),
        Action::Pending(key) => {
            app.pending_key = Some(key);
        }
        Action::NextSection => app.next_section(),
        Action::PrevSection => app.prev_section(),
        Action::Navigate(index) => app.navigate(index),
        Action::ToggleMenu => app.toggle_menu(),
        Action::MenuUp => app.menu_up(),
        Action::MenuDown => app.menu_down(),
        Action::MenuSelect => app.menu_select(),
        Action::Apply => app.apply(),
        Action::ExitMode => app.exit_mode(),
        Action::None => {}
    }
}
