mod config;
mod form;
mod format;
mod loan;
mod shell;
mod ui;
mod validation;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{fs::OpenOptions, io};

use config::Config;
use form::FormState;
use shell::Shell;
use ui::{map_key, Action, TerminalView};

fn main() -> Result<()> {
    let config_path = Config::default_path();
    let config = Config::load(&config_path)?;
    init_logging(&config)?;
    log::info!(
        "starting emi-calc (config: {}, exists: {})",
        config_path.display(),
        config_path.exists()
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &config, event::read);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        log::error!("{:?}", err);
    }

    log::info!("exiting");
    res
}

// The alternate screen owns the terminal, so log lines go to a file.
fn init_logging(config: &Config) -> Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("opening log file {}", config.log_file.display()))?;

    env_logger::Builder::new()
        .filter_level(config.level_filter()?)
        .parse_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    config: &Config,
    mut next_event: impl FnMut() -> io::Result<Event>,
) -> Result<()> {
    let state = FormState::new(config.defaults.to_fields());
    let mut shell = Shell::new(state, TerminalView::new(terminal, &config.currency));
    shell.refresh()?;

    loop {
        match next_event()? {
            Event::Key(key) => match map_key(key, shell.state()) {
                Some(Action::Quit) => return Ok(()),
                Some(Action::Form(form_event)) => shell.dispatch(form_event)?,
                None => {}
            },
            Event::Resize(_, _) => shell.refresh()?,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;
    use std::collections::VecDeque;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn quits_cleanly_on_escape() {
        let mut terminal = Terminal::new(TestBackend::new(90, 30)).unwrap();
        let mut events: VecDeque<Event> = "100000"
            .chars()
            .map(|c| key(KeyCode::Char(c)))
            .chain([key(KeyCode::Enter), Event::Resize(90, 30), key(KeyCode::Esc)])
            .collect();

        let res = run_app(&mut terminal, &Config::default(), || {
            Ok(events.pop_front().expect("loop should stop at Esc"))
        });
        assert!(res.is_ok());
        assert!(events.is_empty());
    }

    #[test]
    fn event_source_failure_is_returned() {
        let mut terminal = Terminal::new(TestBackend::new(90, 30)).unwrap();
        let res = run_app(&mut terminal, &Config::default(), || {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "tty closed"))
        });
        assert_eq!(res.unwrap_err().to_string(), "tty closed");
    }
}
