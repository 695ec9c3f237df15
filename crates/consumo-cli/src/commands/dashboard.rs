//! Interactive dashboard command.

use crate::commands::predict::validate_dir;
use crate::error::Result;
use crate::tui::{ui, App};
use consumo::bundle::ModelBundle;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::Backend, backend::CrosstermBackend, Terminal};
use std::io;
use std::path::Path;
use std::time::Duration;

/// Launch the dashboard over the artifacts in `dir`.
///
/// Loading happens before the terminal is switched to raw mode, so a broken
/// bundle fails with a normal error message instead of a garbled screen.
pub(crate) fn run(dir: &Path) -> Result<()> {
    validate_dir(dir)?;
    let bundle = ModelBundle::load(dir)?;
    let app = App::new(bundle, dir.to_path_buf());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    res
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, &app))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key.code);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;

    #[test]
    fn test_run_rejects_missing_dir() {
        let err = run(Path::new("/nonexistent/artifacts")).unwrap_err();
        assert!(matches!(err, CliError::DirNotFound(_)));
    }

    #[test]
    fn test_run_rejects_empty_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = run(dir.path()).unwrap_err();
        assert!(err.to_string().contains("columns.json"));
    }
}
