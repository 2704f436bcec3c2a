//! The interactive loop tying [`Editor`] to [`CrosstermDriver`].

use std::error::Error;
use std::time::Duration;

use log::debug;

use crate::driver::{CrosstermDriver, SearchView};
use crate::editor::{Action, Editor, EditorConfig};

/// How long the idle loop waits for input before polling again.
const POLL_INTERVAL: Duration = Duration::from_millis(16);

/// Run the editor in the current terminal until the user quits.
///
/// The terminal is restored before any error is returned.
pub fn run(config: EditorConfig) -> Result<(), Box<dyn Error>> {
    let mut editor = Editor::new(config);
    let mut driver = CrosstermDriver::new(config.cell_width);
    driver.init()?;
    let result = event_loop(&mut editor, &mut driver);
    driver.close();
    result
}

fn event_loop(editor: &mut Editor, driver: &mut CrosstermDriver) -> Result<(), Box<dyn Error>> {
    driver.draw(editor.grid(), &editor.status_line())?;
    loop {
        let Some(msg) = driver.poll(POLL_INTERVAL)? else {
            continue;
        };
        match editor.update(&msg) {
            Action::None => continue,
            Action::Redraw => {}
            Action::Quit => return Ok(()),
            Action::Search => {
                let delay = editor.config().step_delay;
                let mut view = SearchView::new(driver, delay);
                // Rejections are already on the status line.
                if let Err(e) = editor.search(&mut view) {
                    debug!("[app] search rejected: {e}");
                }
                let (quit, error) = view.finish();
                if let Some(e) = error {
                    return Err(e);
                }
                if quit {
                    return Ok(());
                }
            }
        }
        driver.draw(editor.grid(), &editor.status_line())?;
    }
}
