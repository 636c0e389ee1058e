//! Keyboard input handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::runtime::{App, Screen};
use crate::model::Category;

/// Maps a key event to an application action.
///
/// Guards on [`KeyEventKind::Press`] to avoid double-fire on some terminals.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    if app.upload_input.is_some() {
        prompt_key(app, key.code);
        return;
    }
    match key.code {
        KeyCode::Char('q') => app.quit = true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit = true,
        _ => match app.screen {
            Screen::Landing => landing_key(app, key.code),
            Screen::Viewer => viewer_key(app, key.code),
        },
    }
}

fn landing_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.quit = true,
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Enter => app.open_selected(),
        KeyCode::Char('r') => app.refresh_files(),
        KeyCode::Char('v') => app.view_current(),
        KeyCode::Char('o') => app.begin_upload(),
        _ => {}
    }
}

/// While the path prompt is open every character goes into the path.
fn prompt_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Enter => app.submit_upload(),
        KeyCode::Esc => app.cancel_upload(),
        KeyCode::Backspace => app.pop_upload_char(),
        KeyCode::Char(c) => app.push_upload_char(c),
        _ => {}
    }
}

fn viewer_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('b') | KeyCode::Esc => app.back(),
        KeyCode::Char('1') => app.toggle(Category::Building),
        KeyCode::Char('2') => app.toggle(Category::Equipment),
        KeyCode::Char('3') => app.toggle(Category::Silo),
        KeyCode::Char('4') => app.toggle(Category::Marker),
        KeyCode::Char('m') => app.toggle_metadata(),
        KeyCode::Char('c') => app.toggle_controls(),
        KeyCode::Char('e') => app.export(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEvent;

    use super::*;
    use crate::library::JsonLibrary;
    use crate::session::ViewerSession;
    use crate::store::MemorySlotStore;

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn prompt_captures_typed_path() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("quarry.json");
        std::fs::write(
            &path,
            r#"{"misc":[{"id":"m1","position":{"x":0,"y":0,"z":0},"name":"A"}]}"#,
        )
        .unwrap();
        let mut app = App::new(
            JsonLibrary::new(tmp.path().join("library")),
            Box::new(MemorySlotStore::default()),
            ViewerSession::default(),
        );

        press(&mut app, KeyCode::Char('o'));
        assert_eq!(app.upload_input.as_deref(), Some(""));
        for c in path.display().to_string().chars() {
            press(&mut app, KeyCode::Char(c));
        }
        // `q` is text while the prompt is open
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.quit);
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.screen, Screen::Viewer);
        assert!(app.upload_input.is_none());
        assert_eq!(app.scene().drawables.len(), 1);
    }

    #[test]
    fn escape_closes_prompt_without_quitting() {
        let tmp = tempfile::tempdir().unwrap();
        let mut app = App::new(
            JsonLibrary::new(tmp.path()),
            Box::new(MemorySlotStore::default()),
            ViewerSession::default(),
        );
        press(&mut app, KeyCode::Char('o'));
        press(&mut app, KeyCode::Esc);
        assert!(app.upload_input.is_none());
        assert!(!app.quit);

        press(&mut app, KeyCode::Esc);
        assert!(app.quit);
    }
}
