use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::ui::app::{App, Move};

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if is_ctrl_char(key, 'c') {
        app.request_quit();
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.request_quit(),
        KeyCode::Left | KeyCode::Char('h') => app.move_selection(Move::Left),
        KeyCode::Right | KeyCode::Char('l') => app.move_selection(Move::Right),
        KeyCode::Up | KeyCode::Char('k') => app.move_selection(Move::Up),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection(Move::Down),
        KeyCode::Enter | KeyCode::Char(' ') => app.toggle_selected_favorite(),
        KeyCode::Char('f') => app.toggle_filter(),
        KeyCode::Char('y') => app.copy_selected_url(),
        KeyCode::Char('r') => app.request_refresh(),
        _ => {}
    }
}

pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => app.on_mouse_click(mouse.column, mouse.row),
        MouseEventKind::ScrollDown => app.scroll(1),
        MouseEventKind::ScrollUp => app.scroll(-1),
        _ => {}
    }
}

fn is_ctrl_char(key: KeyEvent, needle: char) -> bool {
    matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&needle))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}
