use super::*;

fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent::new(code, modifiers)
}

#[test]
fn keys_map_to_shell_input() {
    assert_eq!(
        map_key(press(KeyCode::Char('a'), KeyModifiers::NONE)),
        Some(ShellKey::Char('a'))
    );
    assert_eq!(
        map_key(press(KeyCode::Char('G'), KeyModifiers::SHIFT)),
        Some(ShellKey::Char('G'))
    );
    assert_eq!(
        map_key(press(KeyCode::Enter, KeyModifiers::NONE)),
        Some(ShellKey::Enter)
    );
    assert_eq!(
        map_key(press(KeyCode::Backspace, KeyModifiers::NONE)),
        Some(ShellKey::Backspace)
    );
    assert_eq!(
        map_key(press(KeyCode::Esc, KeyModifiers::NONE)),
        Some(ShellKey::Quit)
    );
    assert_eq!(
        map_key(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        Some(ShellKey::Quit)
    );
    assert_eq!(map_key(press(KeyCode::Tab, KeyModifiers::NONE)), None);
}

#[test]
fn releases_are_ignored() {
    let mut ev = press(KeyCode::Char('r'), KeyModifiers::NONE);
    ev.kind = KeyEventKind::Release;
    assert_eq!(map_key(ev), None);
}
