use super::*;

#[test]
fn drop_leaves_alternate_screen_and_shows_cursor() {
    let mut out: Vec<u8> = Vec::new();
    {
        let _guard = TerminalGuard::new(&mut out);
    }
    let written = String::from_utf8_lossy(&out);
    assert!(written.contains("\x1b[?1049l"), "{written:?}");
    assert!(written.contains("\x1b[?25h"), "{written:?}");
}

#[test]
fn restore_runs_when_the_guarded_scope_panics() {
    let mut out: Vec<u8> = Vec::new();
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let _guard = TerminalGuard::new(&mut out);
        panic!("event loop failed");
    }));
    assert!(result.is_err());
    assert!(String::from_utf8_lossy(&out).contains("\x1b[?1049l"));
}
