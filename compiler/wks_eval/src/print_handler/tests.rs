use super::*;
use pretty_assertions::assert_eq;

#[test]
fn buffer_handler_accumulates() {
    let handler = BufferPrintHandler::new();
    handler.print("hello");
    handler.print(" ");
    handler.print("world\n");
    assert_eq!(handler.get_output(), "hello world\n");
}

#[test]
fn buffer_handler_clear_empties_buffer() {
    let handler = buffer_handler();
    handler.print("hello\n");
    assert!(!handler.get_output().is_empty());
    handler.clear();
    assert!(handler.get_output().is_empty());
}

#[test]
fn silent_handler_discards_output() {
    let handler = silent_handler();
    handler.print("hello");
    handler.clear();
    assert_eq!(handler.get_output(), "");
}

#[test]
fn stdout_handler_captures_nothing() {
    let handler = stdout_handler();
    assert_eq!(handler.get_output(), "");
}
