//! Message body reader for `show`.

use std::io::{self, BufRead};

/// Read body lines until one equals `end_mark`.
///
/// The end-mark line itself is consumed and dropped. One trailing newline is
/// stripped from the result. Hitting EOF first is not an error: whatever was
/// read so far becomes the body.
///
/// Lines are decoded lossily: invalid UTF-8 becomes U+FFFD, so a bad byte
/// never ends the body early and the rest of it is never taken for commands.
pub fn read_body<R: BufRead>(input: &mut R, end_mark: &str) -> io::Result<String> {
    let mut text = String::new();
    let mut raw = Vec::new();

    loop {
        raw.clear();
        if input.read_until(b'\n', &mut raw)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&raw);
        if line.strip_suffix('\n').unwrap_or(&line) == end_mark {
            break;
        }
        text.push_str(&line);
    }

    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_stops_at_first_blank_line() {
        let mut input = Cursor::new("hello\nworld\n\nlist-uids\n");
        assert_eq!(read_body(&mut input, "").unwrap(), "hello\nworld");

        // The next command is still in the stream
        let mut rest = String::new();
        input.read_line(&mut rest).unwrap();
        assert_eq!(rest, "list-uids\n");
    }

    #[test]
    fn test_custom_end_mark_keeps_blank_lines() {
        let mut input = Cursor::new("para one\n\npara two\nEOM\n");
        assert_eq!(read_body(&mut input, "EOM").unwrap(), "para one\n\npara two");
    }

    #[test]
    fn test_eof_before_end_mark() {
        let mut input = Cursor::new("partial\ntext");
        assert_eq!(read_body(&mut input, "").unwrap(), "partial\ntext");

        let mut empty = Cursor::new("");
        assert_eq!(read_body(&mut empty, "").unwrap(), "");
    }

    #[test]
    fn test_invalid_utf8_stays_in_body() {
        let mut input = Cursor::new(b"caf\xe9\nquit\n\nlist-uids\n".to_vec());
        assert_eq!(read_body(&mut input, "").unwrap(), "caf\u{fffd}\nquit");

        let mut rest = String::new();
        input.read_line(&mut rest).unwrap();
        assert_eq!(rest, "list-uids\n");
    }

    #[test]
    fn test_end_mark_must_match_whole_line() {
        let mut input = Cursor::new("END of story\nEND\n");
        assert_eq!(read_body(&mut input, "END").unwrap(), "END of story");
    }
}
