use crate::editor::buffer::{self, CursorPosition, TextBuffer};

pub fn insert_char(buf: &mut TextBuffer, cursor: &mut CursorPosition, ch: char) {
    *cursor = buf.clamp_insert(*cursor);
    let line = buf.line_mut(cursor.line);
    let at = buffer::byte_offset(line, cursor.col);
    line.insert(at, ch);
    cursor.col += 1;
}

/// Delete left of the cursor, joining onto the previous line at column 0.
pub fn backspace(buf: &mut TextBuffer, cursor: &mut CursorPosition) {
    *cursor = buf.clamp_insert(*cursor);
    if cursor.col > 0 {
        let line = buf.line_mut(cursor.line);
        let at = buffer::byte_offset(line, cursor.col - 1);
        line.remove(at);
        cursor.col -= 1;
    } else if cursor.line > 0 {
        let current = buf.remove_line(cursor.line);
        cursor.line -= 1;
        cursor.col = buf.line_len(cursor.line);
        buf.line_mut(cursor.line).push_str(&current);
    }
}

pub fn delete_char_at_cursor(buf: &mut TextBuffer, cursor: &mut CursorPosition) {
    let len = buf.line_len(cursor.line);
    if len == 0 || cursor.col >= len {
        return;
    }
    let line = buf.line_mut(cursor.line);
    let at = buffer::byte_offset(line, cursor.col);
    line.remove(at);
    if cursor.col >= len - 1 && cursor.col > 0 {
        cursor.col -= 1;
    }
}

/// Visual-mode delete.
///
/// Only the character under the cursor is removed; the selection extent
/// is ignored. Range deletion needs a selection model the simulator does
/// not have.
pub fn delete_selection(buf: &mut TextBuffer, cursor: &mut CursorPosition) {
    delete_char_at_cursor(buf, cursor);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(line: usize, col: usize) -> CursorPosition {
        CursorPosition::new(line, col)
    }

    #[test]
    fn test_insert_splices_and_advances() {
        let mut b = TextBuffer::from_text("pss");
        let mut c = at(0, 1);
        insert_char(&mut b, &mut c, 'a');
        assert_eq!(b.line(0), "pass");
        assert_eq!(c, at(0, 2));
        let mut end = at(0, 4);
        insert_char(&mut b, &mut end, '!');
        assert_eq!(b.line(0), "pass!");
        assert_eq!(end, at(0, 5));
    }

    #[test]
    fn test_backspace_undoes_insert() {
        for col in 0..=5 {
            let mut b = TextBuffer::from_text("héllo");
            let mut c = at(0, col);
            insert_char(&mut b, &mut c, 'x');
            backspace(&mut b, &mut c);
            assert_eq!(b.line(0), "héllo");
            assert_eq!(c, at(0, col));
        }
    }

    #[test]
    fn test_backspace_joins_lines() {
        let mut b = TextBuffer::from_lines(&["abc", "def", "ghi"]);
        let mut c = at(1, 0);
        backspace(&mut b, &mut c);
        assert_eq!(b.lines(), &["abcdef", "ghi"]);
        assert_eq!(c, at(0, 3));
    }

    #[test]
    fn test_backspace_at_origin_is_noop() {
        let mut b = TextBuffer::from_lines(&["abc", "def"]);
        let mut c = at(0, 0);
        backspace(&mut b, &mut c);
        assert_eq!(b.lines(), &["abc", "def"]);
        assert_eq!(c, at(0, 0));
    }

    #[test]
    fn test_delete_char_moves_back_at_line_end() {
        let mut b = TextBuffer::from_text("abc");
        let mut c = at(0, 2);
        delete_char_at_cursor(&mut b, &mut c);
        assert_eq!(b.line(0), "ab");
        assert_eq!(c, at(0, 1));

        let mut c = at(0, 0);
        delete_char_at_cursor(&mut b, &mut c);
        assert_eq!(b.line(0), "b");
        assert_eq!(c, at(0, 0));
        delete_char_at_cursor(&mut b, &mut c);
        assert_eq!(b.line(0), "");
        assert_eq!(c, at(0, 0));
        delete_char_at_cursor(&mut b, &mut c);
        assert_eq!(b.line(0), "");
    }

    #[test]
    fn test_delete_selection_removes_one_char() {
        let mut b = TextBuffer::from_text("abcdef");
        let mut c = at(0, 3);
        delete_selection(&mut b, &mut c);
        assert_eq!(b.line(0), "abcef");
        assert_eq!(c, at(0, 3));
    }
}
