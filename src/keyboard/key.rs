use std::fmt;

/// A single input token delivered by the host.
///
/// Tokens compare by value: `Char('g')` twice is the two-token sequence
/// `gg`, while `Ctrl('d')` is one token even though it displays as
/// `Ctrl+d`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Ctrl(char),
    Enter,
    Esc,
    Backspace,
    Tab,
}

/// Token used by lessons to move to the next step.
pub const ADVANCE: Key = Key::Char(' ');

impl Key {
    /// The character for plain printable tokens.
    pub fn as_char(self) -> Option<char> {
        match self {
            Key::Char(ch) => Some(ch),
            _ => None,
        }
    }

    /// Short label for compact UI contexts such as the key strip title.
    pub fn short_label(self) -> String {
        match self {
            Key::Char(' ') => "Spc".to_string(),
            Key::Backspace => "Bksp".to_string(),
            Key::Enter => "Ent".to_string(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(ch) => write!(f, "{ch}"),
            Key::Ctrl(ch) => write!(f, "Ctrl+{ch}"),
            Key::Enter => f.write_str("<Enter>"),
            Key::Esc => f.write_str("<Esc>"),
            Key::Backspace => f.write_str("<BS>"),
            Key::Tab => f.write_str("<Tab>"),
        }
    }
}

fn named_key(name: &str) -> Option<Key> {
    match name {
        "Enter" | "CR" | "Return" => Some(Key::Enter),
        "Esc" | "Escape" => Some(Key::Esc),
        "BS" | "Backspace" => Some(Key::Backspace),
        "Tab" => Some(Key::Tab),
        "Space" => Some(Key::Char(' ')),
        _ => {
            let rest = name.strip_prefix("C-")?;
            let mut chars = rest.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => Some(Key::Ctrl(ch)),
                _ => None,
            }
        }
    }
}

/// Parse a key-sequence notation into tokens.
///
/// Every character is one token, except `<Name>` groups (`<Enter>`,
/// `<Esc>`, `<BS>`, `<Tab>`, `<Space>`, `<C-x>`) and a whole entry of the
/// form `Ctrl+x`. Unknown or unterminated `<...>` groups are kept as
/// literal characters.
pub fn parse_sequence(notation: &str) -> Vec<Key> {
    if let Some(rest) = notation.strip_prefix("Ctrl+") {
        let mut chars = rest.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            return vec![Key::Ctrl(ch)];
        }
    }

    let chars: Vec<char> = notation.chars().collect();
    let mut keys = Vec::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '<' {
            if let Some(len) = chars[i + 1..].iter().position(|&c| c == '>') {
                let name: String = chars[i + 1..i + 1 + len].iter().collect();
                if let Some(key) = named_key(&name) {
                    keys.push(key);
                    i += len + 2;
                    continue;
                }
            }
        }
        keys.push(Key::Char(chars[i]));
        i += 1;
    }
    keys
}

/// Render a token sequence back into notation.
pub fn format_sequence(keys: &[Key]) -> String {
    keys.iter().map(Key::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_characters_are_one_token_each() {
        assert_eq!(
            parse_sequence("jjw"),
            vec![Key::Char('j'), Key::Char('j'), Key::Char('w')]
        );
        assert_eq!(parse_sequence("gg").len(), 2);
        assert_eq!(parse_sequence("''"), vec![Key::Char('\''), Key::Char('\'')]);
    }

    #[test]
    fn test_named_keys_inside_sequence() {
        let keys = parse_sequence("/total<Enter>");
        assert_eq!(keys.len(), 7);
        assert_eq!(keys[0], Key::Char('/'));
        assert_eq!(keys[6], Key::Enter);

        let keys = parse_sequence("wcwn<Esc>");
        assert_eq!(keys.last(), Some(&Key::Esc));
        assert_eq!(parse_sequence("<C-d>"), vec![Key::Ctrl('d')]);
    }

    #[test]
    fn test_ctrl_entry_is_single_token() {
        assert_eq!(parse_sequence("Ctrl+d"), vec![Key::Ctrl('d')]);
        // Only a whole entry counts as a modified key
        assert_eq!(parse_sequence("Ctrl+dd").len(), 7);
    }

    #[test]
    fn test_unknown_or_unterminated_groups_stay_literal() {
        assert_eq!(
            parse_sequence("<x>"),
            vec![Key::Char('<'), Key::Char('x'), Key::Char('>')]
        );
        assert_eq!(parse_sequence("a<Enter").len(), 7);
        assert_eq!(parse_sequence("<").len(), 1);
    }

    #[test]
    fn test_format_sequence() {
        assert_eq!(format_sequence(&parse_sequence("/total<Enter>")), "/total<Enter>");
        assert_eq!(format_sequence(&[Key::Ctrl('u')]), "Ctrl+u");
        assert_eq!(Key::Char(' ').short_label(), "Spc");
    }
}
