//! Minimal Python-ish syntax classification for the editor view.
//!
//! Works one line at a time; strings never span lines and there is no
//! notion of nesting. Good enough for the short seed snippets.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Plain,
    Keyword,
    Str,
    Comment,
    Number,
    Function,
}

const KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "break", "class", "continue", "def", "elif", "else",
    "for", "from", "if", "import", "in", "is", "lambda", "not", "or", "pass", "return",
    "while", "with", "yield",
];

const STRING_PREFIXES: &[&str] = &["f", "r", "b", "rb", "br", "fr", "rf"];

/// One [`TokenKind`] per char of `line`.
pub fn classify_line(line: &str) -> Vec<TokenKind> {
    let chars: Vec<char> = line.chars().collect();
    let mut kinds = vec![TokenKind::Plain; chars.len()];
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        if ch == '#' {
            kinds[i..].fill(TokenKind::Comment);
            break;
        }
        if ch == '"' || ch == '\'' {
            let end = string_end(&chars, i);
            kinds[i..end].fill(TokenKind::Str);
            i = end;
            continue;
        }
        if ch.is_ascii_digit() {
            let end = scan(&chars, i, |c| c.is_ascii_alphanumeric() || c == '.' || c == '_');
            kinds[i..end].fill(TokenKind::Number);
            i = end;
            continue;
        }
        if ch.is_alphabetic() || ch == '_' {
            let end = scan(&chars, i, |c| c.is_alphanumeric() || c == '_');
            let word: String = chars[i..end].iter().collect();
            let next = chars.get(end).copied();

            if matches!(next, Some('"' | '\'')) && STRING_PREFIXES.contains(&word.as_str()) {
                let str_end = string_end(&chars, end);
                kinds[i..str_end].fill(TokenKind::Str);
                i = str_end;
                continue;
            }

            let kind = if KEYWORDS.contains(&word.as_str()) {
                TokenKind::Keyword
            } else if next == Some('(') {
                TokenKind::Function
            } else {
                TokenKind::Plain
            };
            kinds[i..end].fill(kind);
            i = end;
            continue;
        }
        i += 1;
    }

    kinds
}

fn scan(chars: &[char], start: usize, pred: impl Fn(char) -> bool) -> usize {
    let mut end = start;
    while end < chars.len() && pred(chars[end]) {
        end += 1;
    }
    end
}

/// Index one past the closing quote, or the line end if unterminated.
fn string_end(chars: &[char], start: usize) -> usize {
    let quote = chars[start];
    let mut i = start + 1;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 2,
            c if c == quote => return i + 1,
            _ => i += 1,
        }
    }
    chars.len()
}
