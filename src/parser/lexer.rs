use std::iter::Peekable;
use std::str::Chars;

use super::types::{Token, TokenKind};

/// Tokenizer over the text of a style literal.
///
/// Comments are skipped. String, template and regex literals become single
/// tokens, so braces inside them never affect nesting.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    /// Whether a `/` here starts a regex literal rather than a division.
    regex_allowed: bool,
}

impl<'a> Lexer<'a> {
    /// Lex `text`, whose first character sits on source line `line`.
    pub fn new(text: &'a str, line: usize) -> Self {
        Self {
            chars: text.chars().peekable(),
            line,
            regex_allowed: true,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        if ch == '\n' {
            self.line += 1;
        }
        Some(ch)
    }

    fn skip_line_comment(&mut self) {
        while let Some(&ch) = self.chars.peek() {
            if ch == '\n' {
                break;
            }
            self.bump();
        }
    }

    fn skip_block_comment(&mut self) {
        let mut prev = '\0';
        while let Some(ch) = self.bump() {
            if prev == '*' && ch == '/' {
                return;
            }
            prev = ch;
        }
    }

    /// Read a quoted string after its opening quote. Stops at the closing
    /// quote or, for an unterminated literal, at the end of the line.
    fn read_string(&mut self, quote: char) -> String {
        let mut out = String::new();
        let mut escaped = false;

        while let Some(&ch) = self.chars.peek() {
            if ch == '\n' && !escaped {
                break;
            }
            self.bump();
            if escaped {
                out.push(ch);
                escaped = false;
                continue;
            }
            if ch == '\\' {
                escaped = true;
                continue;
            }
            if ch == quote {
                break;
            }
            out.push(ch);
        }

        out
    }

    /// Skip a template literal after its opening backtick, including any
    /// `${ ... }` interpolations.
    fn skip_template(&mut self) {
        let mut escaped = false;
        let mut interpolation_depth = 0usize;

        while let Some(ch) = self.bump() {
            if escaped {
                escaped = false;
                continue;
            }
            match ch {
                '\\' => escaped = true,
                '`' if interpolation_depth == 0 => return,
                '$' if interpolation_depth == 0 && self.chars.peek() == Some(&'{') => {
                    self.bump();
                    interpolation_depth = 1;
                }
                '{' if interpolation_depth > 0 => interpolation_depth += 1,
                '}' if interpolation_depth > 0 => interpolation_depth -= 1,
                _ => {}
            }
        }
    }

    /// Skip a regex literal after its opening `/`, then its flags. An
    /// unterminated literal ends at the end of the line.
    fn skip_regex(&mut self) {
        let mut escaped = false;
        let mut in_class = false;

        while let Some(&ch) = self.chars.peek() {
            if ch == '\n' {
                return;
            }
            self.bump();
            if escaped {
                escaped = false;
                continue;
            }
            match ch {
                '\\' => escaped = true,
                '[' => in_class = true,
                ']' => in_class = false,
                '/' if !in_class => break,
                _ => {}
            }
        }

        while let Some(&ch) = self.chars.peek() {
            if !is_word_char(ch) {
                break;
            }
            self.bump();
        }
    }

    fn read_word(&mut self, first: char) -> String {
        let mut word = String::new();
        word.push(first);
        while let Some(&ch) = self.chars.peek() {
            if is_word_char(ch) {
                word.push(ch);
                self.bump();
            } else {
                break;
            }
        }
        word
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            let line = self.line;
            let ch = self.bump()?;

            let kind = match ch {
                c if c.is_whitespace() => continue,
                '/' => match self.chars.peek().copied() {
                    Some('/') => {
                        self.skip_line_comment();
                        continue;
                    }
                    Some('*') => {
                        self.bump();
                        self.skip_block_comment();
                        continue;
                    }
                    _ if self.regex_allowed => {
                        self.skip_regex();
                        TokenKind::Regex
                    }
                    _ => TokenKind::Other('/'),
                },
                '{' => TokenKind::LBrace,
                '}' => TokenKind::RBrace,
                '(' => TokenKind::LParen,
                ')' => TokenKind::RParen,
                '[' => TokenKind::LBracket,
                ']' => TokenKind::RBracket,
                ':' => TokenKind::Colon,
                ',' => TokenKind::Comma,
                '.' => {
                    let mut ahead = self.chars.clone();
                    if ahead.next() == Some('.') && ahead.next() == Some('.') {
                        self.bump();
                        self.bump();
                        TokenKind::Spread
                    } else {
                        TokenKind::Other('.')
                    }
                }
                '\'' | '"' => TokenKind::Str(self.read_string(ch)),
                '`' => {
                    self.skip_template();
                    TokenKind::Template
                }
                c if is_word_char(c) => TokenKind::Word(self.read_word(c)),
                c => TokenKind::Other(c),
            };

            self.regex_allowed = starts_operand(&kind);
            return Some(Token { kind, line });
        }
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}

/// True when the token after `kind` begins an expression, so a `/` there
/// opens a regex. `<` is left out so JSX closing tags lex as `<` `/`.
fn starts_operand(kind: &TokenKind) -> bool {
    match kind {
        TokenKind::LParen
        | TokenKind::LBracket
        | TokenKind::LBrace
        | TokenKind::Colon
        | TokenKind::Comma
        | TokenKind::Spread => true,
        TokenKind::Other(c) => matches!(
            *c,
            '=' | '?' | '!' | '&' | '|' | '+' | '-' | '*' | '%' | '~' | '^' | ';'
        ),
        TokenKind::Word(w) => matches!(
            w.as_str(),
            "return" | "typeof" | "case" | "in" | "of" | "new" | "delete" | "void" | "throw"
        ),
        _ => false,
    }
}
