use std::fmt;
use std::str::Chars;

use crate::error::{JsonError, JsonOutcome};

/// One lexical unit of JSON text.
///
/// `Quote` is emitted both when a string opens and when it closes, so a
/// string always costs the parser exactly three tokens: quote, decoded
/// content, quote. `Word` covers numbers and the bare literals `true`,
/// `false` and `null`; `Text` is string content with escapes already
/// resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    OpenBrace,
    CloseBrace,
    OpenBracket,
    CloseBracket,
    Comma,
    Colon,
    Quote,
    Word(String),
    Text(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::OpenBrace => write!(f, "{{"),
            Token::CloseBrace => write!(f, "}}"),
            Token::OpenBracket => write!(f, "["),
            Token::CloseBracket => write!(f, "]"),
            Token::Comma => write!(f, ","),
            Token::Colon => write!(f, ":"),
            Token::Quote => write!(f, "\""),
            Token::Word(word) => write!(f, "{word}"),
            Token::Text(text) => write!(f, "{text}"),
        }
    }
}

/// Pull-based tokenizer. Tokens are produced one at a time as the stream is
/// consumed; the sequence is finite for any finite input and restartable only
/// by building a new `Lexer`.
pub struct Lexer<'a> {
    chars: Chars<'a>,
    offset: usize,
    in_string: bool,
    pending: Option<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars(),
            offset: 0,
            in_string: false,
            pending: None,
        }
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.chars.next();
        if ch.is_some() {
            self.offset += 1;
        }
        ch
    }

    /// Consume string content up to and including the closing quote.
    /// Escapes are resolved into literal characters as they are accumulated.
    fn lex_string_content(&mut self) -> JsonOutcome<Token> {
        let mut content = String::new();
        loop {
            match self.next_char() {
                None => {
                    return Err(JsonError::lexing(self.offset, "unterminated string"));
                }
                Some('"') => {
                    self.in_string = false;
                    self.pending = Some(Token::Quote);
                    return Ok(Token::Text(content));
                }
                Some('\\') => match self.next_char() {
                    Some('\\') => content.push('\\'),
                    Some('n') => content.push('\n'),
                    Some('t') => content.push('\t'),
                    Some('r') => content.push('\r'),
                    Some('"') => content.push('"'),
                    Some('b') => content.push('\u{8}'),
                    Some(other) => {
                        return Err(JsonError::lexing(
                            self.offset,
                            &format!("unrecognized escape '\\{other}'"),
                        ));
                    }
                    None => {
                        return Err(JsonError::lexing(self.offset, "unterminated string"));
                    }
                },
                Some(ch) => content.push(ch),
            }
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = JsonOutcome<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(token) = self.pending.take() {
            return Some(Ok(token));
        }
        if self.in_string {
            return Some(self.lex_string_content());
        }

        let mut word = String::new();
        loop {
            let Some(ch) = self.next_char() else {
                break;
            };
            let structural = match ch {
                '{' => Some(Token::OpenBrace),
                '}' => Some(Token::CloseBrace),
                '[' => Some(Token::OpenBracket),
                ']' => Some(Token::CloseBracket),
                ',' => Some(Token::Comma),
                ':' => Some(Token::Colon),
                '"' => {
                    self.in_string = true;
                    Some(Token::Quote)
                }
                ' ' | '\t' | '\n' | '\r' | '\u{8}' => {
                    if word.is_empty() {
                        continue;
                    }
                    return Some(Ok(Token::Word(word)));
                }
                other => {
                    word.push(other);
                    continue;
                }
            };
            if let Some(token) = structural {
                if word.is_empty() {
                    return Some(Ok(token));
                }
                self.pending = Some(token);
                return Some(Ok(Token::Word(word)));
            }
        }

        if word.is_empty() {
            None
        } else {
            Some(Ok(Token::Word(word)))
        }
    }
}
