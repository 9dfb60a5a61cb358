/*

 ▄▄▄▄    ██▓    ▄▄▄       ▄████▄   ██ ▄█▀ ██▀███   █    ██   ██████  ██░ ██
▓█████▄ ▓██▒   ▒████▄    ▒██▀ ▀█   ██▄█▒ ▓██ ▒ ██▒ ██  ▓██▒▒██    ▒ ▓██░ ██▒
▒██▒ ▄██▒██░   ▒██  ▀█▄  ▒▓█    ▄ ▓███▄░ ▓██ ░▄█ ▒▓██  ▒██░░ ▓██▄   ▒██▀▀██░
▒██░█▀  ▒██░   ░██▄▄▄▄██ ▒▓▓▄ ▄██▒▓██ █▄ ▒██▀▀█▄  ▓▓█  ░██░  ▒   ██▒░▓█ ░██
░▓█  ▀█▓░██████▒▓█   ▓██▒▒ ▓███▀ ░▒██▒ █▄░██▓ ▒██▒▒▒█████▓ ▒██████▒▒░▓█▒░██▓
░▒▓███▀▒░ ▒░▓  ░▒▒   ▓▒█░░ ░▒ ▒  ░▒ ▒▒ ▓▒░ ▒▓ ░▒▓░░▒▓▒ ▒ ▒ ▒ ▒▓▒ ▒ ░ ▒ ░░▒░▒
▒░▒   ░ ░ ░ ▒  ░ ▒   ▒▒ ░  ░  ▒   ░ ░▒ ▒░  ░▒ ░ ▒░░░▒░ ░ ░ ░ ░▒  ░ ░ ▒ ░▒░ ░
 ░    ░   ░ ░    ░   ▒   ░        ░ ░░ ░   ░░   ░  ░░░ ░ ░ ░  ░  ░   ░  ░░ ░
 ░          ░  ░     ░  ░░ ░      ░  ░      ░        ░           ░   ░  ░  ░
      ░                  ░
Copyright (C) 2026, Blackrush LLC
Created by Erik Olson, Tarpon Springs, Florida
For more information, visit BlackrushDrive.com

MIT License

Copyright (c) 2026 Erik Lee Olson for Blackrush, LLC

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.

*/
//! Lexer for Thyme v0 (newline-significant tokens + clean string/number spans)
use thyme_common::{Result, ThymeError, Span};

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Single-char
    Plus, Minus, Star, Slash,
    Assign,                // '='
    Lt, Gt,
    // Two-char
    EqEq, BangEq, LtEq, GtEq,
    // Literals / identifiers
    Ident, Number, String,
    // Keywords
    Label, Goto, Print, Input, Let,
    If, Then, Endif,
    While, Repeat, Endwhile,
    // A line terminator is grammar, not whitespace
    Newline,
    Eof,
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
    pub line: u32,
}

pub struct Lexer {
    src:   String,
    cur:   Option<char>,
    pos:   usize, // byte offset *after* `cur`
    start: usize, // byte offset start of current token
    line:  usize, // 1-based current line number
    tok_line: usize, // line number at start of current token
}

impl Lexer {
    /// The source is stored with a guaranteed trailing newline so every
    /// final statement sees its terminator.
    pub fn new(source: &str) -> Self {
        let mut src = String::from(source);
        if !src.ends_with('\n') {
            src.push('\n');
        }
        let mut l = Self {
            src,
            cur: None,
            pos: 0,
            start: 0,
            line: 1,
            tok_line: 1,
        };
        l.advance(); // prime `cur` and `pos`
        l
    }

    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        let mut out = Vec::new();
        loop {
            let t = self.next_token()?;
            let eof = t.kind == TokenKind::Eof;
            out.push(t);
            if eof { break; }
        }
        Ok(out)
    }

    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_ws_and_comments();

        // Record the line number at the start of the token (or EOF)
        self.tok_line = self.line;

        // If no current char, emit EOF
        let ch = match self.cur {
            Some(c) => c,
            None => return Ok(self.make_with_span(TokenKind::Eof, self.pos, self.pos)),
        };

        // `start` is the *beginning* of the current character
        let clen = ch.len_utf8();
        self.start = self.pos - clen;

        let tok = match ch {
            // --- single-char tokens: make FIRST, advance AFTER ---
            '+'  => { let tok = self.make(TokenKind::Plus);    self.advance(); tok }
            '-'  => { let tok = self.make(TokenKind::Minus);   self.advance(); tok }
            '*'  => { let tok = self.make(TokenKind::Star);    self.advance(); tok }
            '/'  => { let tok = self.make(TokenKind::Slash);   self.advance(); tok }
            '\n' => { let tok = self.make(TokenKind::Newline); self.advance(); tok }

            // --- two-char possibilities: peek decides the compound form ---
            '=' => self.one_or_two('=', TokenKind::EqEq, TokenKind::Assign),
            '>' => self.one_or_two('=', TokenKind::GtEq, TokenKind::Gt),
            '<' => self.one_or_two('=', TokenKind::LtEq, TokenKind::Lt),
            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    let tok = self.make(TokenKind::BangEq);
                    self.advance();
                    tok
                } else {
                    return Err(ThymeError::scan(self.tok_line as u32, "expected '!=', got '!'"));
                }
            }

            '"' => self.string()?,
            c if c.is_ascii_digit() => self.number()?,
            c if c.is_ascii_alphabetic() => self.ident_or_kw()?,
            _ => return Err(ThymeError::scan(self.tok_line as u32, format!("unknown token '{}'", ch))),
        };

        Ok(tok)
    }

    // Consume one operator char, or two when `second` follows
    fn one_or_two(&mut self, second: char, two: TokenKind, one: TokenKind) -> Token {
        let kind = if self.peek() == Some(second) { self.advance(); two } else { one };
        let tok = self.make(kind);
        self.advance();
        tok
    }

    // Build a token using current self.start..self.pos
    fn make(&self, kind: TokenKind) -> Token {
        self.make_with_span(kind, self.start, self.pos)
    }
    fn make_with_span(&self, kind: TokenKind, start: usize, end: usize) -> Token {
        Token {
            kind,
            lexeme: self.src[start..end].to_string(),
            span: Span::new(start, end),
            line: self.tok_line as u32,
        }
    }

    /// String literal: characters between quotes, taken verbatim. A handful
    /// of characters are reserved so the text can be spliced into generated
    /// code without escaping.
    fn string(&mut self) -> Result<Token> {
        // Byte index just AFTER the opening quote
        let content_start = self.pos;
        // Step into the first content character (if any)
        self.advance();
        let content_end = loop {
            let ch = match self.cur {
                Some(c) => c,
                None => return Err(ThymeError::scan(self.tok_line as u32, "unterminated string")),
            };
            if ch == '"' {
                // end EXCLUDES the closing quote
                let end = self.pos - '"'.len_utf8();
                self.advance(); // step past closing quote
                break end;
            }
            if matches!(ch, '\r' | '\n' | '\t' | '\\' | '%') {
                return Err(ThymeError::scan(
                    self.tok_line as u32,
                    format!("illegal character in string: {:?}", ch),
                ));
            }
            self.advance();
        };
        Ok(self.make_with_span(TokenKind::String, content_start, content_end))
    }

    fn number(&mut self) -> Result<Token> {
        let start = self.start;
        // end = byte index just AFTER the last accepted digit
        let mut end = self.pos; // currently after the first digit

        // integer part
        while matches!(self.cur, Some(c) if c.is_ascii_digit()) {
            end = self.pos;
            self.advance();
        }

        // fractional part: a point must be followed by at least one digit
        if self.cur == Some('.') {
            self.advance(); // step past '.'
            if !matches!(self.cur, Some(c) if c.is_ascii_digit()) {
                return Err(ThymeError::scan(self.tok_line as u32, "illegal character in number"));
            }
            while matches!(self.cur, Some(c) if c.is_ascii_digit()) {
                end = self.pos;
                self.advance();
            }
        }

        Ok(self.make_with_span(TokenKind::Number, start, end))
    }

    fn ident_or_kw(&mut self) -> Result<Token> {
        let start = self.start;
        let mut end = self.pos; // after first ident char
        while matches!(self.cur, Some(c) if c.is_ascii_alphanumeric()) {
            end = self.pos;
            self.advance();
        }
        let lex = &self.src[start..end];
        // Keyword lookup is case-sensitive, exact match
        let kind = match lex {
            "LABEL"    => TokenKind::Label,
            "GOTO"     => TokenKind::Goto,
            "PRINT"    => TokenKind::Print,
            "INPUT"    => TokenKind::Input,
            "LET"      => TokenKind::Let,
            "IF"       => TokenKind::If,
            "THEN"     => TokenKind::Then,
            "ENDIF"    => TokenKind::Endif,
            "WHILE"    => TokenKind::While,
            "REPEAT"   => TokenKind::Repeat,
            "ENDWHILE" => TokenKind::Endwhile,
            _          => TokenKind::Ident,
        };
        Ok(self.make_with_span(kind, start, end))
    }

    fn skip_ws_and_comments(&mut self) {
        loop {
            match self.cur {
                // newline is a token, not whitespace
                Some(' ') | Some('\t') | Some('\r') => self.advance(),

                // '#' comment runs to end of line; the newline stays
                Some('#') => {
                    while let Some(ch) = self.cur {
                        if ch == '\n' { break; }
                        self.advance();
                    }
                }

                _ => break,
            }
        }
    }

    fn advance(&mut self) {
        match self.src[self.pos..].chars().next() {
            Some(c) => {
                if c == '\n' { self.line += 1; }
                self.pos += c.len_utf8();
                self.cur = Some(c);
            }
            None => {
                self.cur = None;
                self.pos = self.src.len();
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        Lexer::new(src).tokenize().unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn operators_and_compounds() {
        use TokenKind::*;
        assert_eq!(
            kinds("+- */ = == != < <= > >="),
            vec![Plus, Minus, Star, Slash, Assign, EqEq, BangEq, Lt, LtEq, Gt, GtEq, Newline, Eof]
        );
    }

    #[test]
    fn keywords_are_case_sensitive() {
        use TokenKind::*;
        assert_eq!(kinds("PRINT print WHILE While"), vec![Print, Ident, While, Ident, Newline, Eof]);
    }

    #[test]
    fn trailing_newline_is_appended() {
        use TokenKind::*;
        assert_eq!(kinds("PRINT"), vec![Print, Newline, Eof]);
        // ...but not doubled when already present
        assert_eq!(kinds("PRINT\n"), vec![Print, Newline, Eof]);
    }

    #[test]
    fn string_literal_keeps_content_only() {
        let toks = Lexer::new("PRINT \"hello, world\"").tokenize().unwrap();
        assert_eq!(toks[1].kind, TokenKind::String);
        assert_eq!(toks[1].lexeme, "hello, world");
    }

    #[test]
    fn string_rejects_reserved_characters() {
        for src in ["\"a\tb\"", "\"a\\b\"", "\"100%\"", "\"a\rb\""] {
            let err = Lexer::new(src).tokenize().unwrap_err();
            assert!(err.to_string().contains("illegal character in string"), "{}", err);
        }
    }

    #[test]
    fn string_must_terminate_on_its_line() {
        // The raw newline inside the literal is reserved, so an unclosed
        // string fails there rather than swallowing the rest of the file.
        let err = Lexer::new("PRINT \"oops\nPRINT 1").tokenize().unwrap_err();
        assert!(err.to_string().contains("illegal character in string"), "{}", err);
    }

    #[test]
    fn numbers_with_and_without_fraction() {
        let toks = Lexer::new("1 905 1.5 0.25").tokenize().unwrap();
        let lex: Vec<&str> = toks.iter().take(4).map(|t| t.lexeme.as_str()).collect();
        assert_eq!(lex, vec!["1", "905", "1.5", "0.25"]);
        assert!(toks.iter().take(4).all(|t| t.kind == TokenKind::Number));
    }

    #[test]
    fn trailing_point_is_an_error() {
        let err = Lexer::new("LET a = 1.\n").tokenize().unwrap_err();
        assert!(err.to_string().contains("illegal character in number"), "{}", err);
    }

    #[test]
    fn lone_bang_is_an_error() {
        let err = Lexer::new("IF 1 ! 2\n").tokenize().unwrap_err();
        assert!(err.to_string().contains("expected '!='"), "{}", err);
    }

    #[test]
    fn unknown_character_is_an_error() {
        let err = Lexer::new("LET a = (1)\n").tokenize().unwrap_err();
        assert!(err.to_string().contains("unknown token"), "{}", err);
    }

    #[test]
    fn comments_run_to_end_of_line() {
        use TokenKind::*;
        assert_eq!(kinds("# a comment\nPRINT 1 # tail\n"), vec![Newline, Print, Number, Newline, Eof]);
    }

    #[test]
    fn lines_are_tracked() {
        let toks = Lexer::new("PRINT 1\nPRINT 2\n").tokenize().unwrap();
        let second_print = toks.iter().filter(|t| t.kind == TokenKind::Print).nth(1).unwrap();
        assert_eq!(second_print.line, 2);
    }

    proptest! {
        #[test]
        fn doesnt_crash(s in "\\PC*") {
            let result = Lexer::new(&s).tokenize();
            let _ = format!("{:?}", result);
        }

        #[test]
        fn spans_partition_the_source(s in "[A-Za-z0-9 \t\r\n#+*/<>=!.\"-]*") {
            if let Ok(tokens) = Lexer::new(&s).tokenize() {
                // every classified character is consumed exactly once:
                // spans never overlap and never run backwards
                for pair in tokens.windows(2) {
                    prop_assert!(pair[0].span.start <= pair[0].span.end);
                    prop_assert!(pair[0].span.end <= pair[1].span.start);
                }
                let last = tokens.last().unwrap();
                prop_assert_eq!(last.kind.clone(), TokenKind::Eof);
                // at most one byte past the input: the appended newline
                prop_assert!(last.span.end as usize <= s.len() + 1);
            }
        }
    }
}
