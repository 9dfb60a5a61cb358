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
//! Recursive-descent parser: newline-terminated statements, IF/WHILE blocks,
//! comparisons with a mandatory comparator
use thyme_common::{Result, ThymeError};
use thyme_lexer::{Lexer, Token, TokenKind};
use thyme_ast::{Expr, Stmt, PrintArg, Comparison, BinOp, UnaryOp, CmpOp, Program};

pub fn parse(src: &str) -> Result<Program> {
    let mut lx = Lexer::new(src);
    let tokens = lx.tokenize()?;
    Parser::new(tokens).parse_program()
}

struct Parser { tokens: Vec<Token>, i: usize }

impl Parser {
    fn new(tokens: Vec<Token>) -> Self { Self { tokens, i: 0 } }

    fn parse_program(&mut self) -> Result<Program> {
        let mut stmts = Vec::new();
        // Leading newlines are legal and meaningless
        while self.match_k(TokenKind::Newline) {}
        while !self.check(TokenKind::Eof) {
            let line = self.peek_line();
            let s = self.parse_stmt()?;
            stmts.push(Stmt::Line(line));
            stmts.push(s);
        }
        Ok(stmts)
    }

    fn parse_stmt(&mut self) -> Result<Stmt> {
        // PRINT "text" | PRINT expr
        if self.match_k(TokenKind::Print) {
            let arg = if self.check(TokenKind::String) {
                PrintArg::Text(self.next().unwrap().lexeme)
            } else {
                PrintArg::Expr(self.parse_expr()?)
            };
            self.terminate_stmt()?;
            return Ok(Stmt::Print(arg));
        }

        // IF comparison THEN nl {statement} ENDIF
        if self.match_k(TokenKind::If) {
            let cond = self.parse_comparison()?;
            self.expect(TokenKind::Then)?;
            self.terminate_stmt()?;
            let body = self.parse_block(TokenKind::Endif, "IF/ENDIF")?;
            self.terminate_stmt()?;
            return Ok(Stmt::If { cond, body });
        }

        // WHILE comparison REPEAT nl {statement} ENDWHILE
        if self.match_k(TokenKind::While) {
            let cond = self.parse_comparison()?;
            self.expect(TokenKind::Repeat)?;
            self.terminate_stmt()?;
            let body = self.parse_block(TokenKind::Endwhile, "WHILE/ENDWHILE")?;
            self.terminate_stmt()?;
            return Ok(Stmt::While { cond, body });
        }

        // LABEL name
        if self.match_k(TokenKind::Label) {
            let name = self.expect_ident()?;
            self.terminate_stmt()?;
            return Ok(Stmt::Label(name));
        }
        // GOTO name
        if self.match_k(TokenKind::Goto) {
            let name = self.expect_ident()?;
            self.terminate_stmt()?;
            return Ok(Stmt::Goto(name));
        }

        // LET name = expr
        if self.match_k(TokenKind::Let) {
            let name = self.expect_ident()?;
            self.expect(TokenKind::Assign)?;
            let init = self.parse_expr()?;
            self.terminate_stmt()?;
            return Ok(Stmt::Let { name, init });
        }

        // INPUT name
        if self.match_k(TokenKind::Input) {
            let name = self.expect_ident()?;
            self.terminate_stmt()?;
            return Ok(Stmt::Input { name });
        }

        Err(ThymeError::syntax(
            self.peek_line(),
            format!("invalid statement at '{}' ({})", self.peek_text(), self.peek_kind_name()),
        ))
    }

    // Body of an IF or WHILE: statements up to the closing keyword, which is
    // consumed. The body may be empty.
    fn parse_block(&mut self, close: TokenKind, what: &str) -> Result<Vec<Stmt>> {
        let mut body = Vec::new();
        while !self.check(close.clone()) {
            if self.check(TokenKind::Eof) {
                return Err(ThymeError::syntax(self.peek_line(), format!("unterminated {}", what)));
            }
            let line = self.peek_line();
            let s = self.parse_stmt()?;
            body.push(Stmt::Line(line));
            body.push(s);
        }
        self.expect(close)?;
        Ok(body)
    }

    // Every statement ends at a newline; runs of blank lines collapse
    fn terminate_stmt(&mut self) -> Result<()> {
        self.expect(TokenKind::Newline)?;
        while self.match_k(TokenKind::Newline) {}
        Ok(())
    }

    fn parse_comparison(&mut self) -> Result<Comparison> {
        let lhs = self.parse_expr()?;
        if self.peek_cmp_op().is_none() {
            return Err(ThymeError::syntax(
                self.peek_line(),
                format!("expected comparison operator at '{}'", self.peek_text()),
            ));
        }
        let mut rest = Vec::new();
        while let Some(op) = self.peek_cmp_op() {
            let _ = self.next();
            let rhs = self.parse_expr()?;
            rest.push((op, rhs));
        }
        Ok(Comparison { lhs, rest })
    }

    fn parse_expr(&mut self) -> Result<Expr> {
        let mut lhs = self.parse_term()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Plus) => BinOp::Add,
                Some(TokenKind::Minus) => BinOp::Sub,
                _ => break,
            };
            let _ = self.next();
            let rhs = self.parse_term()?;
            lhs = Expr::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) };
        }
        Ok(lhs)
    }

    fn parse_term(&mut self) -> Result<Expr> {
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Star) => BinOp::Mul,
                Some(TokenKind::Slash) => BinOp::Div,
                _ => break,
            };
            let _ = self.next();
            let rhs = self.parse_unary()?;
            lhs = Expr::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) };
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<Expr> {
        if self.match_k(TokenKind::Plus) {
            let e = self.parse_primary()?;
            return Ok(Expr::Unary { op: UnaryOp::Plus, operand: Box::new(e) });
        }
        if self.match_k(TokenKind::Minus) {
            let e = self.parse_primary()?;
            return Ok(Expr::Unary { op: UnaryOp::Minus, operand: Box::new(e) });
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        match self.peek_kind() {
            Some(TokenKind::Number) => Ok(Expr::Num(self.next().unwrap().lexeme)),
            Some(TokenKind::Ident) => Ok(Expr::Var(self.next().unwrap().lexeme)),
            _ => Err(ThymeError::syntax(
                self.peek_line(),
                format!("unexpected token at '{}'", self.peek_text()),
            )),
        }
    }

    fn peek_cmp_op(&self) -> Option<CmpOp> {
        match self.peek_kind()? {
            TokenKind::EqEq => Some(CmpOp::Eq),
            TokenKind::BangEq => Some(CmpOp::Ne),
            TokenKind::Lt => Some(CmpOp::Lt),
            TokenKind::LtEq => Some(CmpOp::Le),
            TokenKind::Gt => Some(CmpOp::Gt),
            TokenKind::GtEq => Some(CmpOp::Ge),
            _ => None,
        }
    }

    // small helpers
    fn expect(&mut self, k: TokenKind) -> Result<Token> {
        if self.check(k.clone()) { Ok(self.next().unwrap()) } else { Err(ThymeError::syntax(self.peek_line(), format!("expected {:?}, got {}", k, self.peek_kind_name()))) }
    }
    fn expect_ident(&mut self) -> Result<String> {
        if self.check(TokenKind::Ident) { Ok(self.next().unwrap().lexeme) } else { Err(ThymeError::syntax(self.peek_line(), format!("expected identifier, got {}", self.peek_kind_name()))) }
    }
    fn check(&self, k: TokenKind) -> bool { self.peek_kind() == Some(k) }
    fn match_k(&mut self, k: TokenKind) -> bool { if self.check(k) { self.next(); true } else { false } }
    fn peek_kind(&self) -> Option<TokenKind> { self.tokens.get(self.i).map(|t| t.kind.clone()) }
    fn peek_kind_name(&self) -> String { self.peek_kind().map(|k| format!("{:?}", k)).unwrap_or_else(|| "Eof".to_string()) }
    fn peek_line(&self) -> u32 { self.tokens.get(self.i).map(|t| t.line).unwrap_or(0) }
    fn peek_text(&self) -> String { self.tokens.get(self.i).map(|t| t.lexeme.clone()).unwrap_or_default() }
    fn next(&mut self) -> Option<Token> { let t = self.tokens.get(self.i).cloned(); if t.is_some() { self.i += 1; } t }
}
