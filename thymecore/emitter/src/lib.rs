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
//! AST → C emitter. A semantic walk checks symbol/label invariants, then an
//! emission walk lowers the tree into a header/code text pair.
use std::collections::HashSet;

use thyme_common::{Result, ThymeError};
use thyme_ast::{Program, Stmt, Expr, PrintArg, Comparison, BinOp, UnaryOp, CmpOp};

/// Compile a validated program to C source text. Fails without producing any
/// output when a semantic invariant is violated.
pub fn compile(ast: &Program) -> Result<String> {
    check(ast)?;
    let mut e = E::new();
    e.emit_program(ast);
    Ok(e.out.finish())
}

// ---------------------------------------------------------------------------
// Semantic walk

struct Sem {
    symbols: HashSet<String>,
    labels_declared: HashSet<String>,
    // (name, line) per GOTO, in source order, so the deferred check reports
    // the first dangling reference deterministically
    labels_gotoed: Vec<(String, u32)>,
    line: u32,
}

fn check(ast: &Program) -> Result<()> {
    let mut s = Sem {
        symbols: HashSet::new(),
        labels_declared: HashSet::new(),
        labels_gotoed: Vec::new(),
        line: 0,
    };
    s.check_block(ast)?;

    // GOTO targets may be declared anywhere in the program, so this is the
    // one check that waits until the whole tree has been walked.
    for (label, line) in &s.labels_gotoed {
        if !s.labels_declared.contains(label) {
            return Err(ThymeError::semantic(
                *line,
                format!("attempting to GOTO undeclared label: {}", label),
            ));
        }
    }
    Ok(())
}

impl Sem {
    fn check_block(&mut self, stmts: &[Stmt]) -> Result<()> {
        for s in stmts {
            self.check_stmt(s)?;
        }
        Ok(())
    }

    fn check_stmt(&mut self, s: &Stmt) -> Result<()> {
        match s {
            Stmt::Line(line) => self.line = *line,
            Stmt::Print(PrintArg::Text(_)) => {}
            Stmt::Print(PrintArg::Expr(e)) => self.check_expr(e)?,
            Stmt::If { cond, body } | Stmt::While { cond, body } => {
                self.check_comparison(cond)?;
                self.check_block(body)?;
            }
            Stmt::Label(name) => {
                if !self.labels_declared.insert(name.clone()) {
                    return Err(ThymeError::semantic(self.line, format!("label already exists: {}", name)));
                }
            }
            Stmt::Goto(name) => self.labels_gotoed.push((name.clone(), self.line)),
            Stmt::Let { name, init } => {
                // the name is assigned before its initializer is read, so a
                // self-referencing initializer is legal
                self.symbols.insert(name.clone());
                self.check_expr(init)?;
            }
            Stmt::Input { name } => {
                self.symbols.insert(name.clone());
            }
        }
        Ok(())
    }

    fn check_comparison(&mut self, cond: &Comparison) -> Result<()> {
        self.check_expr(&cond.lhs)?;
        for (_, rhs) in &cond.rest {
            self.check_expr(rhs)?;
        }
        Ok(())
    }

    fn check_expr(&mut self, e: &Expr) -> Result<()> {
        match e {
            Expr::Num(_) => {}
            Expr::Var(name) => {
                if !self.symbols.contains(name) {
                    return Err(ThymeError::semantic(
                        self.line,
                        format!("referencing variable before assignment: {}", name),
                    ));
                }
            }
            Expr::Unary { operand, .. } => self.check_expr(operand)?,
            Expr::Binary { lhs, rhs, .. } => {
                self.check_expr(lhs)?;
                self.check_expr(rhs)?;
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Emission walk

/// Two append-only streams: `header` collects declarations that must precede
/// first use, `code` collects executable statements in source order.
/// `finish` serializes header-then-code.
#[derive(Debug, Default)]
pub struct CSource {
    header: String,
    code: String,
}

impl CSource {
    pub fn emit(&mut self, text: &str) {
        self.code.push_str(text);
    }
    pub fn emit_line(&mut self, text: &str) {
        self.code.push_str(text);
        self.code.push('\n');
    }
    pub fn header_line(&mut self, text: &str) {
        self.header.push_str(text);
        self.header.push('\n');
    }
    pub fn finish(self) -> String {
        let mut out = self.header;
        out.push_str(&self.code);
        out
    }
}

struct E {
    out: CSource,
    declared: HashSet<String>,
}

impl E {
    fn new() -> Self {
        Self { out: CSource::default(), declared: HashSet::new() }
    }

    fn emit_program(&mut self, ast: &Program) {
        self.out.header_line("#include <stdio.h>");
        self.out.header_line("int main(void){");
        self.emit_block(ast);
        self.out.emit_line("return 0;");
        self.out.emit_line("}");
    }

    fn emit_block(&mut self, stmts: &[Stmt]) {
        for s in stmts {
            self.emit_stmt(s);
        }
    }

    fn emit_stmt(&mut self, s: &Stmt) {
        match s {
            Stmt::Line(_) => {}
            Stmt::Print(PrintArg::Text(text)) => {
                self.out.emit_line(&format!("printf(\"{}\\n\");", text));
            }
            Stmt::Print(PrintArg::Expr(e)) => {
                self.out.emit("printf(\"%.2f\\n\", (float)(");
                self.emit_expr(e);
                self.out.emit_line("));");
            }
            Stmt::If { cond, body } => {
                self.out.emit("if(");
                self.emit_comparison(cond);
                self.out.emit_line("){");
                self.emit_block(body);
                self.out.emit_line("}");
            }
            Stmt::While { cond, body } => {
                self.out.emit("while(");
                self.emit_comparison(cond);
                self.out.emit_line("){");
                self.emit_block(body);
                self.out.emit_line("}");
            }
            Stmt::Label(name) => {
                self.out.emit_line(&format!("{}:", name));
            }
            Stmt::Goto(name) => {
                self.out.emit_line(&format!("goto {};", name));
            }
            Stmt::Let { name, init } => {
                self.declare(name);
                self.out.emit(&format!("{} = ", name));
                self.emit_expr(init);
                self.out.emit_line(";");
            }
            Stmt::Input { name } => {
                self.declare(name);
                // a failed read forces zero and flushes the bad line so the
                // next read starts clean
                self.out.emit_line(&format!("if(0 == scanf(\"%f\", &{})) {{", name));
                self.out.emit_line(&format!("{} = 0;", name));
                self.out.emit_line("scanf(\"%*s\");");
                self.out.emit_line("}");
            }
        }
    }

    // One header declaration per variable, at its first assignment
    fn declare(&mut self, name: &str) {
        if self.declared.insert(name.to_string()) {
            self.out.header_line(&format!("float {};", name));
        }
    }

    fn emit_comparison(&mut self, cond: &Comparison) {
        self.emit_expr(&cond.lhs);
        for (op, rhs) in &cond.rest {
            self.out.emit(cmp_text(*op));
            self.emit_expr(rhs);
        }
    }

    // Tokens are re-emitted in source order with no inserted whitespace; the
    // left-associative tree flattens back to the original sequence.
    fn emit_expr(&mut self, e: &Expr) {
        match e {
            Expr::Num(text) => self.out.emit(text),
            Expr::Var(name) => self.out.emit(name),
            Expr::Unary { op, operand } => {
                self.out.emit(unary_text(*op));
                self.emit_expr(operand);
            }
            Expr::Binary { op, lhs, rhs } => {
                self.emit_expr(lhs);
                self.out.emit(bin_text(*op));
                self.emit_expr(rhs);
            }
        }
    }
}

fn bin_text(op: BinOp) -> &'static str {
    match op {
        BinOp::Add => "+",
        BinOp::Sub => "-",
        BinOp::Mul => "*",
        BinOp::Div => "/",
    }
}

fn unary_text(op: UnaryOp) -> &'static str {
    match op {
        UnaryOp::Plus => "+",
        UnaryOp::Minus => "-",
    }
}

fn cmp_text(op: CmpOp) -> &'static str {
    match op {
        CmpOp::Eq => "==",
        CmpOp::Ne => "!=",
        CmpOp::Lt => "<",
        CmpOp::Le => "<=",
        CmpOp::Gt => ">",
        CmpOp::Ge => ">=",
    }
}
