//! Shared types for the Thyme pipeline: spans, errors, Result alias.

use thiserror::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Span { pub start: u32, pub end: u32 }
impl Span { pub fn new(start: usize, end: usize) -> Self { Self { start: start as u32, end: end as u32 } } }

/// Pipeline error. One variant per stage; `line` is 1-based.
#[derive(Debug, Error)]
pub enum ThymeError {
    #[error("scan error at line {line}: {message}")]
    Scan { line: u32, message: String },
    #[error("parse error at line {line}: {message}")]
    Syntax { line: u32, message: String },
    #[error("semantic error at line {line}: {message}")]
    Semantic { line: u32, message: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ThymeError {
    pub fn scan(line: u32, message: impl Into<String>) -> Self {
        Self::Scan { line, message: message.into() }
    }
    pub fn syntax(line: u32, message: impl Into<String>) -> Self {
        Self::Syntax { line, message: message.into() }
    }
    pub fn semantic(line: u32, message: impl Into<String>) -> Self {
        Self::Semantic { line, message: message.into() }
    }
}

pub type Result<T> = std::result::Result<T, ThymeError>;
