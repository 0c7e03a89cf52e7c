//! Compiler error types.

use std::fmt;
use std::path::PathBuf;

use crate::token::Token;

/// Error type for everything that can go wrong compiling a Jack source tree.
///
/// Kept as a hand-rolled enum (no `thiserror`) so `?` works uniformly across
/// the filesystem walker, the driver, and the compilation engine.
#[derive(Debug)]
pub enum CompileError {
    /// Missing or unreadable input, or an unwritable output.
    Io { path: PathBuf, source: std::io::Error },
    /// An invalid CLI option value.
    Config(String),
    /// The parser hit a token that isn't admissible at the current grammar position.
    UnexpectedToken(Token),
    /// The symbol table was asked to define an identifier with an unknown kind.
    BadKind(String),
    /// A variable name could not be resolved to a kind/type/index in any scope.
    UndefinedSymbol(String),
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::Io { path, source } => {
                write!(f, "I/O error on {}: {}", path.display(), source)
            }
            CompileError::Config(msg) => write!(f, "configuration error: {}", msg),
            CompileError::UnexpectedToken(tok) => {
                write!(f, "unexpected token: {:?} {:?}", tok.kind, tok.value)
            }
            CompileError::BadKind(kind) => write!(f, "unexpected identifier kind: {}", kind),
            CompileError::UndefinedSymbol(name) => {
                write!(f, "undefined symbol: {}", name)
            }
        }
    }
}

impl std::error::Error for CompileError {}

impl CompileError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CompileError::Io {
            path: path.into(),
            source,
        }
    }
}
