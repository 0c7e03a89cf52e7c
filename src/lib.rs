//! Jack Compiler Library
//!
//! Compiles `.jack` source files to structured-markup tokens/parse-tree
//! output and stack-machine VM code, in a single recursive-descent pass
//! with no intermediate AST.
//!
//! # Extending the driver
//!
//! External callers can run the pipeline directly:
//!
//! ```rust,ignore
//! use jackc::config::CompileOptions;
//! use jackc::driver::compile_file;
//! use std::path::Path;
//!
//! let options = CompileOptions::default();
//! compile_file(Path::new("Main.jack"), &options)?;
//! ```

pub mod compilation_engine;
pub mod config;
pub mod driver;
pub mod error;
pub mod preprocessor;
pub mod symbol_table;
pub mod token;
pub mod tokenizer;
pub mod vm_emitter;
pub mod walker;
pub mod xml_emitter;

pub use config::{CompileOptions, Verbosity};
pub use driver::{OutputPaths, compile_file};
pub use error::CompileError;
pub use symbol_table::{Kind, SymbolTable};
pub use token::{Token, TokenKind};
pub use vm_emitter::VmEmitter;
pub use walker::collect_jack_files;
pub use xml_emitter::XmlEmitter;
