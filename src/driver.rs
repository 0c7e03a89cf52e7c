//! Per-file orchestration: read source, preprocess, tokenize, compile, and
//! write the requested outputs. Grounded in the reference `compiler.py`'s
//! `JackCompiler.run` and `crates/compiler/src/main.rs`'s `run_build`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::compilation_engine;
use crate::config::{CompileOptions, Verbosity};
use crate::error::CompileError;
use crate::preprocessor::strip_comments;
use crate::tokenizer::tokenize;
use crate::xml_emitter::render_tokens_file;

/// Output paths a single `.jack` input maps to, derived by extension
/// replacement (`foo.jack -> fooT.xml / foo.xml / foo.vm`).
#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub tokens: PathBuf,
    pub tree: PathBuf,
    pub vm: PathBuf,
}

impl OutputPaths {
    pub fn for_input(input: &Path) -> Self {
        let stem = input.with_extension("");
        let mut tokens = stem.clone();
        tokens.set_file_name(format!(
            "{}T",
            stem.file_name().and_then(|n| n.to_str()).unwrap_or_default()
        ));
        OutputPaths {
            tokens: tokens.with_extension("xml"),
            tree: stem.with_extension("xml"),
            vm: stem.with_extension("vm"),
        }
    }
}

/// Compiles a single `.jack` file and writes whichever outputs `options`
/// requests. Returns the output paths actually written.
pub fn compile_file(input: &Path, options: &CompileOptions) -> Result<Vec<PathBuf>, CompileError> {
    if options.verbosity == Verbosity::Full {
        println!("Compiling {}", input.display());
    }

    let source = fs::read_to_string(input).map_err(|e| CompileError::io(input, e))?;
    if options.verbosity == Verbosity::Full {
        println!("{}", source);
    }

    let preprocessed = strip_comments(&source);
    let tokens = tokenize(&preprocessed);
    let (tree, vm) = compilation_engine::compile(&tokens)?;

    let outputs = OutputPaths::for_input(input);
    let mut written = Vec::new();

    if options.emit_tokens {
        fs::write(&outputs.tokens, render_tokens_file(&tokens))
            .map_err(|e| CompileError::io(&outputs.tokens, e))?;
        written.push(outputs.tokens.clone());
    }
    if options.emit_tree {
        fs::write(&outputs.tree, &tree).map_err(|e| CompileError::io(&outputs.tree, e))?;
        written.push(outputs.tree.clone());
    }
    if options.emit_vm {
        fs::write(&outputs.vm, &vm).map_err(|e| CompileError::io(&outputs.vm, e))?;
        written.push(outputs.vm.clone());
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::write;

    #[test]
    fn test_output_paths_replace_extension() {
        let paths = OutputPaths::for_input(Path::new("/tmp/foo.jack"));
        assert_eq!(paths.tokens, PathBuf::from("/tmp/fooT.xml"));
        assert_eq!(paths.tree, PathBuf::from("/tmp/foo.xml"));
        assert_eq!(paths.vm, PathBuf::from("/tmp/foo.vm"));
    }

    #[test]
    fn test_compile_file_writes_only_requested_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("Main.jack");
        write(&input, "class Main { function void main() { return; } }").unwrap();

        let options = CompileOptions {
            emit_vm: true,
            emit_tree: false,
            emit_tokens: false,
            ..Default::default()
        };
        let written = compile_file(&input, &options).unwrap();
        assert_eq!(written, vec![dir.path().join("Main.vm")]);

        let vm = fs::read_to_string(dir.path().join("Main.vm")).unwrap();
        assert_eq!(vm, "function Main.main 0\npush constant 0\nreturn\n");
        assert!(!dir.path().join("Main.xml").exists());
        assert!(!dir.path().join("MainT.xml").exists());
    }

    #[test]
    fn test_failing_file_leaves_no_partial_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("Bad.jack");
        write(&input, "class Bad { function void f( { return; } }").unwrap();

        let options = CompileOptions {
            emit_vm: true,
            emit_tree: true,
            emit_tokens: true,
            ..Default::default()
        };
        let err = compile_file(&input, &options).unwrap_err();
        assert!(matches!(err, CompileError::UnexpectedToken(_)));
        assert!(!dir.path().join("Bad.vm").exists());
        assert!(!dir.path().join("Bad.xml").exists());
        assert!(!dir.path().join("BadT.xml").exists());
    }
}
