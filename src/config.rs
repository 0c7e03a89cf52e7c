//! Driver-facing configuration, separate from the `clap` CLI surface so the
//! library can be driven without pulling in argument parsing.

use crate::error::CompileError;

/// How much the driver echoes about each file it processes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    #[default]
    Minimal,
    Full,
}

impl Verbosity {
    pub fn parse(s: &str) -> Result<Verbosity, CompileError> {
        match s {
            "minimal" => Ok(Verbosity::Minimal),
            "full" => Ok(Verbosity::Full),
            other => Err(CompileError::Config(format!(
                "verbosity should be 'full' or 'minimal', got '{other}'"
            ))),
        }
    }
}

/// Which output files the driver should write for each compiled class.
#[derive(Debug, Clone, Copy)]
pub struct CompileOptions {
    pub verbosity: Verbosity,
    pub emit_tokens: bool,
    pub emit_tree: bool,
    pub emit_vm: bool,
    pub max_depth: Option<usize>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            verbosity: Verbosity::Minimal,
            emit_tokens: false,
            emit_tree: false,
            emit_vm: true,
            max_depth: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_valid_verbosity_values() {
        assert_eq!(Verbosity::parse("minimal").unwrap(), Verbosity::Minimal);
        assert_eq!(Verbosity::parse("full").unwrap(), Verbosity::Full);
    }

    #[test]
    fn test_rejects_unknown_verbosity_value() {
        assert!(matches!(
            Verbosity::parse("loud"),
            Err(CompileError::Config(_))
        ));
    }

    #[test]
    fn test_default_options_emit_only_vm() {
        let opts = CompileOptions::default();
        assert!(opts.emit_vm);
        assert!(!opts.emit_tokens);
        assert!(!opts.emit_tree);
    }
}
