//! Two-scope symbol table: class scope (`static`, `field`) and subroutine
//! scope (`arg`, `var`), grounded in the reference `symboltable.py`.

use crate::error::CompileError;

/// Storage kind of a declared identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Static,
    Field,
    Arg,
    Var,
}

impl Kind {
    pub fn from_str(s: &str) -> Option<Kind> {
        match s {
            "static" => Some(Kind::Static),
            "field" => Some(Kind::Field),
            "arg" => Some(Kind::Arg),
            "var" => Some(Kind::Var),
            _ => None,
        }
    }

    /// The VM memory segment this kind is stored in.
    pub fn segment(self) -> &'static str {
        match self {
            Kind::Static => "static",
            Kind::Field => "this",
            Kind::Arg => "argument",
            Kind::Var => "local",
        }
    }
}

#[derive(Debug, Clone)]
struct Identifier {
    name: String,
    ty: String,
    kind: Kind,
    index: usize,
}

/// The class-scope / subroutine-scope symbol table for a single class being
/// compiled. Lookup always checks subroutine scope before class scope.
#[derive(Debug, Default)]
pub struct SymbolTable {
    class_scope: Vec<Identifier>,
    class_static_count: usize,
    class_field_count: usize,
    subroutine_scope: Vec<Identifier>,
    subroutine_arg_count: usize,
    subroutine_var_count: usize,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable::default()
    }

    /// Clears subroutine-scope entries and resets its two counters. Called
    /// at the start of every subroutine declaration.
    pub fn start_subroutine(&mut self) {
        self.subroutine_scope.clear();
        self.subroutine_arg_count = 0;
        self.subroutine_var_count = 0;
    }

    pub fn define(&mut self, name: &str, ty: &str, kind: Kind) -> Result<(), CompileError> {
        match kind {
            Kind::Static => {
                let index = self.class_static_count;
                self.class_scope.push(Identifier {
                    name: name.to_string(),
                    ty: ty.to_string(),
                    kind,
                    index,
                });
                self.class_static_count += 1;
            }
            Kind::Field => {
                let index = self.class_field_count;
                self.class_scope.push(Identifier {
                    name: name.to_string(),
                    ty: ty.to_string(),
                    kind,
                    index,
                });
                self.class_field_count += 1;
            }
            Kind::Arg => {
                let index = self.subroutine_arg_count;
                self.subroutine_scope.push(Identifier {
                    name: name.to_string(),
                    ty: ty.to_string(),
                    kind,
                    index,
                });
                self.subroutine_arg_count += 1;
            }
            Kind::Var => {
                let index = self.subroutine_var_count;
                self.subroutine_scope.push(Identifier {
                    name: name.to_string(),
                    ty: ty.to_string(),
                    kind,
                    index,
                });
                self.subroutine_var_count += 1;
            }
        }
        Ok(())
    }

    /// Bumps the `arg` counter without recording an entry, reserving index 0
    /// for the implicit `this` receiver of a `method`.
    pub fn reserve_implicit_this(&mut self) {
        self.subroutine_arg_count += 1;
    }

    pub fn var_count(&self, kind: Kind) -> usize {
        match kind {
            Kind::Static => self.class_static_count,
            Kind::Field => self.class_field_count,
            Kind::Arg => self.subroutine_arg_count,
            Kind::Var => self.subroutine_var_count,
        }
    }

    fn lookup(&self, name: &str) -> Option<&Identifier> {
        self.subroutine_scope
            .iter()
            .find(|id| id.name == name)
            .or_else(|| self.class_scope.iter().find(|id| id.name == name))
    }

    pub fn kind_of(&self, name: &str) -> Option<Kind> {
        self.lookup(name).map(|id| id.kind)
    }

    pub fn type_of(&self, name: &str) -> Option<&str> {
        self.lookup(name).map(|id| id.ty.as_str())
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.lookup(name).map(|id| id.index)
    }
}
