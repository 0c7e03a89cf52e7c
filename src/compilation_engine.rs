//! Recursive-descent parser over the Jack grammar.
//!
//! Drives the [`XmlEmitter`] and [`VmEmitter`] in a single pass with no
//! intermediate AST, per the reference `compilationengine.py`. Entry point
//! is [`CompilationEngine::compile_class`].

use crate::error::CompileError;
use crate::symbol_table::{Kind, SymbolTable};
use crate::token::{Token, TokenKind};
use crate::vm_emitter::VmEmitter;
use crate::xml_emitter::XmlEmitter;

const BINARY_OPS: &[&str] = &["+", "-", "*", "/", "&", "|", "<", ">", "="];
const UNARY_OPS: &[&str] = &["-", "~"];
const KEYWORD_CONSTANTS: &[&str] = &["true", "false", "null", "this"];

pub struct CompilationEngine<'a> {
    tokens: &'a [Token],
    pos: usize,
    symbols: SymbolTable,
    xml: XmlEmitter,
    vm: VmEmitter,
    current_class: String,
}

/// Compiles a fully tokenized class and returns the rendered parse tree and
/// VM code buffers.
pub fn compile(tokens: &[Token]) -> Result<(String, String), CompileError> {
    let mut engine = CompilationEngine {
        tokens,
        pos: 0,
        symbols: SymbolTable::new(),
        xml: XmlEmitter::new(),
        vm: VmEmitter::new(),
        current_class: String::new(),
    };
    engine.compile_class()?;
    Ok((engine.xml.into_buffer(), engine.vm.into_buffer()))
}

impl<'a> CompilationEngine<'a> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_at(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset)
    }

    fn current(&self) -> Result<&Token, CompileError> {
        self.peek().ok_or_else(|| {
            CompileError::UnexpectedToken(Token::new(TokenKind::Identifier, "<eof>"))
        })
    }

    /// Emits a terminal for the current token and advances past it.
    fn advance_terminal(&mut self) -> Result<Token, CompileError> {
        let tok = self.current()?.clone();
        self.xml.terminal(&tok);
        self.pos += 1;
        Ok(tok)
    }

    fn expect_symbol(&mut self, s: &str) -> Result<(), CompileError> {
        if self.current()?.is_symbol(s) {
            self.advance_terminal()?;
            Ok(())
        } else {
            Err(CompileError::UnexpectedToken(self.current()?.clone()))
        }
    }

    fn expect_keyword(&mut self, s: &str) -> Result<(), CompileError> {
        if self.current()?.is_keyword(s) {
            self.advance_terminal()?;
            Ok(())
        } else {
            Err(CompileError::UnexpectedToken(self.current()?.clone()))
        }
    }

    fn expect_identifier(&mut self) -> Result<String, CompileError> {
        if self.current()?.kind == TokenKind::Identifier {
            Ok(self.advance_terminal()?.value)
        } else {
            Err(CompileError::UnexpectedToken(self.current()?.clone()))
        }
    }

    fn at_symbol(&self, s: &str) -> bool {
        self.peek().is_some_and(|t| t.is_symbol(s))
    }

    fn at_keyword(&self, s: &str) -> bool {
        self.peek().is_some_and(|t| t.is_keyword(s))
    }

    fn at_any_keyword(&self, keywords: &[&str]) -> bool {
        self.peek()
            .is_some_and(|t| t.kind == TokenKind::Keyword && keywords.contains(&t.value.as_str()))
    }

    /// `int | char | boolean | className`
    fn compile_type(&mut self) -> Result<String, CompileError> {
        let tok = self.current()?.clone();
        match tok.kind {
            TokenKind::Keyword if ["int", "char", "boolean"].contains(&tok.value.as_str()) => {
                self.advance_terminal()?;
                Ok(tok.value)
            }
            TokenKind::Identifier => {
                self.advance_terminal()?;
                Ok(tok.value)
            }
            _ => Err(CompileError::UnexpectedToken(tok)),
        }
    }

    pub fn compile_class(&mut self) -> Result<(), CompileError> {
        self.xml.open("class");
        self.expect_keyword("class")?;
        let name = self.expect_identifier()?;
        self.current_class = name.clone();
        self.vm.class_name = name;
        self.expect_symbol("{")?;

        while self.at_any_keyword(&["static", "field"]) {
            self.compile_class_var_dec()?;
        }
        while self.at_any_keyword(&["constructor", "function", "method"]) {
            self.compile_subroutine_dec()?;
        }

        self.expect_symbol("}")?;
        self.xml.close("class");
        Ok(())
    }

    fn compile_class_var_dec(&mut self) -> Result<(), CompileError> {
        self.xml.open("classVarDec");
        let kind_tok = self.advance_terminal()?;
        let kind = Kind::from_str(&kind_tok.value)
            .ok_or_else(|| CompileError::BadKind(kind_tok.value.clone()))?;
        let ty = self.compile_type()?;

        let name = self.expect_identifier()?;
        self.symbols.define(&name, &ty, kind)?;
        while self.at_symbol(",") {
            self.expect_symbol(",")?;
            let name = self.expect_identifier()?;
            self.symbols.define(&name, &ty, kind)?;
        }
        self.expect_symbol(";")?;
        self.xml.close("classVarDec");
        Ok(())
    }

    fn compile_subroutine_dec(&mut self) -> Result<(), CompileError> {
        self.xml.open("subroutineDec");
        let sub_kind_tok = self.advance_terminal()?;
        let sub_kind = sub_kind_tok.value.clone();

        self.symbols.start_subroutine();
        self.vm.reset_subroutine();
        if sub_kind == "method" {
            self.symbols.reserve_implicit_this();
        }

        // Return type: void or a type.
        if self.at_keyword("void") {
            self.advance_terminal()?;
        } else {
            self.compile_type()?;
        }

        let sub_name = self.expect_identifier()?;
        self.expect_symbol("(")?;
        self.compile_parameter_list()?;
        self.expect_symbol(")")?;
        self.compile_subroutine_body(&sub_name, &sub_kind)?;

        self.xml.close("subroutineDec");
        Ok(())
    }

    fn compile_parameter_list(&mut self) -> Result<(), CompileError> {
        self.xml.open("parameterList");
        if !self.at_symbol(")") {
            let ty = self.compile_type()?;
            let name = self.expect_identifier()?;
            self.symbols.define(&name, &ty, Kind::Arg)?;
            while self.at_symbol(",") {
                self.expect_symbol(",")?;
                let ty = self.compile_type()?;
                let name = self.expect_identifier()?;
                self.symbols.define(&name, &ty, Kind::Arg)?;
            }
        }
        self.xml.close("parameterList");
        Ok(())
    }

    fn compile_subroutine_body(&mut self, sub_name: &str, sub_kind: &str) -> Result<(), CompileError> {
        self.xml.open("subroutineBody");
        self.expect_symbol("{")?;

        while self.at_keyword("var") {
            self.compile_var_dec()?;
        }

        let n_locals = self.symbols.var_count(Kind::Var);
        let qualified = format!("{}.{}", self.current_class, sub_name);
        self.vm.function(&qualified, n_locals);

        match sub_kind {
            "constructor" => {
                let n_fields = self.symbols.var_count(Kind::Field);
                self.vm.push("constant", n_fields);
                self.vm.call("Memory.alloc", 1);
                self.vm.pop("pointer", 0);
            }
            "method" => {
                self.vm.push("argument", 0);
                self.vm.pop("pointer", 0);
            }
            _ => {}
        }

        self.compile_statements()?;
        self.expect_symbol("}")?;
        self.xml.close("subroutineBody");
        Ok(())
    }

    fn compile_var_dec(&mut self) -> Result<(), CompileError> {
        self.xml.open("varDec");
        self.expect_keyword("var")?;
        let ty = self.compile_type()?;
        let name = self.expect_identifier()?;
        self.symbols.define(&name, &ty, Kind::Var)?;
        while self.at_symbol(",") {
            self.expect_symbol(",")?;
            let name = self.expect_identifier()?;
            self.symbols.define(&name, &ty, Kind::Var)?;
        }
        self.expect_symbol(";")?;
        self.xml.close("varDec");
        Ok(())
    }

    fn compile_statements(&mut self) -> Result<(), CompileError> {
        self.xml.open("statements");
        loop {
            if self.at_keyword("let") {
                self.compile_let()?;
            } else if self.at_keyword("if") {
                self.compile_if()?;
            } else if self.at_keyword("while") {
                self.compile_while()?;
            } else if self.at_keyword("do") {
                self.compile_do()?;
            } else if self.at_keyword("return") {
                self.compile_return()?;
            } else {
                break;
            }
        }
        self.xml.close("statements");
        Ok(())
    }

    fn compile_let(&mut self) -> Result<(), CompileError> {
        self.xml.open("letStatement");
        self.expect_keyword("let")?;
        let name = self.expect_identifier()?;

        let indexed = self.at_symbol("[");
        if indexed {
            self.expect_symbol("[")?;
            self.compile_expression()?;
            self.expect_symbol("]")?;
            self.push_variable(&name)?;
            self.vm.add();
        }

        self.expect_symbol("=")?;
        self.compile_expression()?;
        self.expect_symbol(";")?;

        if indexed {
            self.vm.pop("temp", 0);
            self.vm.pop("pointer", 1);
            self.vm.push("temp", 0);
            self.vm.pop("that", 0);
        } else {
            self.pop_variable(&name)?;
        }

        self.xml.close("letStatement");
        Ok(())
    }

    fn compile_while(&mut self) -> Result<(), CompileError> {
        self.xml.open("whileStatement");
        self.expect_keyword("while")?;
        let i = self.vm.next_while_label();
        let exp_label = format!("WHILE_EXP_{i}");
        let end_label = format!("WHILE_END_{i}");

        self.vm.label(&exp_label);
        self.expect_symbol("(")?;
        self.compile_expression()?;
        self.expect_symbol(")")?;
        self.vm.not();
        self.vm.if_goto(&end_label);

        self.expect_symbol("{")?;
        self.compile_statements()?;
        self.expect_symbol("}")?;

        self.vm.goto(&exp_label);
        self.vm.label(&end_label);
        self.xml.close("whileStatement");
        Ok(())
    }

    fn compile_if(&mut self) -> Result<(), CompileError> {
        self.xml.open("ifStatement");
        self.expect_keyword("if")?;
        let i = self.vm.next_if_label();
        let true_label = format!("IF_TRUE_{i}");
        let false_label = format!("IF_FALSE_{i}");
        let end_label = format!("IF_END_{i}");

        self.expect_symbol("(")?;
        self.compile_expression()?;
        self.expect_symbol(")")?;
        self.vm.if_goto(&true_label);
        self.vm.goto(&false_label);
        self.vm.label(&true_label);

        self.expect_symbol("{")?;
        self.compile_statements()?;
        self.expect_symbol("}")?;

        if self.at_keyword("else") {
            self.vm.goto(&end_label);
            self.vm.label(&false_label);
            self.expect_keyword("else")?;
            self.expect_symbol("{")?;
            self.compile_statements()?;
            self.expect_symbol("}")?;
            self.vm.label(&end_label);
        } else {
            self.vm.label(&false_label);
        }

        self.xml.close("ifStatement");
        Ok(())
    }

    fn compile_do(&mut self) -> Result<(), CompileError> {
        self.xml.open("doStatement");
        self.expect_keyword("do")?;
        self.compile_subroutine_call()?;
        self.expect_symbol(";")?;
        self.vm.pop("temp", 0);
        self.xml.close("doStatement");
        Ok(())
    }

    fn compile_return(&mut self) -> Result<(), CompileError> {
        self.xml.open("returnStatement");
        self.expect_keyword("return")?;
        if self.at_symbol(";") {
            self.vm.push("constant", 0);
        } else {
            self.compile_expression()?;
        }
        self.expect_symbol(";")?;
        self.vm.vm_return();
        self.xml.close("returnStatement");
        Ok(())
    }

    fn is_term_start(&self) -> bool {
        match self.peek() {
            Some(tok) => match tok.kind {
                TokenKind::IntegerConstant | TokenKind::StringConstant | TokenKind::Identifier => {
                    true
                }
                TokenKind::Keyword => KEYWORD_CONSTANTS.contains(&tok.value.as_str()),
                TokenKind::Symbol => tok.value == "(" || UNARY_OPS.contains(&tok.value.as_str()),
            },
            None => false,
        }
    }

    fn compile_expression(&mut self) -> Result<(), CompileError> {
        self.xml.open("expression");
        self.compile_term()?;
        while self
            .peek()
            .is_some_and(|t| t.kind == TokenKind::Symbol && BINARY_OPS.contains(&t.value.as_str()))
        {
            let op = self.advance_terminal()?.value;
            self.compile_term()?;
            self.vm.binary_op(&op);
        }
        self.xml.close("expression");
        Ok(())
    }

    fn compile_term(&mut self) -> Result<(), CompileError> {
        self.xml.open("term");
        let tok = self.current()?.clone();

        match tok.kind {
            TokenKind::IntegerConstant => {
                self.advance_terminal()?;
                let value: usize = tok.value.parse().map_err(|_| {
                    CompileError::UnexpectedToken(tok.clone())
                })?;
                self.vm.push("constant", value);
            }
            TokenKind::StringConstant => {
                self.advance_terminal()?;
                self.vm.string_literal(&tok.value);
            }
            TokenKind::Keyword if KEYWORD_CONSTANTS.contains(&tok.value.as_str()) => {
                self.advance_terminal()?;
                self.vm.keyword_constant(&tok.value);
            }
            TokenKind::Symbol if tok.value == "(" => {
                self.advance_terminal()?;
                self.compile_expression()?;
                self.expect_symbol(")")?;
            }
            TokenKind::Symbol if UNARY_OPS.contains(&tok.value.as_str()) => {
                self.advance_terminal()?;
                self.compile_term()?;
                self.vm.unary_op(&tok.value);
            }
            TokenKind::Identifier => {
                let next_is_index = self.peek_at(1).is_some_and(|t| t.is_symbol("["));
                let next_is_call = self
                    .peek_at(1)
                    .is_some_and(|t| t.is_symbol("(") || t.is_symbol("."));

                if next_is_index {
                    let name = self.expect_identifier()?;
                    self.expect_symbol("[")?;
                    self.compile_expression()?;
                    self.expect_symbol("]")?;
                    self.push_variable(&name)?;
                    self.vm.add();
                    self.vm.pop("pointer", 1);
                    self.vm.push("that", 0);
                } else if next_is_call {
                    self.compile_subroutine_call()?;
                } else {
                    let name = self.expect_identifier()?;
                    self.push_variable(&name)?;
                }
            }
            _ => return Err(CompileError::UnexpectedToken(tok)),
        }

        self.xml.close("term");
        Ok(())
    }

    fn compile_expression_list(&mut self) -> Result<usize, CompileError> {
        self.xml.open("expressionList");
        let mut count = 0;
        if self.is_term_start() {
            self.compile_expression()?;
            count += 1;
            while self.at_symbol(",") {
                self.expect_symbol(",")?;
                self.compile_expression()?;
                count += 1;
            }
        }
        self.xml.close("expressionList");
        Ok(count)
    }

    /// `name(exprList)` or `qualifier.name(exprList)`.
    fn compile_subroutine_call(&mut self) -> Result<(), CompileError> {
        let name = self.expect_identifier()?;

        if self.at_symbol("(") {
            self.expect_symbol("(")?;
            self.vm.push("pointer", 0);
            let call_name = format!("{}.{}", self.current_class, name);
            let count = self.compile_expression_list()?;
            self.expect_symbol(")")?;
            self.vm.call(&call_name, count + 1);
        } else {
            self.expect_symbol(".")?;
            let sub_name = self.expect_identifier()?;
            self.expect_symbol("(")?;

            let (call_name, add_arg) = match self.symbols.kind_of(&name) {
                Some(kind) => {
                    let segment = kind.segment();
                    let index = self.symbols.index_of(&name).unwrap();
                    let ty = self.symbols.type_of(&name).unwrap().to_string();
                    self.vm.push(segment, index);
                    (format!("{}.{}", ty, sub_name), 1)
                }
                None => (format!("{}.{}", name, sub_name), 0),
            };

            let count = self.compile_expression_list()?;
            self.expect_symbol(")")?;
            self.vm.call(&call_name, count + add_arg);
        }
        Ok(())
    }

    fn push_variable(&mut self, name: &str) -> Result<(), CompileError> {
        let kind = self
            .symbols
            .kind_of(name)
            .ok_or_else(|| CompileError::UndefinedSymbol(name.to_string()))?;
        let index = self.symbols.index_of(name).unwrap();
        self.vm.push(kind.segment(), index);
        Ok(())
    }

    fn pop_variable(&mut self, name: &str) -> Result<(), CompileError> {
        let kind = self
            .symbols
            .kind_of(name)
            .ok_or_else(|| CompileError::UndefinedSymbol(name.to_string()))?;
        let index = self.symbols.index_of(name).unwrap();
        self.vm.pop(kind.segment(), index);
        Ok(())
    }
}
