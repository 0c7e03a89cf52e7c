//! Builds the flat VM instruction stream and owns the per-subroutine label
//! counters, grounded in the reference `translation.py` VM writer.

/// Appends VM instruction lines to a growing buffer. `class_name` and the
/// two label counters are reset by the compilation engine at subroutine
/// boundaries via [`VmEmitter::reset_subroutine`].
#[derive(Debug, Default)]
pub struct VmEmitter {
    buffer: String,
    pub class_name: String,
    while_counter: usize,
    if_counter: usize,
}

impl VmEmitter {
    pub fn new() -> Self {
        VmEmitter::default()
    }

    pub fn reset_subroutine(&mut self) {
        self.while_counter = 0;
        self.if_counter = 0;
    }

    fn line(&mut self, text: &str) {
        self.buffer.push_str(text);
        self.buffer.push('\n');
    }

    pub fn push(&mut self, segment: &str, index: usize) {
        self.line(&format!("push {} {}", segment, index));
    }

    pub fn pop(&mut self, segment: &str, index: usize) {
        self.line(&format!("pop {} {}", segment, index));
    }

    pub fn add(&mut self) {
        self.line("add");
    }

    pub fn sub(&mut self) {
        self.line("sub");
    }

    pub fn neg(&mut self) {
        self.line("neg");
    }

    pub fn and(&mut self) {
        self.line("and");
    }

    pub fn or(&mut self) {
        self.line("or");
    }

    pub fn not(&mut self) {
        self.line("not");
    }

    pub fn eq(&mut self) {
        self.line("eq");
    }

    pub fn lt(&mut self) {
        self.line("lt");
    }

    pub fn gt(&mut self) {
        self.line("gt");
    }

    pub fn call(&mut self, name: &str, n_args: usize) {
        self.line(&format!("call {} {}", name, n_args));
    }

    pub fn function(&mut self, name: &str, n_locals: usize) {
        self.line(&format!("function {} {}", name, n_locals));
    }

    pub fn vm_return(&mut self) {
        self.line("return");
    }

    pub fn label(&mut self, name: &str) {
        self.line(&format!("label {}", name));
    }

    pub fn goto(&mut self, name: &str) {
        self.line(&format!("goto {}", name));
    }

    pub fn if_goto(&mut self, name: &str) {
        self.line(&format!("if-goto {}", name));
    }

    /// Emits the VM sequence for a binary operator. Panics on an operator
    /// outside the fixed Jack operator set; the parser never passes one.
    pub fn binary_op(&mut self, op: &str) {
        match op {
            "+" => self.add(),
            "-" => self.sub(),
            "*" => self.call("Math.multiply", 2),
            "/" => self.call("Math.divide", 2),
            "&" => self.and(),
            "|" => self.or(),
            "<" => self.lt(),
            ">" => self.gt(),
            "=" => self.eq(),
            other => unreachable!("not a binary operator: {other}"),
        }
    }

    /// Emits the VM sequence for a unary operator (`-` or `~`).
    pub fn unary_op(&mut self, op: &str) {
        match op {
            "-" => self.neg(),
            "~" => self.not(),
            other => unreachable!("not a unary operator: {other}"),
        }
    }

    /// Emits the fixed VM sequence for a keyword constant term.
    pub fn keyword_constant(&mut self, keyword: &str) {
        match keyword {
            "true" => {
                self.push("constant", 0);
                self.not();
            }
            "false" | "null" => self.push("constant", 0),
            "this" => self.push("pointer", 0),
            other => unreachable!("not a keyword constant: {other}"),
        }
    }

    /// Emits the VM sequence that pushes a new `String` built from `value`.
    pub fn string_literal(&mut self, value: &str) {
        self.push("constant", value.chars().count());
        self.call("String.new", 1);
        for c in value.chars() {
            self.push("constant", c as u32 as usize);
            self.call("String.appendChar", 2);
        }
    }

    /// Next locally-unique `while` label index, for `WHILE_EXP_i`/`WHILE_END_i`.
    pub fn next_while_label(&mut self) -> usize {
        let i = self.while_counter;
        self.while_counter += 1;
        i
    }

    /// Next locally-unique `if` label index, for `IF_TRUE_i`/`IF_FALSE_i`/`IF_END_i`.
    pub fn next_if_label(&mut self) -> usize {
        let i = self.if_counter;
        self.if_counter += 1;
        i
    }

    pub fn into_buffer(self) -> String {
        self.buffer
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_operator_table() {
        let mut emitter = VmEmitter::new();
        for (op, expected) in [
            ("+", "add\n"),
            ("-", "sub\n"),
            ("*", "call Math.multiply 2\n"),
            ("/", "call Math.divide 2\n"),
            ("&", "and\n"),
            ("|", "or\n"),
            ("<", "lt\n"),
            (">", "gt\n"),
            ("=", "eq\n"),
        ] {
            let mut e = VmEmitter::new();
            e.binary_op(op);
            assert_eq!(e.into_buffer(), expected);
            let _ = &mut emitter;
        }
    }

    #[test]
    fn test_unary_operator_mapping_is_neg_then_not() {
        let mut e = VmEmitter::new();
        e.unary_op("-");
        assert_eq!(e.buffer(), "neg\n");
        e.unary_op("~");
        assert_eq!(e.buffer(), "neg\nnot\n");
    }

    #[test]
    fn test_keyword_constants() {
        let mut e = VmEmitter::new();
        e.keyword_constant("true");
        assert_eq!(e.buffer(), "push constant 0\nnot\n");

        let mut e = VmEmitter::new();
        e.keyword_constant("false");
        assert_eq!(e.buffer(), "push constant 0\n");

        let mut e = VmEmitter::new();
        e.keyword_constant("this");
        assert_eq!(e.buffer(), "push pointer 0\n");
    }

    #[test]
    fn test_string_literal_construction() {
        let mut e = VmEmitter::new();
        e.string_literal("Hi");
        assert_eq!(
            e.buffer(),
            "push constant 2\ncall String.new 1\npush constant 72\ncall String.appendChar 2\npush constant 105\ncall String.appendChar 2\n"
        );
    }

    #[test]
    fn test_while_and_if_counters_are_independent_and_monotonic() {
        let mut e = VmEmitter::new();
        assert_eq!(e.next_while_label(), 0);
        assert_eq!(e.next_if_label(), 0);
        assert_eq!(e.next_while_label(), 1);
        assert_eq!(e.next_if_label(), 1);
        e.reset_subroutine();
        assert_eq!(e.next_while_label(), 0);
        assert_eq!(e.next_if_label(), 0);
    }
}
