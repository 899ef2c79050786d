use std::fmt;

use crate::isa::{i8086, pdp11};
use crate::lexer::{Lexer, TokenKind};
use crate::number::octal_to_target;

/// PDP-11 addressing mode of a decoded operand, as far as the translator
/// needs to know it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddrMode {
    /// Nothing left on the line.
    None,
    /// Register, immediate or bare symbol.
    Direct,
    /// `(R)` or `X(R)`.
    Deferred,
    /// `(R)+`
    AutoIncrement,
    /// `-(R)`
    AutoDecrement,
}

impl AddrMode {
    /// Modes whose register side effect cannot be expressed in a single
    /// i8086 operand.
    pub fn has_side_effect(self) -> bool {
        matches!(self, AddrMode::AutoIncrement | AddrMode::AutoDecrement)
    }
}

impl fmt::Display for AddrMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AddrMode::None => "missing operand",
            AddrMode::Direct => "direct",
            AddrMode::Deferred => "deferred (R)",
            AddrMode::AutoIncrement => "autoincrement (R)+",
            AddrMode::AutoDecrement => "autodecrement -(R)",
        };
        f.write_str(s)
    }
}

/// An operand rewritten into i8086 syntax. Lives only for the line it was
/// read on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operand {
    pub text: String,
    pub mode: AddrMode,
    /// Renamed register inside the parentheses, if any.
    pub base: Option<i8086::Reg>,
}

impl Operand {
    fn none() -> Self {
        Self {
            text: String::new(),
            mode: AddrMode::None,
            base: None,
        }
    }

    pub fn is_immediate(&self) -> bool {
        self.text.starts_with('#')
    }

    pub fn is_stack_top(&self) -> bool {
        self.text == "(sp)"
    }

    pub fn is_missing(&self) -> bool {
        self.mode == AddrMode::None
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Consume the tokens of one PDP-11 operand and rewrite it.
pub fn read_operand(lx: &mut Lexer<'_>) -> Operand {
    if lx.at_end() {
        return Operand::none();
    }
    if lx.peek().is("$") {
        lx.bump();
        let text = if lx.at_end() {
            String::new()
        } else {
            format!("#{}", octal_to_target(lx.bump().text))
        };
        return Operand {
            text,
            mode: AddrMode::Direct,
            base: None,
        };
    }

    let mut text = String::new();
    let mut mode = AddrMode::Direct;
    if lx.peek().is("-") {
        lx.bump();
        if lx.peek().kind == TokenKind::Number {
            text.push('-');
        } else {
            mode = AddrMode::AutoDecrement;
        }
    }
    if lx.peek().kind == TokenKind::Number {
        text.push_str(&octal_to_target(lx.bump().text));
    }
    if lx.peek().is("(") {
        lx.bump();
        text.push('(');
        if mode == AddrMode::Direct {
            mode = AddrMode::Deferred;
        }
    }
    let Some(reg) = pdp11::Reg::parse(lx.peek().text) else {
        return Operand {
            text,
            mode,
            base: None,
        };
    };
    lx.bump();
    let reg = reg.to_i8086();
    text.push_str(reg.name());
    let mut base = None;
    if lx.peek().is(")") {
        lx.bump();
        text.push(')');
        base = Some(reg);
        if lx.peek().is("+") {
            lx.bump();
            mode = AddrMode::AutoIncrement;
        }
    }
    Operand { text, mode, base }
}
