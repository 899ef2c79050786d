use serde::Serialize;
use tracing::{debug, trace};

use crate::config::{Features, Semicolon, TranslatorConfig};
use crate::isa::{i8086, pdp11};
use crate::lexer::{Lexer, Token, TokenKind};
use crate::number::octal_byte;
use crate::operand::{read_operand, AddrMode, Operand};

/// Fatal translation failure. The translator refuses to emit code for
/// addressing modes it cannot rewrite faithfully.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    #[error("unsupported {mode} operand for `{mnemonic}`: {line}")]
    UnsupportedMode {
        mnemonic: String,
        mode: AddrMode,
        line: String,
    },
}

/// A construct that was dropped without output. Not an error: the line may
/// still partially translate, or fall back to the commented-out form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Skip {
    UnknownToken { token: String },
    MalformedOperands { mnemonic: String },
    MalformedCall,
    MissingTarget { mnemonic: String },
}

/// Result of translating one source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub source: String,
    pub text: String,
    pub written: bool,
    pub skipped: Vec<Skip>,
}

impl Line {
    /// Output line without the trailing newline.
    pub fn render(&self) -> String {
        if self.written {
            self.text.clone()
        } else {
            format!("! {}", self.source)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

#[derive(Debug, Default)]
struct Out {
    text: String,
    written: bool,
    after_label: bool,
}

impl Out {
    fn write(&mut self, s: &str) {
        if self.after_label {
            self.text.push(' ');
            self.after_label = false;
        }
        self.text.push_str(s);
        self.written = true;
    }

    fn label(&mut self, name: &str) {
        self.write(name);
        self.text.push(':');
        self.after_label = true;
    }
}

/// Conditional branch pseudo-ops of the PDP-11 `as` and their i8086 jumps.
const COND_BRANCHES: &[(&str, &str)] = &[
    ("br", "jmp"),
    ("jeq", "je"),
    ("jne", "jne"),
    ("jlt", "jl"),
    ("jgt", "jg"),
    ("jge", "jge"),
    ("jlo", "jb"),
    ("jlos", "jbe"),
    ("jhi", "ja"),
    ("jhis", "jae"),
];

#[derive(Debug, Clone, Default)]
pub struct Translator {
    cfg: TranslatorConfig,
}

impl Translator {
    pub fn new(cfg: TranslatorConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.cfg
    }

    /// Translate one line of PDP-11 assembly. Lines are independent of each
    /// other.
    pub fn translate_line(&self, line: &str) -> Result<Line, TranslateError> {
        let mut lt = LineTranslator {
            cfg: &self.cfg,
            line,
            lx: Lexer::new(line),
            out: Out::default(),
            skipped: Vec::new(),
        };
        while !lt.lx.at_end() {
            let tok = lt.lx.bump();
            if lt.dispatch(tok)? == Flow::Stop {
                break;
            }
        }
        if !lt.out.written {
            debug!(line, "nothing translated, commenting out");
        }
        Ok(Line {
            source: line.to_string(),
            text: lt.out.text,
            written: lt.out.written,
            skipped: lt.skipped,
        })
    }
}

struct LineTranslator<'a> {
    cfg: &'a TranslatorConfig,
    line: &'a str,
    lx: Lexer<'a>,
    out: Out,
    skipped: Vec<Skip>,
}

impl<'a> LineTranslator<'a> {
    fn skip(&mut self, skip: Skip) {
        debug!(line = self.line, ?skip, "skipped");
        self.skipped.push(skip);
    }

    fn malformed(&mut self, mnemonic: &str) {
        self.skip(Skip::MalformedOperands {
            mnemonic: mnemonic.to_string(),
        });
    }

    fn unsupported(&self, mnemonic: &str, mode: AddrMode) -> TranslateError {
        TranslateError::UnsupportedMode {
            mnemonic: mnemonic.to_string(),
            mode,
            line: self.line.trim_end().to_string(),
        }
    }

    fn reject_side_effects(&self, mnemonic: &str, opr: &Operand) -> Result<(), TranslateError> {
        if opr.mode.has_side_effect() {
            return Err(self.unsupported(mnemonic, opr.mode));
        }
        Ok(())
    }

    fn dispatch(&mut self, tok: Token<'a>) -> Result<Flow, TranslateError> {
        trace!(token = tok.text, "dispatch");
        match tok.text {
            ";" => return Ok(self.semicolon()),
            ".globl" => self.globl(),
            ".text" => self.out.write(".sect .text"),
            ".data" => self.out.write(".sect .data"),
            ".byte" => self.byte(),
            _ if self.lx.peek().is(":") && matches!(tok.kind, TokenKind::Ident | TokenKind::Number) => {
                self.lx.bump();
                if !tok.text.starts_with('~') {
                    self.out.label(tok.text);
                }
            }
            "jsr" => self.jsr(),
            "jmp" | "jbr" => self.branch(tok.text, "jmp"),
            "jle" => self.branch(tok.text, "jle"),
            "mov" => self.mov()?,
            "tst" => self.tst(),
            "cmp" => self.cmp()?,
            "add" => self.binary("add")?,
            "clr" => {
                let dst = self.unary("clr")?;
                if let Some(dst) = dst {
                    self.out.write(&format!("mov {dst}, #0"));
                }
            }
            "inc" => {
                if let Some(dst) = self.unary("inc")? {
                    self.out.write(&format!("inc {dst}"));
                }
            }
            "asl" => {
                let src = read_operand(&mut self.lx);
                if src.mode != AddrMode::Direct {
                    return Err(self.unsupported("asl", src.mode));
                }
                self.out.write(&format!("sal {src}, #1"));
            }
            "sub" if self.cfg.has(Features::ARITH_EXT) => self.binary("sub")?,
            "dec" if self.cfg.has(Features::ARITH_EXT) => {
                if let Some(dst) = self.unary("dec")? {
                    self.out.write(&format!("dec {dst}"));
                }
            }
            mn if self.cfg.has(Features::COND_BRANCHES) => {
                match COND_BRANCHES.iter().find(|(src, _)| *src == mn) {
                    Some((_, target)) => self.branch(mn, target),
                    None => self.skip(Skip::UnknownToken { token: mn.to_string() }),
                }
            }
            other => self.skip(Skip::UnknownToken {
                token: other.to_string(),
            }),
        }
        Ok(Flow::Continue)
    }

    fn semicolon(&mut self) -> Flow {
        match self.cfg.semicolon {
            Semicolon::Separator => {
                self.out.write("; ");
                Flow::Continue
            }
            Semicolon::Comment => {
                let rest = self.lx.rest().trim_end();
                if !self.out.text.is_empty() && !self.out.after_label {
                    self.out.text.push(' ');
                }
                if rest.is_empty() {
                    self.out.write("!");
                } else {
                    self.out.write(&format!("! {rest}"));
                }
                Flow::Stop
            }
        }
    }

    fn globl(&mut self) {
        if self.lx.at_end() {
            self.skip(Skip::MissingTarget {
                mnemonic: ".globl".to_string(),
            });
            return;
        }
        let sym = self.lx.bump();
        self.out.write(&format!(".extern {}", sym.text));
    }

    fn byte(&mut self) {
        self.out.write(".data1 ");
        loop {
            let tok = self.lx.peek();
            match tok.kind {
                TokenKind::Number => {
                    self.lx.bump();
                    match octal_byte(tok.text) {
                        Some(b) => self.out.write(&b),
                        None => self.out.write(tok.text),
                    }
                }
                TokenKind::Punct if tok.is(",") => {
                    self.lx.bump();
                    self.out.write(", ");
                }
                _ => break,
            }
        }
    }

    // jsr <reg>, *$<target>  |  jsr <reg>, <target>
    fn jsr(&mut self) {
        if pdp11::Reg::parse(self.lx.peek().text).is_none() {
            return self.skip(Skip::MalformedCall);
        }
        self.lx.bump();
        if !self.lx.peek().is(",") {
            return self.skip(Skip::MalformedCall);
        }
        self.lx.bump();
        if self.lx.peek().is("*") {
            self.lx.bump();
            if !self.lx.peek().is("$") {
                return self.skip(Skip::MalformedCall);
            }
            self.lx.bump();
        }
        let Some(target) = self.symbol() else {
            return self.skip(Skip::MalformedCall);
        };
        self.out.write(&format!("call {target}"));
    }

    fn branch(&mut self, mnemonic: &str, target: &str) {
        let Some(label) = self.symbol() else {
            return self.skip(Skip::MissingTarget {
                mnemonic: mnemonic.to_string(),
            });
        };
        self.out.write(&format!("{target} {label}"));
    }

    /// Consume a label or symbol name. Registers and punctuation are left
    /// in place.
    fn symbol(&mut self) -> Option<&'a str> {
        let tok = self.lx.peek();
        if tok.kind != TokenKind::Ident || pdp11::Reg::parse(tok.text).is_some() {
            return None;
        }
        self.lx.bump();
        Some(tok.text)
    }

    /// `SRC, DST`; `None` when the operand list is malformed.
    fn two_operands(&mut self, mnemonic: &str) -> Option<(Operand, Operand)> {
        let src = read_operand(&mut self.lx);
        if !self.lx.peek().is(",") {
            self.malformed(mnemonic);
            return None;
        }
        self.lx.bump();
        let dst = read_operand(&mut self.lx);
        if dst.is_missing() {
            self.malformed(mnemonic);
            return None;
        }
        Some((src, dst))
    }

    fn unary(&mut self, mnemonic: &str) -> Result<Option<Operand>, TranslateError> {
        let dst = read_operand(&mut self.lx);
        if dst.is_missing() {
            self.malformed(mnemonic);
            return Ok(None);
        }
        self.reject_side_effects(mnemonic, &dst)?;
        Ok(Some(dst))
    }

    fn binary(&mut self, mnemonic: &str) -> Result<(), TranslateError> {
        let Some((src, dst)) = self.two_operands(mnemonic) else {
            return Ok(());
        };
        self.reject_side_effects(mnemonic, &src)?;
        self.reject_side_effects(mnemonic, &dst)?;
        self.out.write(&format!("{mnemonic} {dst}, {src}"));
        Ok(())
    }

    fn mov(&mut self) -> Result<(), TranslateError> {
        let Some((src, dst)) = self.two_operands("mov") else {
            return Ok(());
        };
        if src.mode.has_side_effect() {
            return Err(self.unsupported("mov", src.mode));
        }
        if dst.mode == AddrMode::AutoIncrement {
            return Err(self.unsupported("mov", dst.mode));
        }
        let push = self.cfg.has(Features::PUSH_IDIOM)
            && dst.is_stack_top()
            && matches!(dst.mode, AddrMode::Deferred | AddrMode::AutoDecrement);
        if !push {
            if dst.mode == AddrMode::AutoDecrement {
                return Err(self.unsupported("mov", dst.mode));
            }
            self.out.write(&format!("mov {dst}, {src}"));
            return Ok(());
        }
        // mov X, (sp) replaces the stack top: drop it, then push.
        if dst.mode == AddrMode::Deferred {
            self.out.write("add sp, #2; ");
        }
        let src = self.materialize(src);
        self.out.write(&format!("push {src}"));
        Ok(())
    }

    fn tst(&mut self) {
        let src = read_operand(&mut self.lx);
        if src.is_missing() {
            return self.malformed("tst");
        }
        if self.cfg.has(Features::STACK_TST) && src.is_stack_top() {
            match src.mode {
                AddrMode::AutoIncrement => return self.out.write("add sp, #2"),
                AddrMode::AutoDecrement => return self.out.write("sub sp, #2"),
                _ => {}
            }
        }
        self.out.write(&format!("cmp {src}, #0"));
    }

    fn cmp(&mut self) -> Result<(), TranslateError> {
        let Some((src, dst)) = self.two_operands("cmp") else {
            return Ok(());
        };
        if self.cfg.has(Features::CMP_POP)
            && src.is_stack_top()
            && dst.is_stack_top()
            && src.mode == AddrMode::AutoIncrement
            && dst.mode == AddrMode::AutoIncrement
        {
            self.out.write("add sp, #4");
            return Ok(());
        }
        self.reject_side_effects("cmp", &src)?;
        self.reject_side_effects("cmp", &dst)?;
        let src = self.materialize(src);
        self.out.write(&format!("cmp {src}, {dst}"));
        Ok(())
    }

    /// Bring a source the target cannot use in place into the scratch
    /// register. Registers pass through untouched.
    fn materialize(&mut self, src: Operand) -> String {
        if !self.cfg.has(Features::SCRATCH_SOURCE) {
            return src.text;
        }
        if src.is_immediate() {
            self.out.write(&format!("mov {}, {src}; ", i8086::SCRATCH));
            return i8086::SCRATCH.name().to_string();
        }
        match src.mode {
            AddrMode::None | AddrMode::Direct => src.text,
            AddrMode::Deferred | AddrMode::AutoIncrement | AddrMode::AutoDecrement => {
                self.via_scratch(src)
            }
        }
    }

    fn via_scratch(&mut self, src: Operand) -> String {
        let scratch = i8086::SCRATCH;
        let mut text = src.text;
        if let Some(base) = src.base.filter(|r| !r.indexable()) {
            self.out.write(&format!("mov {scratch}, {base}; "));
            text = text.replacen(&format!("({base})"), &format!("({scratch})"), 1);
        }
        self.out.write(&format!("mov {scratch}, {text}; "));
        scratch.name().to_string()
    }
}
