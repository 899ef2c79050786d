use crate::number::is_digits;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Ident,     // mnemonics, registers, labels, symbols
    Number,    // octal digit run
    Directive, // `.globl`, `.text`, ...
    Punct,     // any other single character
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

impl<'a> Token<'a> {
    pub const END: Token<'static> = Token { kind: TokenKind::End, text: "" };

    pub fn is_end(&self) -> bool {
        self.kind == TokenKind::End
    }

    pub fn is(&self, text: &str) -> bool {
        self.text == text
    }
}

fn is_space(ch: char) -> bool {
    ch <= ' '
}

fn is_letter(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '~'
}

/// Single-line scanner with one token of lookahead.
///
/// The cursor only moves forward; once the line is exhausted every further
/// read yields [`Token::END`].
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    src: &'a str,
    pos: usize,
    start: usize, // offset of the lookahead token
    cur: Token<'a>,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        let mut lx = Self {
            src,
            pos: 0,
            start: 0,
            cur: Token::END,
        };
        lx.advance();
        lx
    }

    pub fn peek(&self) -> Token<'a> {
        self.cur
    }

    /// Consume the lookahead and return it.
    pub fn bump(&mut self) -> Token<'a> {
        let tok = self.cur;
        self.advance();
        tok
    }

    pub fn at_end(&self) -> bool {
        self.cur.is_end()
    }

    /// Raw source from the start of the lookahead to end of line.
    pub fn rest(&self) -> &'a str {
        &self.src[self.start..]
    }

    fn skip_while(&mut self, f: impl Fn(char) -> bool) {
        let tail = &self.src[self.pos..];
        let n = tail.find(|c: char| !f(c)).unwrap_or(tail.len());
        self.pos += n;
    }

    fn advance(&mut self) {
        self.skip_while(is_space);
        self.start = self.pos;
        let Some(ch) = self.src[self.pos..].chars().next() else {
            self.cur = Token::END;
            return;
        };
        self.pos += ch.len_utf8();
        let kind = if is_letter(ch) {
            self.skip_while(is_letter);
            TokenKind::Ident
        } else if ch == '.' {
            self.skip_while(|c| c.is_ascii_alphanumeric());
            TokenKind::Directive
        } else {
            TokenKind::Punct
        };
        let text = &self.src[self.start..self.pos];
        let kind = if kind == TokenKind::Ident && is_digits(text) {
            TokenKind::Number
        } else {
            kind
        };
        self.cur = Token { kind, text };
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if self.at_end() {
            None
        } else {
            Some(self.bump())
        }
    }
}
