use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reg {
    Ax,
    Dx,
    Cx,
    Si,
    Di,
    Bp,
    Sp,
    Ip,
    Bx, // scratch, never the image of a PDP-11 register
}

/// Register used to materialize operands the target cannot address directly.
pub const SCRATCH: Reg = Reg::Bx;

impl Reg {
    pub fn name(self) -> &'static str {
        match self {
            Reg::Ax => "ax",
            Reg::Dx => "dx",
            Reg::Cx => "cx",
            Reg::Si => "si",
            Reg::Di => "di",
            Reg::Bp => "bp",
            Reg::Sp => "sp",
            Reg::Ip => "ip",
            Reg::Bx => "bx",
        }
    }

    /// Registers accepted as the base of a memory operand as-is.
    pub fn indexable(self) -> bool {
        matches!(self, Reg::Bp | Reg::Si | Reg::Di)
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
