use crate::isa::i8086;

/// PDP-11 general registers. `sp` and `pc` are assembler aliases of R6/R7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reg {
    R0,
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
    R7,
}

impl Reg {
    pub const ALL: [Reg; 8] = [
        Reg::R0,
        Reg::R1,
        Reg::R2,
        Reg::R3,
        Reg::R4,
        Reg::R5,
        Reg::R6,
        Reg::R7,
    ];

    pub fn parse(s: &str) -> Option<Reg> {
        match s {
            "r0" => Some(Reg::R0),
            "r1" => Some(Reg::R1),
            "r2" => Some(Reg::R2),
            "r3" => Some(Reg::R3),
            "r4" => Some(Reg::R4),
            "r5" => Some(Reg::R5),
            "r6" | "sp" => Some(Reg::R6),
            "r7" | "pc" => Some(Reg::R7),
            _ => None,
        }
    }

    pub fn to_i8086(self) -> i8086::Reg {
        match self {
            Reg::R0 => i8086::Reg::Ax,
            Reg::R1 => i8086::Reg::Dx,
            Reg::R2 => i8086::Reg::Cx,
            Reg::R3 => i8086::Reg::Si,
            Reg::R4 => i8086::Reg::Di,
            Reg::R5 => i8086::Reg::Bp,
            Reg::R6 => i8086::Reg::Sp,
            Reg::R7 => i8086::Reg::Ip,
        }
    }
}
