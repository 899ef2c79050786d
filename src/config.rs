use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Features: u32 {
const PUSH_IDIOM = 1 << 0; // mov X, (sp) / -(sp) => push
const STACK_TST = 1 << 1; // tst (sp)+ / -(sp) => sp adjust
const CMP_POP = 1 << 2; // cmp (sp)+, (sp)+ => add sp, #4
const SCRATCH_SOURCE = 1 << 3; // load immediates/indirect sources into bx
const COND_BRANCHES = 1 << 4; // jeq, jne, jlt, ... beyond jbr/jle
const ARITH_EXT = 1 << 5; // sub, dec
}
}

impl Features {
    pub const STANDARD: Features = Features::PUSH_IDIOM
        .union(Features::STACK_TST)
        .union(Features::CMP_POP)
        .union(Features::SCRATCH_SOURCE);
    pub const EXTENDED: Features = Features::COND_BRANCHES.union(Features::ARITH_EXT);
}

impl Default for Features {
    fn default() -> Self {
        Features::STANDARD
    }
}

/// What a `;` in the source means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Semicolon {
    /// Rest of the line is passed through behind the target comment marker.
    #[default]
    Comment,
    /// Statement separator; translation continues after it.
    Separator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    pub features: Features,
    pub semicolon: Semicolon,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("invalid translator config: {0}")]
    Json(#[from] serde_json::Error),
}

impl TranslatorConfig {
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn has(&self, f: Features) -> bool {
        self.features.contains(f)
    }
}
