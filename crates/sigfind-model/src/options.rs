//! Search options.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionStatus {
    Enabled,
    Disabled,
}

impl OptionStatus {
    pub fn is_enabled(self) -> bool {
        self == OptionStatus::Enabled
    }
}

/// Which query dialect and matching conventions a search uses.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    FSharp,
    CSharp,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Let a trailing query wildcard absorb a whole remaining arrow tail.
    pub greedy_matching: OptionStatus,
    /// Charge distance when a match goes through a compiled name whose
    /// displayed form differs.
    pub respect_name_difference: OptionStatus,
    /// Allow curried/tupled reshaping and abbreviation unwrapping.
    pub ignore_parameter_style: OptionStatus,
    pub ignore_case: OptionStatus,
    /// Adjacent-swap budget for argument order tolerance.
    pub swap_order_depth: u32,
    /// Trailing-optional drop budget.
    pub complement_depth: u32,
    pub parallel: OptionStatus,
    pub mode: Mode,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            greedy_matching: OptionStatus::Disabled,
            respect_name_difference: OptionStatus::Enabled,
            ignore_parameter_style: OptionStatus::Enabled,
            ignore_case: OptionStatus::Disabled,
            swap_order_depth: 2,
            complement_depth: 2,
            parallel: OptionStatus::Disabled,
            mode: Mode::FSharp,
        }
    }
}

impl SearchOptions {
    /// Out-of-range depths are clamped, never rejected.
    pub fn with_swap_order_depth(mut self, depth: i64) -> Self {
        self.swap_order_depth = depth.max(0) as u32;
        self
    }

    pub fn with_complement_depth(mut self, depth: i64) -> Self {
        self.complement_depth = depth.max(0) as u32;
        self
    }
}
