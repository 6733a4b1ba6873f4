//! Rule identities.

use std::fmt;

/// Index of a named rule in its grammar, in declaration order.
///
/// Parse-tree nodes carry a `RuleId` so callers can dispatch on the rule
/// that produced them without comparing names.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct RuleId(u32);

impl RuleId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        RuleId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Id for the rule at `index`, or `None` past `u32::MAX`.
    pub fn from_index(index: usize) -> Option<Self> {
        u32::try_from(index).ok().map(RuleId)
    }
}

impl fmt::Debug for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RuleId({})", self.0)
    }
}
