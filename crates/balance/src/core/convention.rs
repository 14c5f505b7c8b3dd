use std::fmt::{self, Display};

/// The order in which a compiler feeds a mapping key and the mapping's base slot into keccak-256
/// to locate a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutConvention {
    /// `keccak256(key . slot)`, used by Solidity.
    KeyThenSlot,
    /// `keccak256(slot . key)`, used by Vyper.
    SlotThenKey,
}

impl LayoutConvention {
    /// Every convention, in the order the search tries them.
    pub const ALL: [LayoutConvention; 2] =
        [LayoutConvention::KeyThenSlot, LayoutConvention::SlotThenKey];

    /// A short, stable identifier for machine readable output.
    pub const fn as_str(&self) -> &'static str {
        match self {
            LayoutConvention::KeyThenSlot => "key-then-slot",
            LayoutConvention::SlotThenKey => "slot-then-key",
        }
    }

    /// How the convention is described to humans.
    pub const fn describe(&self) -> &'static str {
        match self {
            LayoutConvention::KeyThenSlot => "solidity mapping format (key, slot)",
            LayoutConvention::SlotThenKey => "vyper mapping format (slot, key)",
        }
    }
}

impl Display for LayoutConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order() {
        assert_eq!(LayoutConvention::ALL[0], LayoutConvention::KeyThenSlot);
        assert_eq!(LayoutConvention::ALL[1], LayoutConvention::SlotThenKey);
    }

    #[test]
    fn test_display() {
        assert_eq!(LayoutConvention::KeyThenSlot.to_string(), "key-then-slot");
        assert_eq!(LayoutConvention::SlotThenKey.to_string(), "slot-then-key");
    }
}
