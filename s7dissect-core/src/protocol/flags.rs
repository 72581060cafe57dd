use serde::Serialize;

/// One byte of named bit flags, bit 0 first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BitFlags {
    pub raw: u8,
    /// Names of the set bits
    pub set: Vec<&'static str>,
}

impl BitFlags {
    pub fn new(raw: u8, names: &[&'static str; 8]) -> Self {
        let set = names
            .iter()
            .enumerate()
            .filter(|(bit, _)| raw & (1 << bit) != 0)
            .map(|(_, name)| *name)
            .collect();
        Self { raw, set }
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.set.iter().any(|n| *n == name)
    }
}

/// `SIG_1`..`SIG_8` of alarm state bytes
pub const SIGNAL_BITS: [&str; 8] = [
    "SIG_1", "SIG_2", "SIG_3", "SIG_4", "SIG_5", "SIG_6", "SIG_7", "SIG_8",
];
