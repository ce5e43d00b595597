//! CopyOutcome - Result of copying one item

/// What happened to a single copied item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    /// Item fully copied
    Copied { bytes: u64 },

    /// Permission denied during the copy (source locked or in use).
    /// The old destination is already gone and is not restored.
    Locked { reason: String },
}

impl CopyOutcome {
    pub fn is_copied(&self) -> bool {
        matches!(self, CopyOutcome::Copied { .. })
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, CopyOutcome::Locked { .. })
    }

    /// Bytes written, zero for a locked item
    pub fn bytes(&self) -> u64 {
        match self {
            CopyOutcome::Copied { bytes } => *bytes,
            CopyOutcome::Locked { .. } => 0,
        }
    }
}
