//! Transfer links between routes.

use serde::{Deserialize, Serialize};

/// An unordered pair of stop names at which a rider may change routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferLink {
    pub transfer1: String,
    pub transfer2: String,
}

impl TransferLink {
    /// Create a new transfer link.
    pub fn new(transfer1: impl Into<String>, transfer2: impl Into<String>) -> Self {
        Self {
            transfer1: transfer1.into(),
            transfer2: transfer2.into(),
        }
    }

    /// Both directions of travel through the link, declared order first.
    pub fn orientations(&self) -> [(&str, &str); 2] {
        [
            (self.transfer1.as_str(), self.transfer2.as_str()),
            (self.transfer2.as_str(), self.transfer1.as_str()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orientations_declared_first() {
        let link = TransferLink::new("Market", "Harbour");
        assert_eq!(
            link.orientations(),
            [("Market", "Harbour"), ("Harbour", "Market")]
        );
    }
}
