//! Hosted proposal (pull request) model

use super::BranchName;

/// A proposal as reported by the forge connector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalData {
    /// Proposal number on the forge (e.g., PR #42)
    pub number: u64,
    pub title: String,
    /// Web URL of the proposal
    pub url: String,
    /// Branch the proposal is opened from
    pub source: BranchName,
    /// Branch the proposal merges into
    pub target: BranchName,
    /// Current description, if the connector returned one
    pub body: Option<String>,
}

impl ProposalData {
    /// Handle used to update this proposal, if number and URL are usable
    pub fn location(&self) -> Option<ProposalLocation> {
        ProposalLocation::new(self.number, &self.url)
    }
}

/// Identifies a proposal for update operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalLocation {
    pub number: u64,
    pub url: String,
}

impl ProposalLocation {
    /// Returns `None` unless `number > 0` and `url` is non-empty
    pub fn new(number: u64, url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        if number == 0 || url.is_empty() {
            return None;
        }
        Some(Self { number, url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_proposal() -> ProposalData {
        ProposalData {
            number: 12,
            title: "Add parser".to_string(),
            url: "https://github.com/acme/app/pull/12".to_string(),
            source: BranchName::from("parser"),
            target: BranchName::from("main"),
            body: None,
        }
    }

    #[test]
    fn test_location_from_proposal() {
        let location = sample_proposal().location().unwrap();
        assert_eq!(location.number, 12);
        assert_eq!(location.url, "https://github.com/acme/app/pull/12");
    }

    #[test]
    fn test_location_rejects_zero_number() {
        assert!(ProposalLocation::new(0, "https://example.com/pull/0").is_none());
    }

    #[test]
    fn test_location_rejects_empty_url() {
        let proposal = ProposalData {
            url: String::new(),
            ..sample_proposal()
        };
        assert!(proposal.location().is_none());
    }
}
