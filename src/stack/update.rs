//! Proposal body update action

use crate::forge::{Connector, ForgeError};
use crate::model::ProposalLocation;

/// Replaces the description of one proposal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalUpdateBody {
    pub proposal: ProposalLocation,
    /// New description; `None` clears it
    pub updated_body: Option<String>,
}

impl ProposalUpdateBody {
    /// Send the new body through `connector`
    ///
    /// Fails with [`ForgeError::UnsupportedService`] without a connector and
    /// with [`ForgeError::Unsupported`] when it cannot update bodies.
    pub fn run(&self, connector: Option<&dyn Connector>) -> Result<(), ForgeError> {
        let connector = connector.ok_or(ForgeError::UnsupportedService)?;
        let updater = connector
            .proposal_body_updater()
            .ok_or(ForgeError::Unsupported {
                forge: connector.name(),
                operation: "updating proposal bodies",
            })?;
        updater.update_proposal_body(
            &self.proposal,
            self.updated_body.as_deref().unwrap_or_default(),
        )
    }
}
