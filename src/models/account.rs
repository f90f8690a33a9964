//! Account model and trait implementations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::CanvasClient;
use crate::context::Context;
use crate::error::{CanvasError, Result};
use crate::pagination::PageSequence;
use crate::traits::Get;

use super::outcome::{OutcomeGroup, OutcomeLink};

/// A Canvas account.
///
/// Accounts form the administrative hierarchy above courses; outcome
/// groups can be scoped to an account instead of a single course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// The API-assigned account id.
    pub id: u64,

    /// Account display name.
    #[serde(default)]
    pub name: Option<String>,

    /// Parent account, absent for root accounts.
    #[serde(default)]
    pub parent_account_id: Option<u64>,

    /// Root of this account's hierarchy.
    #[serde(default)]
    pub root_account_id: Option<u64>,

    /// Lifecycle state ("active", "deleted").
    #[serde(default)]
    pub workflow_state: Option<String>,

    /// Server fields this client does not model explicitly.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl std::fmt::Display for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} ({})", name, self.id),
            None => write!(f, "account {}", self.id),
        }
    }
}

impl Account {
    fn context(&self) -> Context {
        Context::Account(self.id)
    }

    /// Fetch the root outcome group of this account.
    pub async fn root_outcome_group(&self, client: &CanvasClient) -> Result<OutcomeGroup> {
        OutcomeGroup::root(client, self.context()).await
    }

    /// List all outcome groups in this account.
    pub fn outcome_groups(&self, client: &CanvasClient) -> PageSequence<OutcomeGroup> {
        OutcomeGroup::in_context(client, self.context())
    }

    /// List all outcome links in this account, regardless of group.
    pub fn outcome_links(&self, client: &CanvasClient) -> PageSequence<OutcomeLink> {
        OutcomeLink::in_context(client, self.context())
    }
}

#[async_trait]
impl Get for Account {
    type Id = u64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &CanvasClient, id: u64) -> Result<Self> {
        let response = client.get(&format!("accounts/{id}")).await?;
        let account: Account = response.json().await.map_err(CanvasError::HttpError)?;
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let account: Account = serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "Example University",
        }))
        .unwrap();
        assert_eq!(account.to_string(), "Example University (1)");

        let minimal: Account = serde_json::from_value(serde_json::json!({"id": 2})).unwrap();
        assert_eq!(minimal.to_string(), "account 2");
    }
}
