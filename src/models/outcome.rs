//! Outcome, outcome group, and outcome link models.
//!
//! Outcomes are learning objectives; outcome groups organize them into a
//! tree per context (global, account, or course); outcome links tie an
//! outcome into a group. Groups and links carry their context and build
//! their own endpoint paths from it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::CanvasClient;
use crate::context::Context;
use crate::error::{CanvasError, Result};
use crate::pagination::PageSequence;
use crate::traits::Get;

/// A Canvas learning outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outcome {
    /// The API-assigned outcome id.
    pub id: u64,

    /// Outcome title.
    pub title: String,

    /// Optional friendly name shown to students.
    #[serde(default)]
    pub display_name: Option<String>,

    /// Outcome description (HTML).
    #[serde(default)]
    pub description: Option<String>,

    /// Context owning this outcome ("Account", "Course", absent for global).
    #[serde(default)]
    pub context_type: Option<String>,

    /// Id of the owning context.
    #[serde(default)]
    pub context_id: Option<u64>,

    /// API URL of this outcome.
    #[serde(default)]
    pub url: Option<String>,

    /// Maximum points for this outcome.
    #[serde(default)]
    pub points_possible: Option<f64>,

    /// Points required to consider the outcome mastered.
    #[serde(default)]
    pub mastery_points: Option<f64>,

    /// Whether the caller may update this outcome.
    #[serde(default)]
    pub can_edit: Option<bool>,

    /// Server fields this client does not model explicitly.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.title, self.id)
    }
}

/// A rating level on an outcome's mastery scale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomeRating {
    /// Rating label (e.g. "Exceeds Expectations").
    pub description: String,
    /// Points awarded at this level.
    pub points: f64,
}

/// Parameters for updating an outcome.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OutcomeUpdateParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mastery_points: Option<f64>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub ratings: Vec<OutcomeRating>,
}

impl Outcome {
    /// Re-fetch this outcome and return a fresh wrapper.
    pub async fn show(&self, client: &CanvasClient) -> Result<Outcome> {
        Outcome::get(client, self.id).await
    }

    /// Update this outcome in place.
    ///
    /// On a response that echoes the outcome (carries `id`), local
    /// attributes are overwritten from it and `Ok(true)` is returned. A
    /// 2xx response without `id` leaves the wrapper untouched and returns
    /// `Ok(false)`; non-2xx statuses surface as errors.
    #[tracing::instrument(skip(client, params))]
    pub async fn update(
        &mut self,
        client: &CanvasClient,
        params: OutcomeUpdateParams,
    ) -> Result<bool> {
        let path = format!("outcomes/{}", self.id);
        let response = client.put(&path, &params).await?;
        let value: serde_json::Value = response.json().await.map_err(CanvasError::HttpError)?;

        if value.get("id").is_some() {
            *self = serde_json::from_value(value)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[async_trait]
impl Get for Outcome {
    type Id = u64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &CanvasClient, id: u64) -> Result<Self> {
        let response = client.get(&format!("outcomes/{id}")).await?;
        let outcome: Outcome = response.json().await.map_err(CanvasError::HttpError)?;
        Ok(outcome)
    }
}

/// Identifies an outcome by raw id or by a hydrated [`Outcome`].
///
/// Methods that take a link target accept `impl Into<OutcomeId>`, so both
/// `group.link_existing(&client, 3)` and
/// `group.link_existing(&client, &outcome)` work and produce the same
/// request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutcomeId(pub u64);

impl From<u64> for OutcomeId {
    fn from(id: u64) -> Self {
        OutcomeId(id)
    }
}

impl From<&Outcome> for OutcomeId {
    fn from(outcome: &Outcome) -> Self {
        OutcomeId(outcome.id)
    }
}

/// Parameters for creating an outcome group (subgroup).
#[derive(Debug, Clone, Default, Serialize)]
pub struct OutcomeGroupParams {
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_guid: Option<String>,
}

/// Parameters for updating an outcome group.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OutcomeGroupUpdateParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_guid: Option<String>,

    /// Move the group under a different parent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_outcome_group_id: Option<u64>,
}

/// Parameters for creating a new outcome directly inside a group.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewOutcomeParams {
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mastery_points: Option<f64>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub ratings: Vec<OutcomeRating>,
}

/// A Canvas outcome group.
///
/// Groups form a tree per context, rooted at the context's root outcome
/// group. Each group knows its context and addresses its own endpoints
/// through it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomeGroup {
    /// The API-assigned group id.
    pub id: u64,

    /// Group title.
    pub title: String,

    /// Group description (HTML).
    #[serde(default)]
    pub description: Option<String>,

    /// Optional vendor-assigned identifier.
    #[serde(default)]
    pub vendor_guid: Option<String>,

    /// Context owning this group ("Account", "Course", absent for global).
    #[serde(default)]
    pub context_type: Option<String>,

    /// Id of the owning context.
    #[serde(default)]
    pub context_id: Option<u64>,

    /// API URL of this group.
    #[serde(default)]
    pub url: Option<String>,

    /// API URL listing this group's subgroups.
    #[serde(default)]
    pub subgroups_url: Option<String>,

    /// API URL listing this group's linked outcomes.
    #[serde(default)]
    pub outcomes_url: Option<String>,

    /// Whether the caller may update this group.
    #[serde(default)]
    pub can_edit: Option<bool>,

    /// Abbreviated parent group, absent on roots.
    #[serde(default)]
    pub parent_outcome_group: Option<Box<OutcomeGroup>>,

    /// Server fields this client does not model explicitly.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl std::fmt::Display for OutcomeGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.title, self.id)
    }
}

impl OutcomeGroup {
    /// The endpoint context this group belongs to.
    pub fn context(&self) -> Context {
        Context::from_fields(self.context_type.as_deref(), self.context_id)
    }

    fn path(&self) -> String {
        format!("{}/outcome_groups/{}", self.context().prefix(), self.id)
    }

    /// Fetch the root outcome group of a context.
    #[tracing::instrument(skip(client))]
    pub async fn root(client: &CanvasClient, context: Context) -> Result<OutcomeGroup> {
        let path = format!("{}/root_outcome_group", context.prefix());
        let response = client.get(&path).await?;
        let group: OutcomeGroup = response.json().await.map_err(CanvasError::HttpError)?;
        Ok(group)
    }

    /// List all outcome groups in a context.
    pub fn in_context(client: &CanvasClient, context: Context) -> PageSequence<OutcomeGroup> {
        PageSequence::new(client, format!("{}/outcome_groups", context.prefix()))
    }

    /// Re-fetch this group and return a fresh wrapper.
    pub async fn show(&self, client: &CanvasClient) -> Result<OutcomeGroup> {
        OutcomeGroup::get(client, (self.context(), self.id)).await
    }

    /// Update this group in place.
    ///
    /// Same contract as [`Outcome::update`]: hydrates from an `id`-bearing
    /// response and returns `Ok(true)`; `Ok(false)` on an id-less 2xx.
    #[tracing::instrument(skip(client, params))]
    pub async fn update(
        &mut self,
        client: &CanvasClient,
        params: OutcomeGroupUpdateParams,
    ) -> Result<bool> {
        let response = client.put(&self.path(), &params).await?;
        let value: serde_json::Value = response.json().await.map_err(CanvasError::HttpError)?;

        if value.get("id").is_some() {
            *self = serde_json::from_value(value)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Delete this group.
    ///
    /// Returns `Ok(true)` when the server echoes the deleted group back.
    /// Only non-root groups can be deleted.
    #[tracing::instrument(skip(client))]
    pub async fn delete(&self, client: &CanvasClient) -> Result<bool> {
        let response = client.delete(&self.path()).await?;
        let value: serde_json::Value = response.json().await.map_err(CanvasError::HttpError)?;
        Ok(value.get("id").is_some())
    }

    /// List the outcomes linked into this group, in server order.
    pub fn linked_outcomes(&self, client: &CanvasClient) -> PageSequence<OutcomeLink> {
        PageSequence::new(client, format!("{}/outcomes", self.path()))
    }

    /// Link an existing outcome into this group.
    ///
    /// Accepts a raw outcome id or a hydrated [`Outcome`]; both produce
    /// the same request.
    #[tracing::instrument(skip(client, outcome))]
    pub async fn link_existing(
        &self,
        client: &CanvasClient,
        outcome: impl Into<OutcomeId> + Send,
    ) -> Result<OutcomeLink> {
        let OutcomeId(outcome_id) = outcome.into();
        let path = format!("{}/outcomes/{}", self.path(), outcome_id);
        let response = client.put(&path, &serde_json::json!({})).await?;
        let link: OutcomeLink = response.json().await.map_err(CanvasError::HttpError)?;
        Ok(link)
    }

    /// Create a new outcome and link it into this group.
    #[tracing::instrument(skip(client, params))]
    pub async fn link_new(
        &self,
        client: &CanvasClient,
        params: NewOutcomeParams,
    ) -> Result<OutcomeLink> {
        let path = format!("{}/outcomes", self.path());
        let response = client.post(&path, &params).await?;
        let link: OutcomeLink = response.json().await.map_err(CanvasError::HttpError)?;
        Ok(link)
    }

    /// Remove an outcome from this group, returning the removed link.
    ///
    /// Fails if the link is the outcome's last and the outcome has been
    /// assessed (the server rejects the unlink).
    #[tracing::instrument(skip(client, outcome))]
    pub async fn unlink_outcome(
        &self,
        client: &CanvasClient,
        outcome: impl Into<OutcomeId> + Send,
    ) -> Result<OutcomeLink> {
        let OutcomeId(outcome_id) = outcome.into();
        let path = format!("{}/outcomes/{}", self.path(), outcome_id);
        let response = client.delete(&path).await?;
        let link: OutcomeLink = response.json().await.map_err(CanvasError::HttpError)?;
        Ok(link)
    }

    /// List the immediate subgroups of this group.
    pub fn subgroups(&self, client: &CanvasClient) -> PageSequence<OutcomeGroup> {
        PageSequence::new(client, format!("{}/subgroups", self.path()))
    }

    /// Create a subgroup under this group.
    #[tracing::instrument(skip(client, params))]
    pub async fn create_subgroup(
        &self,
        client: &CanvasClient,
        params: OutcomeGroupParams,
    ) -> Result<OutcomeGroup> {
        let path = format!("{}/subgroups", self.path());
        let response = client.post(&path, &params).await?;
        let group: OutcomeGroup = response.json().await.map_err(CanvasError::HttpError)?;
        Ok(group)
    }

    /// Import another group (and its outcomes) as a subgroup of this one.
    #[tracing::instrument(skip(client))]
    pub async fn import_outcome_group(
        &self,
        client: &CanvasClient,
        source_group_id: u64,
    ) -> Result<OutcomeGroup> {
        #[derive(Serialize)]
        struct ImportBody {
            source_outcome_group_id: u64,
        }

        let path = format!("{}/import", self.path());
        let response = client
            .post(
                &path,
                &ImportBody {
                    source_outcome_group_id: source_group_id,
                },
            )
            .await?;
        let group: OutcomeGroup = response.json().await.map_err(CanvasError::HttpError)?;
        Ok(group)
    }
}

#[async_trait]
impl Get for OutcomeGroup {
    type Id = (Context, u64);

    #[tracing::instrument(skip(client))]
    async fn get(client: &CanvasClient, id: Self::Id) -> Result<Self> {
        let (context, group_id) = id;
        let path = format!("{}/outcome_groups/{}", context.prefix(), group_id);
        let response = client.get(&path).await?;
        let group: OutcomeGroup = response.json().await.map_err(CanvasError::HttpError)?;
        Ok(group)
    }
}

/// The association between an outcome group and an outcome.
///
/// Links have no id of their own; identity is the (group, outcome) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomeLink {
    /// API URL of this link.
    #[serde(default)]
    pub url: Option<String>,

    /// Context owning this link ("Account", "Course", absent for global).
    #[serde(default)]
    pub context_type: Option<String>,

    /// Id of the owning context.
    #[serde(default)]
    pub context_id: Option<u64>,

    /// The group side of the association (abbreviated group).
    pub outcome_group: OutcomeGroup,

    /// The outcome side of the association (abbreviated outcome).
    pub outcome: Outcome,

    /// Whether the linked outcome has been assessed in this context.
    #[serde(default)]
    pub assessed: Option<bool>,

    /// Whether the caller may remove this link.
    #[serde(default)]
    pub can_unlink: Option<bool>,

    /// Server fields this client does not model explicitly.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl std::fmt::Display for OutcomeLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}) in {} ({})",
            self.outcome.title, self.outcome.id, self.outcome_group.title, self.outcome_group.id
        )
    }
}

impl OutcomeLink {
    /// The endpoint context this link belongs to.
    pub fn context(&self) -> Context {
        Context::from_fields(self.context_type.as_deref(), self.context_id)
    }

    /// Id of the group side of the association.
    pub fn group_id(&self) -> u64 {
        self.outcome_group.id
    }

    /// Id of the outcome side of the association.
    pub fn outcome_id(&self) -> u64 {
        self.outcome.id
    }

    /// List all outcome links in a context, regardless of group.
    pub fn in_context(client: &CanvasClient, context: Context) -> PageSequence<OutcomeLink> {
        PageSequence::new(client, format!("{}/outcome_group_links", context.prefix()))
    }

    /// Fetch the full (non-abbreviated) outcome behind this link.
    pub async fn get_outcome(&self, client: &CanvasClient) -> Result<Outcome> {
        Outcome::get(client, self.outcome.id).await
    }
}
