//! Generic remote collection.
//!
//! Every list screen follows the same shape: fetch the whole collection from
//! the API, hold it in memory, derive a filtered and paginated view from the
//! request's query, and run mutations that refetch the collection once they
//! succeed. [`RemoteCollection`] owns that shape; each resource plugs in a
//! [`ResourceSource`] (and a [`ResourceWriter`] when it is editable) plus a
//! [`Searchable`] record type.
//!
//! Mutations never return errors to the caller. Success and failure both come
//! back as a [`MutationOutcome`] carrying the toast to show.

mod query;

pub use query::{ListLinks, ListQuery, Pager, PagerLink};

use async_trait::async_trait;
use tracing::instrument;
use true_harvest_core::{DEFAULT_PAGE_SIZE, Page};

use crate::gateway::GatewayError;
use crate::models::Toast;

/// A record that can be matched against a list query.
pub trait Searchable {
    /// Identifier used in routes (`/products/{id}`).
    fn record_id(&self) -> &str;

    /// Whether the record matches non-empty search text.
    fn matches_search(&self, needle: &str) -> bool;

    /// Whether the record matches a selector value other than "All".
    fn matches_selector(&self, selector: &str) -> bool;
}

/// Case-insensitive substring test.
#[must_use]
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Read side of a remote resource.
#[async_trait]
pub trait ResourceSource: Send + Sync {
    /// Display record held by the collection.
    type Record: Searchable + Clone + Send + Sync;

    /// Fetch the full collection.
    async fn fetch_all(&self) -> Result<Vec<Self::Record>, GatewayError>;
}

/// Which mutation produced an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Create,
    Update,
    Delete,
}

/// Write side of a remote resource.
#[async_trait]
pub trait ResourceWriter: ResourceSource {
    /// Request body for create and update.
    type Payload: Send + Sync;

    async fn create(&self, payload: &Self::Payload) -> Result<(), GatewayError>;

    async fn update(&self, id: &str, payload: &Self::Payload) -> Result<(), GatewayError>;

    /// Delete by id. Resources without a delete endpoint keep the default.
    async fn delete(&self, id: &str) -> Result<(), GatewayError> {
        Err(GatewayError::Api {
            status: 405,
            message: format!("Deleting {id} is not supported here"),
        })
    }

    /// Toast for a successful mutation. `label` names the affected record.
    fn success_toast(&self, mutation: Mutation, label: &str) -> Toast;

    /// Toast for a failed mutation.
    fn failure_toast(&self, mutation: Mutation, error: &GatewayError) -> Toast;
}

/// Result of a create, update or delete.
#[derive(Debug, Clone)]
pub struct MutationOutcome {
    pub toast: Toast,
    pub succeeded: bool,
}

/// In-memory copy of a remote collection.
pub struct RemoteCollection<A: ResourceSource> {
    api: A,
    items: Vec<A::Record>,
    error: Option<String>,
}

impl<A: ResourceSource> RemoteCollection<A> {
    /// An empty, not yet loaded collection.
    pub const fn new(api: A) -> Self {
        Self {
            api,
            items: Vec::new(),
            error: None,
        }
    }

    /// Create and load in one step.
    pub async fn fetch(api: A) -> Self {
        let mut collection = Self::new(api);
        collection.load().await;
        collection
    }

    /// Replace the held list with a fresh fetch.
    ///
    /// On failure the list is emptied and the error message kept for the
    /// page to show. There is no retry.
    #[instrument(skip(self))]
    pub async fn load(&mut self) {
        match self.api.fetch_all().await {
            Ok(items) => {
                tracing::debug!(count = items.len(), "Collection loaded");
                self.items = items;
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Collection load failed");
                self.items.clear();
                self.error = Some(e.to_string());
            }
        }
    }

    /// The underlying resource API.
    pub const fn api(&self) -> &A {
        &self.api
    }

    /// Every loaded record.
    pub fn items(&self) -> &[A::Record] {
        &self.items
    }

    /// Message of the last failed load.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Look up a loaded record by id.
    pub fn find(&self, id: &str) -> Option<&A::Record> {
        self.items.iter().find(|r| r.record_id() == id)
    }

    /// Records matching the search text and selector, in load order.
    pub fn filter(&self, query: &ListQuery) -> Vec<A::Record> {
        let search = query.search();
        let selector = query.selector();

        self.items
            .iter()
            .filter(|r| search.is_empty() || r.matches_search(search))
            .filter(|r| selector.is_none_or(|s| r.matches_selector(s)))
            .cloned()
            .collect()
    }

    /// Filter, then paginate with the default page size.
    pub fn view(&self, query: &ListQuery) -> Page<A::Record> {
        Page::paginate(&self.filter(query), query.page(), DEFAULT_PAGE_SIZE)
    }
}

impl<A: ResourceWriter> RemoteCollection<A> {
    /// Create a record, reloading once on success.
    pub async fn create(&mut self, payload: &A::Payload, label: &str) -> MutationOutcome {
        let result = self.api.create(payload).await;
        self.finish(Mutation::Create, label, result).await
    }

    /// Update a record, reloading once on success.
    pub async fn update(&mut self, id: &str, payload: &A::Payload, label: &str) -> MutationOutcome {
        let result = self.api.update(id, payload).await;
        self.finish(Mutation::Update, label, result).await
    }

    /// Delete a record, reloading once on success.
    pub async fn delete(&mut self, id: &str, label: &str) -> MutationOutcome {
        let result = self.api.delete(id).await;
        self.finish(Mutation::Delete, label, result).await
    }

    async fn finish(
        &mut self,
        mutation: Mutation,
        label: &str,
        result: Result<(), GatewayError>,
    ) -> MutationOutcome {
        match result {
            Ok(()) => {
                tracing::info!(?mutation, label, "Mutation succeeded");
                self.load().await;
                MutationOutcome {
                    toast: self.api.success_toast(mutation, label),
                    succeeded: true,
                }
            }
            Err(e) => {
                tracing::warn!(?mutation, label, error = %e, "Mutation failed");
                MutationOutcome {
                    toast: self.api.failure_toast(mutation, &e),
                    succeeded: false,
                }
            }
        }
    }
}
