//! Subscription plan route handlers.
//!
//! Plans show as a grid without pagination. A failed load replaces the grid
//! with an error panel offering a retry link.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    response::Html,
    routing::{get, post},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::{Layout, render};
use crate::{
    collection::{ListLinks, ListQuery, RemoteCollection},
    components::{DataTableConfig, plans_table_config},
    filters,
    forms::{FieldErrors, PlanDraft, with_submit_lock},
    middleware::RequireAdminAuth,
    models::{CurrentAdmin, Toast},
    resources::{PlanRow, PlansApi, ProductOption},
    state::AppState,
};

/// Submit-lock key of the plan editor.
const EDITOR: &str = "subscriptions";

/// Open plan editor.
#[derive(Debug, Clone)]
pub struct PlanEditor {
    pub title: &'static str,
    pub submit_label: &'static str,
    pub action: String,
    pub draft: PlanDraft,
    pub errors: FieldErrors,
}

impl PlanEditor {
    fn open(links: &ListLinks, id: Option<&str>, draft: PlanDraft, errors: FieldErrors) -> Self {
        match id {
            Some(id) => Self {
                title: "Edit Subscription Plan",
                submit_label: "Update Plan",
                action: links.at(&format!("/{id}")),
                draft,
                errors,
            },
            None => Self {
                title: "Create Subscription Plan",
                submit_label: "Create Plan",
                action: links.at(""),
                draft,
                errors,
            },
        }
    }
}

/// Subscriptions page template.
#[derive(Template)]
#[template(path = "subscriptions/index.html")]
pub struct SubscriptionsTemplate {
    pub layout: Layout,
    pub table: DataTableConfig,
    pub links: ListLinks,
    pub search: String,
    pub plans: Vec<PlanRow>,
    pub load_error: Option<String>,
    pub detail: Option<PlanRow>,
    pub editor: Option<PlanEditor>,
    /// Products a plan can be linked to.
    pub products: Vec<ProductOption>,
}

/// Delete form input.
#[derive(Debug, Deserialize)]
pub struct DeletePlanForm {
    #[serde(default)]
    pub name: String,
    /// Owner of the plan; blank falls back to the default owner.
    #[serde(default)]
    pub userid: Option<String>,
}

/// Build the subscriptions router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/subscriptions", get(index).post(create))
        .route("/subscriptions/new", get(new_form))
        .route("/subscriptions/{id}", get(show).post(update))
        .route("/subscriptions/{id}/edit", get(edit_form))
        .route("/subscriptions/{id}/delete", post(delete))
}

fn api(state: &AppState, admin: &CurrentAdmin) -> PlansApi {
    PlansApi::new(state.client_for(admin), state.default_owner().to_string())
}

fn links(query: &ListQuery) -> ListLinks {
    ListLinks::new("/subscriptions", "status", query)
}

async fn page(
    session: &Session,
    admin: &CurrentAdmin,
    query: &ListQuery,
    collection: &RemoteCollection<PlansApi>,
    detail: Option<PlanRow>,
    editor: Option<PlanEditor>,
    toasts: Vec<Toast>,
) -> Html<String> {
    render(&SubscriptionsTemplate {
        layout: Layout::new(session, Some(admin), "/subscriptions", toasts).await,
        table: plans_table_config(),
        links: links(query),
        search: query.search().to_string(),
        plans: collection.filter(query),
        load_error: collection.error().map(str::to_string),
        detail,
        editor,
        products: collection.api().catalog(),
    })
}

fn not_found(id: &str) -> Toast {
    Toast::error("Plan not found", format!("No subscription plan with id {id} is loaded."))
}

/// Plan grid.
///
/// GET /subscriptions
#[instrument(skip(admin, state, session))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ListQuery>,
) -> Html<String> {
    let collection = RemoteCollection::fetch(api(&state, &admin)).await;
    page(&session, &admin, &query, &collection, None, None, vec![]).await
}

/// Grid with the create editor open, linked to the first product.
///
/// GET /subscriptions/new
#[instrument(skip(admin, state, session))]
pub async fn new_form(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ListQuery>,
) -> Html<String> {
    let collection = RemoteCollection::fetch(api(&state, &admin)).await;
    let catalog = collection.api().catalog();
    let draft = PlanDraft::new(catalog.first().map(|p| p.id.as_str()));
    let editor = PlanEditor::open(&links(&query), None, draft, FieldErrors::new());
    page(&session, &admin, &query, &collection, None, Some(editor), vec![]).await
}

/// Grid with a plan's detail panel open.
///
/// GET /subscriptions/{id}
#[instrument(skip(admin, state, session))]
pub async fn show(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Query(query): Query<ListQuery>,
) -> Html<String> {
    let collection = RemoteCollection::fetch(api(&state, &admin)).await;
    let detail = collection.find(&id).cloned();
    let toasts = if detail.is_none() && collection.error().is_none() {
        vec![not_found(&id)]
    } else {
        vec![]
    };
    page(&session, &admin, &query, &collection, detail, None, toasts).await
}

/// Grid with the edit editor open.
///
/// GET /subscriptions/{id}/edit
#[instrument(skip(admin, state, session))]
pub async fn edit_form(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Query(query): Query<ListQuery>,
) -> Html<String> {
    let collection = RemoteCollection::fetch(api(&state, &admin)).await;
    let (editor, toasts) = match collection.find(&id) {
        Some(row) => {
            let draft = PlanDraft::from_record(&row.plan);
            (
                Some(PlanEditor::open(&links(&query), Some(&id), draft, FieldErrors::new())),
                vec![],
            )
        }
        None => (None, vec![not_found(&id)]),
    };
    page(&session, &admin, &query, &collection, None, editor, toasts).await
}

/// Create a plan.
///
/// POST /subscriptions
#[instrument(skip(admin, state, session, draft))]
pub async fn create(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ListQuery>,
    Form(draft): Form<PlanDraft>,
) -> Html<String> {
    submit(&state, &admin, &session, &query, draft, None).await
}

/// Update a plan.
///
/// POST /subscriptions/{id}
#[instrument(skip(admin, state, session, draft))]
pub async fn update(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Query(query): Query<ListQuery>,
    Form(draft): Form<PlanDraft>,
) -> Html<String> {
    submit(&state, &admin, &session, &query, draft, Some(id)).await
}

/// Shared create/update flow.
///
/// The linked prices are derived again from the last-edited field, so a
/// form posted without the page script still saves consistent numbers.
async fn submit(
    state: &AppState,
    admin: &CurrentAdmin,
    session: &Session,
    query: &ListQuery,
    mut draft: PlanDraft,
    id: Option<String>,
) -> Html<String> {
    let links = links(query);
    let mut collection = RemoteCollection::new(api(state, admin));
    draft.derive_prices();

    let errors = draft.validate();
    if !errors.is_empty() {
        tracing::debug!(fields = errors.len(), "Plan draft rejected");
        collection.load().await;
        let editor = PlanEditor::open(&links, id.as_deref(), draft, errors);
        return page(session, admin, query, &collection, None, Some(editor), vec![]).await;
    }

    let payload = draft.to_payload(state.default_owner());
    let label = draft.name.trim().to_string();
    let result = with_submit_lock(session, EDITOR, state.submit_lock_ttl(), async {
        match &id {
            Some(id) => collection.update(id, &payload, &label).await,
            None => collection.create(&payload, &label).await,
        }
    })
    .await;

    let toast = match result {
        Ok(outcome) if outcome.succeeded => {
            return page(session, admin, query, &collection, None, None, vec![outcome.toast]).await;
        }
        Ok(outcome) => outcome.toast,
        Err(locked) => locked.toast(),
    };

    collection.load().await;
    let editor = PlanEditor::open(&links, id.as_deref(), draft, FieldErrors::new());
    page(session, admin, query, &collection, None, Some(editor), vec![toast]).await
}

/// Delete a plan under its own owner.
///
/// POST /subscriptions/{id}/delete
#[instrument(skip(admin, state, session, form))]
pub async fn delete(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Query(query): Query<ListQuery>,
    Form(form): Form<DeletePlanForm>,
) -> Html<String> {
    let mut collection = RemoteCollection::new(api(&state, &admin).with_owner(form.userid));

    let result = with_submit_lock(
        &session,
        EDITOR,
        state.submit_lock_ttl(),
        collection.delete(&id, &form.name),
    )
    .await;
    let toast = match result {
        Ok(outcome) if outcome.succeeded => outcome.toast,
        Ok(outcome) => {
            collection.load().await;
            outcome.toast
        }
        Err(locked) => {
            collection.load().await;
            locked.toast()
        }
    };
    page(&session, &admin, &query, &collection, None, None, vec![toast]).await
}
