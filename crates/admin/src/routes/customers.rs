//! Customer management route handlers.
//!
//! Customers can be created and edited but not deleted from this screen.
//! Opening the editor re-fetches the user so the form starts from the
//! server's current copy rather than the list snapshot.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    response::Html,
    routing::get,
};
use tower_sessions::Session;
use tracing::instrument;
use true_harvest_core::Page;

use super::{Layout, render};
use crate::{
    collection::{ListLinks, ListQuery, Pager, RemoteCollection},
    components::{DataTableConfig, customers_table_config},
    filters,
    forms::{
        CustomerDraft, FieldErrors, with_submit_lock,
        customer::{GENDERS, ROLES},
    },
    middleware::RequireAdminAuth,
    models::{CurrentAdmin, Toast},
    resources::{Customer, CustomerSummary, CustomersApi},
    state::AppState,
};

/// Submit-lock key of the customer editor.
const EDITOR: &str = "customers";

/// Open customer editor.
#[derive(Debug, Clone)]
pub struct CustomerEditor {
    pub title: &'static str,
    pub submit_label: &'static str,
    pub action: String,
    pub draft: CustomerDraft,
    pub errors: FieldErrors,
}

impl CustomerEditor {
    fn open(links: &ListLinks, id: Option<&str>, draft: CustomerDraft, errors: FieldErrors) -> Self {
        match id {
            Some(id) => Self {
                title: "Edit Customer",
                submit_label: "Update Customer",
                action: links.at(&format!("/{id}")),
                draft,
                errors,
            },
            None => Self {
                title: "Add New Customer",
                submit_label: "Add Customer",
                action: links.at(""),
                draft,
                errors,
            },
        }
    }
}

/// Customers page template.
#[derive(Template)]
#[template(path = "customers/index.html")]
pub struct CustomersTemplate {
    pub layout: Layout,
    pub table: DataTableConfig,
    pub links: ListLinks,
    pub search: String,
    pub summary: CustomerSummary,
    pub page: Page<Customer>,
    pub pager: Pager,
    pub load_error: Option<String>,
    pub detail: Option<Customer>,
    pub editor: Option<CustomerEditor>,
    pub genders: &'static [&'static str],
    pub roles: &'static [(&'static str, &'static str)],
}

/// Build the customers router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/customers", get(index).post(create))
        .route("/customers/new", get(new_form))
        .route("/customers/{id}", get(show).post(update))
        .route("/customers/{id}/edit", get(edit_form))
}

fn api(state: &AppState, admin: &CurrentAdmin) -> CustomersApi {
    CustomersApi::new(state.client_for(admin))
}

fn links(query: &ListQuery) -> ListLinks {
    ListLinks::new("/customers", "status", query)
}

async fn page(
    session: &Session,
    admin: &CurrentAdmin,
    query: &ListQuery,
    collection: &RemoteCollection<CustomersApi>,
    detail: Option<Customer>,
    editor: Option<CustomerEditor>,
    toasts: Vec<Toast>,
) -> Html<String> {
    let links = links(query);
    let page = collection.view(query);
    render(&CustomersTemplate {
        layout: Layout::new(session, Some(admin), "/customers", toasts).await,
        table: customers_table_config(),
        pager: links.pager(&page),
        links,
        search: query.search().to_string(),
        summary: CustomerSummary::from_customers(collection.items()),
        page,
        load_error: collection.error().map(str::to_string),
        detail,
        editor,
        genders: &GENDERS,
        roles: &ROLES,
    })
}

fn not_found(id: &str) -> Toast {
    Toast::error("Customer not found", format!("No customer with id {id} is loaded."))
}

/// Customer table.
///
/// GET /customers
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

/// Table with the create editor open.
///
/// GET /customers/new
#[instrument(skip(admin, state, session))]
pub async fn new_form(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ListQuery>,
) -> Html<String> {
    let collection = RemoteCollection::fetch(api(&state, &admin)).await;
    let editor = CustomerEditor::open(
        &links(&query),
        None,
        CustomerDraft::default(),
        FieldErrors::new(),
    );
    page(&session, &admin, &query, &collection, None, Some(editor), vec![]).await
}

/// Table with a customer's detail panel open.
///
/// GET /customers/{id}
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
    let toasts = if detail.is_none() { vec![not_found(&id)] } else { vec![] };
    page(&session, &admin, &query, &collection, detail, None, toasts).await
}

/// Table with the edit editor open.
///
/// The user is fetched again by mobile number; if that fails the editor
/// stays closed and an error toast explains why.
///
/// GET /customers/{id}/edit
#[instrument(skip(admin, state, session))]
pub async fn edit_form(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Query(query): Query<ListQuery>,
) -> Html<String> {
    let collection = RemoteCollection::fetch(api(&state, &admin)).await;
    let Some(customer) = collection.find(&id) else {
        return page(&session, &admin, &query, &collection, None, None, vec![not_found(&id)]).await;
    };

    let (editor, toasts) = match collection.api().details(&customer.phone).await {
        Ok(user) => {
            let draft = CustomerDraft::from_record(&user, &customer.phone);
            let editor = CustomerEditor::open(&links(&query), Some(&id), draft, FieldErrors::new());
            (Some(editor), vec![])
        }
        Err(e) => {
            tracing::warn!(error = %e, "Customer details unavailable");
            (
                None,
                vec![Toast::error("Error fetching latest user details", e.to_string())],
            )
        }
    };
    page(&session, &admin, &query, &collection, None, editor, toasts).await
}

/// Create a customer.
///
/// POST /customers
#[instrument(skip(admin, state, session, draft))]
pub async fn create(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ListQuery>,
    Form(draft): Form<CustomerDraft>,
) -> Html<String> {
    submit(&state, &admin, &session, &query, draft, None).await
}

/// Update a customer, addressed by the mobile number it was loaded under.
///
/// POST /customers/{id}
#[instrument(skip(admin, state, session, draft))]
pub async fn update(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Query(query): Query<ListQuery>,
    Form(draft): Form<CustomerDraft>,
) -> Html<String> {
    submit(&state, &admin, &session, &query, draft, Some(id)).await
}

async fn submit(
    state: &AppState,
    admin: &CurrentAdmin,
    session: &Session,
    query: &ListQuery,
    draft: CustomerDraft,
    id: Option<String>,
) -> Html<String> {
    let links = links(query);
    let mut collection = RemoteCollection::new(api(state, admin));

    let errors = draft.validate();
    if !errors.is_empty() {
        tracing::debug!(fields = errors.len(), "Customer draft rejected");
        collection.load().await;
        let editor = CustomerEditor::open(&links, id.as_deref(), draft, errors);
        return page(session, admin, query, &collection, None, Some(editor), vec![]).await;
    }

    let payload = draft.to_payload();
    let label = if draft.name.trim().is_empty() {
        draft.mobile.clone()
    } else {
        draft.name.trim().to_string()
    };
    let result = with_submit_lock(session, EDITOR, state.submit_lock_ttl(), async {
        if id.is_some() {
            collection.update(draft.target(), &payload, &label).await
        } else {
            collection.create(&payload, &label).await
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
    let editor = CustomerEditor::open(&links, id.as_deref(), draft, FieldErrors::new());
    page(session, admin, query, &collection, None, Some(editor), vec![toast]).await
}
