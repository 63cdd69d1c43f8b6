//! Product catalog route handlers.
//!
//! The catalog is a card grid. Detail and editor panels render over the
//! grid; editor POSTs answer with the refreshed grid.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    response::Html,
    routing::{get, post},
};
use tower_sessions::Session;
use tracing::instrument;
use true_harvest_core::Page;

use super::{Layout, render};
use crate::{
    collection::{ListLinks, ListQuery, Pager, RemoteCollection},
    components::{DataTableConfig, products_table_config},
    filters,
    forms::{FieldErrors, FormPairs, ProductDraft, product::RowEdit, with_submit_lock},
    middleware::RequireAdminAuth,
    models::{CurrentAdmin, Toast},
    resources::{
        ProductView, ProductsApi,
        products::{CATEGORIES, UNITS},
    },
    state::AppState,
};

/// Submit-lock key of the product editor.
const EDITOR: &str = "products";

/// Open product editor.
#[derive(Debug, Clone)]
pub struct ProductEditor {
    pub title: &'static str,
    pub submit_label: &'static str,
    /// Form action, carrying the list state.
    pub action: String,
    pub draft: ProductDraft,
    pub errors: FieldErrors,
}

impl ProductEditor {
    fn create(links: &ListLinks, draft: ProductDraft, errors: FieldErrors) -> Self {
        Self {
            title: "Add New Product",
            submit_label: "Add Product",
            action: links.at(""),
            draft,
            errors,
        }
    }

    fn edit(links: &ListLinks, id: &str, draft: ProductDraft, errors: FieldErrors) -> Self {
        Self {
            title: "Edit Product",
            submit_label: "Update Product",
            action: links.at(&format!("/{id}")),
            draft,
            errors,
        }
    }
}

/// Products page template.
#[derive(Template)]
#[template(path = "products/index.html")]
pub struct ProductsTemplate {
    pub layout: Layout,
    pub table: DataTableConfig,
    pub links: ListLinks,
    pub search: String,
    pub page: Page<ProductView>,
    pub pager: Pager,
    pub load_error: Option<String>,
    pub detail: Option<ProductView>,
    pub editor: Option<ProductEditor>,
    pub categories: &'static [(&'static str, &'static str)],
    pub units: &'static [&'static str],
}

/// Build the products router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(index).post(create))
        .route("/products/new", get(new_form))
        .route("/products/{id}", get(show).post(update))
        .route("/products/{id}/edit", get(edit_form))
        .route("/products/{id}/delete", post(delete))
}

fn api(state: &AppState, admin: &CurrentAdmin) -> ProductsApi {
    ProductsApi::new(state.client_for(admin), state.default_owner().to_string())
}

async fn page(
    session: &Session,
    admin: &CurrentAdmin,
    query: &ListQuery,
    collection: &RemoteCollection<ProductsApi>,
    detail: Option<ProductView>,
    editor: Option<ProductEditor>,
    toasts: Vec<Toast>,
) -> Html<String> {
    let table = products_table_config();
    let links = ListLinks::new("/products", "category", query);
    let page = collection.view(query).map(|p| ProductView::from(&p));

    render(&ProductsTemplate {
        layout: Layout::new(session, Some(admin), "/products", toasts).await,
        search: query.search().to_string(),
        pager: links.pager(&page),
        page,
        load_error: collection.error().map(str::to_string),
        table,
        links,
        detail,
        editor,
        categories: &CATEGORIES,
        units: &UNITS,
    })
}

fn not_found(id: &str) -> Toast {
    Toast::error("Product not found", format!("No product with id {id} is loaded."))
}

/// Product grid.
///
/// GET /products
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

/// Grid with the create editor open.
///
/// GET /products/new
#[instrument(skip(admin, state, session))]
pub async fn new_form(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ListQuery>,
) -> Html<String> {
    let collection = RemoteCollection::fetch(api(&state, &admin)).await;
    let links = ListLinks::new("/products", "category", &query);
    let editor = ProductEditor::create(
        &links,
        ProductDraft::new(state.default_owner()),
        FieldErrors::new(),
    );
    page(&session, &admin, &query, &collection, None, Some(editor), vec![]).await
}

/// Grid with the detail panel open.
///
/// GET /products/{id}
#[instrument(skip(admin, state, session))]
pub async fn show(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Query(query): Query<ListQuery>,
) -> Html<String> {
    let collection = RemoteCollection::fetch(api(&state, &admin)).await;
    let detail = collection.find(&id).map(ProductView::from);
    let toasts = if detail.is_none() { vec![not_found(&id)] } else { vec![] };
    page(&session, &admin, &query, &collection, detail, None, toasts).await
}

/// Grid with the edit editor open, seeded from the loaded record.
///
/// GET /products/{id}/edit
#[instrument(skip(admin, state, session))]
pub async fn edit_form(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Query(query): Query<ListQuery>,
) -> Html<String> {
    let collection = RemoteCollection::fetch(api(&state, &admin)).await;
    let links = ListLinks::new("/products", "category", &query);
    let (editor, toasts) = match collection.find(&id) {
        Some(product) => (
            Some(ProductEditor::edit(
                &links,
                &id,
                ProductDraft::from_record(product),
                FieldErrors::new(),
            )),
            vec![],
        ),
        None => (None, vec![not_found(&id)]),
    };
    page(&session, &admin, &query, &collection, None, editor, toasts).await
}

/// Create a product.
///
/// POST /products
#[instrument(skip(admin, state, session, form))]
pub async fn create(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ListQuery>,
    Form(form): Form<Vec<(String, String)>>,
) -> Html<String> {
    submit(&state, &admin, &session, &query, &FormPairs::from(form), None).await
}

/// Update a product.
///
/// POST /products/{id}
#[instrument(skip(admin, state, session, form))]
pub async fn update(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Query(query): Query<ListQuery>,
    Form(form): Form<Vec<(String, String)>>,
) -> Html<String> {
    submit(&state, &admin, &session, &query, &FormPairs::from(form), Some(id)).await
}

/// Shared create/update flow.
///
/// Row edits only re-render the editor. A save validates first; an invalid
/// draft is sent back with its field errors and no write is made.
async fn submit(
    state: &AppState,
    admin: &CurrentAdmin,
    session: &Session,
    query: &ListQuery,
    form: &FormPairs,
    target: Option<String>,
) -> Html<String> {
    let links = ListLinks::new("/products", "category", query);
    let mut collection = RemoteCollection::new(api(state, admin));
    let mut draft = ProductDraft::from_form(form, state.default_owner());

    let open = |draft: ProductDraft, errors: FieldErrors| match &target {
        Some(id) => ProductEditor::edit(&links, id, draft, errors),
        None => ProductEditor::create(&links, draft, errors),
    };

    if let Some(edit) = RowEdit::parse(form.first("intent")) {
        draft.apply(edit);
        collection.load().await;
        let editor = open(draft, FieldErrors::new());
        return page(session, admin, query, &collection, None, Some(editor), vec![]).await;
    }

    let errors = draft.validate();
    if !errors.is_empty() {
        tracing::debug!(fields = errors.len(), "Product draft rejected");
        collection.load().await;
        let editor = open(draft, errors);
        return page(session, admin, query, &collection, None, Some(editor), vec![]).await;
    }

    let payload = draft.to_payload();
    let label = draft.name.trim().to_string();
    let result = with_submit_lock(session, EDITOR, state.submit_lock_ttl(), async {
        match &target {
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
    let editor = open(draft, FieldErrors::new());
    page(session, admin, query, &collection, None, Some(editor), vec![toast]).await
}

/// Delete a product.
///
/// POST /products/{id}/delete
#[instrument(skip(admin, state, session, form))]
pub async fn delete(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Query(query): Query<ListQuery>,
    Form(form): Form<Vec<(String, String)>>,
) -> Html<String> {
    let form = FormPairs::from(form);
    let mut collection = RemoteCollection::new(api(&state, &admin));
    let label = form.first("name").to_string();

    let result = with_submit_lock(
        &session,
        EDITOR,
        state.submit_lock_ttl(),
        collection.delete(&id, &label),
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
