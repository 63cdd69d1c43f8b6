//! Order export.

use std::path::{Path, PathBuf};

use true_harvest_admin::{
    collection::ListQuery,
    resources::{OrdersApi, export_filename, orders_csv},
};

use super::{CliError, Context, load};

/// Export orders matching `query` and `status` to `output`.
///
/// Returns the path written.
///
/// # Errors
///
/// Returns an error when the orders cannot be loaded, nothing matches, or
/// the file cannot be written.
pub async fn export(
    ctx: &Context,
    query: &str,
    status: Option<String>,
    output: Option<PathBuf>,
) -> Result<PathBuf, CliError> {
    let collection = load(OrdersApi::new(ctx.client.clone()), "orders").await?;
    let list_query = ListQuery {
        q: query.to_string(),
        selector: status,
        page: None,
    };
    let orders = collection.filter(&list_query);

    let csv = orders_csv(&orders).ok_or(CliError::NothingToExport)?;
    let path = output
        .unwrap_or_else(|| PathBuf::from(export_filename(chrono::Local::now().date_naive())));
    write_csv(&path, &csv)?;

    tracing::info!(rows = orders.len(), path = %path.display(), "Orders exported successfully");
    Ok(path)
}

fn write_csv(path: &Path, csv: &str) -> Result<(), CliError> {
    std::fs::write(path, csv).map_err(|source| CliError::Write {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_write_csv_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_csv(&path, "a,b\n1,2").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a,b\n1,2");
    }

    #[test]
    fn test_write_csv_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");
        let err = write_csv(&path, "x").unwrap_err();
        assert!(err.to_string().contains("out.csv"));
    }
}
