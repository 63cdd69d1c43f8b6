//! Tab-separated listings of the catalog, the plans and the customers.

use true_harvest_admin::resources::{Customer, CustomersApi, PlanRow, PlansApi, ProductView, ProductsApi};

use super::{CliError, Context, load};

/// Print the product catalog.
///
/// # Errors
///
/// Returns an error when the products cannot be loaded.
pub async fn products(ctx: &Context) -> Result<(), CliError> {
    let collection = load(ProductsApi::new(ctx.client.clone(), ctx.owner.clone()), "products").await?;
    println!("ID\tNAME\tCATEGORY\tFROM\tACTIVE");
    for product in collection.items().iter().map(ProductView::from) {
        println!("{}", product_line(&product));
    }
    Ok(())
}

/// Print the subscription plans.
///
/// # Errors
///
/// Returns an error when the plans cannot be loaded.
pub async fn subscriptions(ctx: &Context) -> Result<(), CliError> {
    let collection = load(PlansApi::new(ctx.client.clone(), ctx.owner.clone()), "plans").await?;
    println!("ID\tNAME\tPRODUCT\tDAYS\tPRICE\tOFFER\tSTATUS");
    for row in collection.items() {
        println!("{}", plan_line(row));
    }
    Ok(())
}

/// Print the customers with their order statistics.
///
/// # Errors
///
/// Returns an error when the users cannot be loaded.
pub async fn customers(ctx: &Context) -> Result<(), CliError> {
    let collection = load(CustomersApi::new(ctx.client.clone()), "customers").await?;
    println!("ID\tNAME\tPHONE\tCITY\tORDERS\tSPENT\tSTATUS");
    for customer in collection.items() {
        println!("{}", customer_line(customer));
    }
    Ok(())
}

fn product_line(product: &ProductView) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}",
        product.id,
        product.name,
        product.category,
        product.starting_price,
        if product.is_active { "yes" } else { "no" }
    )
}

fn plan_line(row: &PlanRow) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}",
        row.id(),
        row.plan.name,
        row.product_name,
        row.plan.duration_days,
        row.actual_price(),
        row.discounted_price(),
        row.status_label()
    )
}

fn customer_line(customer: &Customer) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}",
        customer.id,
        customer.name,
        customer.phone,
        customer.city,
        customer.stats.total_orders,
        customer.total_spent(),
        customer.status.as_str()
    )
}
