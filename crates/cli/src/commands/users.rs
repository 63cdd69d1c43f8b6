//! User account commands.

use true_harvest_core::MobileNumber;

use super::{CliError, Context};

/// Delete the user registered to `mobile`.
///
/// The input is sanitized the way the deletion page does it: digits only,
/// at most ten.
///
/// # Errors
///
/// Returns an error for a malformed number or when the API refuses.
pub async fn delete(ctx: &Context, mobile: &str) -> Result<(), CliError> {
    let sanitized = MobileNumber::sanitize_input(mobile);
    let mobile = MobileNumber::parse(&sanitized)
        .map_err(|e| CliError::InvalidMobile(format!("{mobile}: {e}")))?;

    ctx.client.delete_user(mobile.as_str()).await?;
    tracing::info!("Successfully deleted account for +91 {mobile}");
    Ok(())
}
