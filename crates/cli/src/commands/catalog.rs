//! Catalog listing commands.

use std::io::Write;

use techstore_core::SortMode;
use techstore_storefront::state::AppState;

use super::CommandError;
use crate::render;

/// List products matching the given filters.
///
/// # Errors
///
/// Returns an error if the brand is unknown or output fails.
pub fn products(
    state: &mut AppState,
    out: &mut impl Write,
    search: &str,
    brand: &str,
    sort: SortMode,
    json: bool,
) -> Result<(), CommandError> {
    state.set_search(search);
    state.select_brand(brand)?;
    state.set_sort(sort);

    if json {
        serde_json::to_writer_pretty(&mut *out, &state.snapshot().products)?;
        writeln!(out)?;
    } else {
        render::products(out, state)?;
    }
    Ok(())
}

/// List brands in first-seen catalog order.
///
/// # Errors
///
/// Returns an error if output fails.
pub fn brands(state: &AppState, out: &mut impl Write) -> Result<(), CommandError> {
    for brand in state.catalog().brands() {
        writeln!(out, "{brand}")?;
    }
    Ok(())
}
