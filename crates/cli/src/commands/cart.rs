//! Cart commands.
//!
//! Each command runs one store operation against the configured cart and
//! prints the resulting cart.

use std::fmt::Write as _;

use gomarket_cart::{CartError, CartStore, codec};
use gomarket_core::{CartSnapshot, NewLineItem, ProductId};
use thiserror::Error;

/// Errors that can occur while running a cart command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The cart operation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// The cart could not be rendered as JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Print the cart, as a table or as the persisted JSON record.
///
/// # Errors
///
/// Returns `CommandError::Json` if JSON rendering fails.
pub fn show(store: &CartStore, json: bool) -> Result<(), CommandError> {
    let snapshot = store.snapshot();
    let output = if json {
        String::from_utf8_lossy(&codec::encode(&snapshot)?).into_owned()
    } else {
        render_table(&snapshot)
    };
    emit(&output);
    Ok(())
}

/// Add a product and print the cart.
///
/// # Errors
///
/// Returns `CommandError::Cart` if the cart cannot be saved.
pub async fn add(store: &CartStore, product: NewLineItem) -> Result<(), CommandError> {
    tracing::info!(id = %product.id, "Adding product to cart");
    store.add_to_cart(product).await?;
    emit(&render_table(&store.snapshot()));
    Ok(())
}

/// Increment a line item and print the cart.
///
/// # Errors
///
/// Returns `CommandError::Cart` if the cart cannot be saved.
pub async fn increment(store: &CartStore, id: &ProductId) -> Result<(), CommandError> {
    warn_if_missing(store, id);
    store.increment(id).await?;
    emit(&render_table(&store.snapshot()));
    Ok(())
}

/// Decrement a line item and print the cart.
///
/// # Errors
///
/// Returns `CommandError::Cart` if the cart cannot be saved.
pub async fn decrement(store: &CartStore, id: &ProductId) -> Result<(), CommandError> {
    warn_if_missing(store, id);
    store.decrement(id).await?;
    emit(&render_table(&store.snapshot()));
    Ok(())
}

fn warn_if_missing(store: &CartStore, id: &ProductId) {
    if store.snapshot().get(id).is_none() {
        tracing::warn!(%id, "Product is not in the cart");
    }
}

#[allow(clippy::print_stdout)]
fn emit(output: &str) {
    println!("{output}");
}

/// Render the cart as a plain-text table.
fn render_table(snapshot: &CartSnapshot) -> String {
    if snapshot.is_empty() {
        return "Cart is empty".to_string();
    }

    let id_width = snapshot
        .iter()
        .map(|item| item.id.as_str().len())
        .max()
        .unwrap_or(0)
        .max("ID".len());
    let title_width = snapshot
        .iter()
        .map(|item| item.title.len())
        .max()
        .unwrap_or(0)
        .max("TITLE".len());

    let mut out = format!("{:<id_width$}  {:<title_width$}  {:>10}  {:>4}\n", "ID", "TITLE", "PRICE", "QTY");
    for item in snapshot {
        let _ = writeln!(
            out,
            "{:<id_width$}  {:<title_width$}  {:>10}  {:>4}",
            item.id, item.title, item.price, item.quantity
        );
    }
    let _ = write!(
        out,
        "{} item(s), {} unit(s)",
        snapshot.len(),
        snapshot.total_quantity()
    );
    out
}
