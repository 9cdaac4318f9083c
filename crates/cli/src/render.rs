//! Plain-text rendering of storefront state.

use std::io::{self, Write};

use techstore_core::Price;
use techstore_storefront::models::Session;
use techstore_storefront::services::auth::FieldErrors;
use techstore_storefront::state::AppState;

/// Product listing with the result summary.
pub fn products(out: &mut impl Write, state: &AppState) -> io::Result<()> {
    let snapshot = state.snapshot();

    writeln!(out, "{}", snapshot.summary)?;
    if snapshot.products.is_empty() {
        writeln!(out, "No products found")?;
        return writeln!(out, "Try `clear` to reset the search and brand filters");
    }

    for view in &snapshot.products {
        let product = view.product;
        write!(
            out,
            "{:>3}  {:<28} {:<10} {:>12}",
            product.id.get(),
            product.name,
            product.brand,
            view.display_price
        )?;
        if let Some(original) = &view.display_original_price {
            write!(out, "  was {original}")?;
        }
        if let Some(discount) = &product.discount {
            write!(out, "  {discount}")?;
        }
        write!(out, "  {} {:.1}", product.star_bar(), product.rating)?;
        if product.is_best_seller {
            write!(out, "  [Best Seller]")?;
        }
        if view.wishlisted {
            write!(out, "  ♥")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Cart lines, count and total.
pub fn cart(out: &mut impl Write, state: &AppState) -> io::Result<()> {
    let cart = state.cart();
    if cart.is_empty() {
        return writeln!(out, "Your cart is empty");
    }

    let currency = state.config().currency;
    for entry in cart.entries() {
        writeln!(
            out,
            "{:>3}  {:<28} {:>12} x {:<3} {:>12}",
            entry.product_id.get(),
            entry.name,
            Price::new(entry.price, currency).display(),
            entry.quantity,
            Price::new(entry.line_total(), currency).display()
        )?;
    }
    writeln!(
        out,
        "{} item(s), total {}",
        cart.count(),
        state.cart_total().display()
    )
}

/// Header greeting and profile details.
pub fn session(out: &mut impl Write, session: &Session) -> io::Result<()> {
    writeln!(out, "Hi, {}", session.first_name())?;
    writeln!(out, "  name:     {}", session.name)?;
    writeln!(out, "  username: {}", session.username)?;
    writeln!(out, "  email:    {}", session.email)?;
    writeln!(out, "  avatar:   {}", session.avatar)?;
    writeln!(
        out,
        "  joined:   {}",
        session.joined_date.format("%Y-%m-%d %H:%M UTC")
    )
}

/// One line per failing form field.
pub fn field_errors(out: &mut impl Write, errors: &FieldErrors) -> io::Result<()> {
    for (field, message) in errors.iter() {
        writeln!(out, "  {field}: {message}")?;
    }
    Ok(())
}
