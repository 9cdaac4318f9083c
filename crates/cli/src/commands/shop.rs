//! Interactive storefront shell.
//!
//! Reads one command per line. The cart, wishlist and filters live for the
//! length of the shell; a non-remembered sign-in ends with it too.

use std::io::{BufRead, Write};

use techstore_core::{AuthMode, ProductId, SortMode};
use techstore_storefront::services::auth::FormField;
use techstore_storefront::state::AppState;

use super::{CommandError, ask, confirm, session};
use crate::render;

const HELP: &str = "\
Commands:
  list                  show products for the current filters
  search <text>         filter by name
  brand <name|All>      filter by brand
  brands                list brands
  sort <mode>           default, price-low, price-high, rating
  clear                 reset search and brand
  add <id>              add one to the cart
  remove <id>           remove from the cart
  qty <id> <n>          set quantity (0 removes)
  cart                  show the cart
  wish <id>             toggle wishlist
  wishlist              show the wishlist
  login | signup        sign in
  whoami | logout
  theme                 toggle dark mode
  json                  dump the full state
  quit";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Help,
    List,
    Search(String),
    Brand(String),
    Brands,
    Sort(SortMode),
    Clear,
    Add(ProductId),
    Remove(ProductId),
    Quantity(ProductId, i64),
    Cart,
    Wish(ProductId),
    Wishlist,
    Login,
    Signup,
    Whoami,
    Logout,
    Theme,
    Json,
    Quit,
}

impl Command {
    /// Parse one input line; blank lines yield `None`.
    fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        let command = match word {
            "" => return Ok(None),
            "help" | "?" => Self::Help,
            "list" | "ls" => Self::List,
            "search" => Self::Search(rest.to_string()),
            "brand" => Self::Brand(rest.to_string()),
            "brands" => Self::Brands,
            "sort" => Self::Sort(rest.parse()?),
            "clear" => Self::Clear,
            "add" => Self::Add(product_id(rest)?),
            "remove" | "rm" => Self::Remove(product_id(rest)?),
            "qty" => {
                let (id, quantity) = rest
                    .split_once(' ')
                    .ok_or_else(|| "usage: qty <id> <n>".to_string())?;
                let quantity = quantity
                    .trim()
                    .parse()
                    .map_err(|_| format!("not a quantity: {quantity}"))?;
                Self::Quantity(product_id(id)?, quantity)
            }
            "cart" => Self::Cart,
            "wish" => Self::Wish(product_id(rest)?),
            "wishlist" => Self::Wishlist,
            "login" => Self::Login,
            "signup" => Self::Signup,
            "whoami" => Self::Whoami,
            "logout" => Self::Logout,
            "theme" => Self::Theme,
            "json" => Self::Json,
            "quit" | "exit" => Self::Quit,
            other => return Err(format!("unknown command: {other} (try `help`)")),
        };
        Ok(Some(command))
    }
}

fn product_id(arg: &str) -> Result<ProductId, String> {
    arg.parse().map_err(|_| format!("not a product id: {arg:?}"))
}

/// Run the shell until `quit` or end of input.
///
/// # Errors
///
/// Returns an error on I/O failure or a storage error. Input mistakes are
/// reported and the shell keeps going.
pub async fn run(
    state: &mut AppState,
    mut input: impl BufRead,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    writeln!(out, "TechStore shell. Type `help` for commands.")?;
    if let Some(session) = state.session() {
        writeln!(out, "Welcome back, {}", session.first_name())?;
    }

    let mut line = String::new();
    loop {
        let who = state.session().map_or("guest", |s| s.first_name());
        write!(out, "{who} [cart {}]> ", state.cart().count())?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                writeln!(out, "{message}")?;
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }

        match execute(state, &mut input, out, command).await {
            Ok(()) => {}
            Err(CommandError::App(e)) if e.is_user_error() => writeln!(out, "{e}")?,
            Err(e) => return Err(e),
        }
    }

    tracing::debug!(cart = state.cart().count(), "Shell closed");
    Ok(())
}

async fn execute(
    state: &mut AppState,
    input: &mut impl BufRead,
    out: &mut impl Write,
    command: Command,
) -> Result<(), CommandError> {
    match command {
        Command::Help => writeln!(out, "{HELP}")?,
        Command::List => render::products(out, state)?,
        Command::Search(text) => {
            state.set_search(text);
            render::products(out, state)?;
        }
        Command::Brand(brand) => {
            state.select_brand(&brand)?;
            render::products(out, state)?;
        }
        Command::Brands => super::catalog::brands(state, out)?,
        Command::Sort(mode) => {
            state.set_sort(mode);
            render::products(out, state)?;
        }
        Command::Clear => {
            state.clear_filters();
            render::products(out, state)?;
        }
        Command::Add(id) => {
            state.add_to_cart(id)?;
            writeln!(out, "Added. Cart has {} item(s)", state.cart().count())?;
        }
        Command::Remove(id) => {
            state.remove_from_cart(id);
            render::cart(out, state)?;
        }
        Command::Quantity(id, quantity) => {
            state.update_quantity(id, quantity);
            render::cart(out, state)?;
        }
        Command::Cart => render::cart(out, state)?,
        Command::Wish(id) => {
            let message = if state.toggle_wishlist(id)? {
                "Added to wishlist"
            } else {
                "Removed from wishlist"
            };
            writeln!(out, "{message}")?;
        }
        Command::Wishlist => {
            let ids = state.wishlist().ids();
            if ids.is_empty() {
                writeln!(out, "Your wishlist is empty")?;
            }
            for &id in ids {
                if let Some(product) = state.catalog().get(id) {
                    writeln!(out, "{:>3}  {}", id.get(), product.name)?;
                }
            }
        }
        Command::Login => {
            state.set_auth_mode(AuthMode::Login);
            let identifier = ask(input, out, "Username or email")?;
            let password = ask(input, out, "Password")?;
            let remember = confirm(input, out, "Remember me?")?;

            let form = state.auth_form_mut();
            form.set_field(FormField::Username, identifier);
            form.set_field(FormField::Password, password);
            form.set_remember_me(remember);
            session::submit(state, out).await?;
        }
        Command::Signup => {
            state.set_auth_mode(AuthMode::Signup);
            let mut values = Vec::with_capacity(FormField::ALL.len());
            for field in FormField::ALL {
                values.push((field, ask(input, out, field.as_str())?));
            }
            let remember = confirm(input, out, "Remember me?")?;

            let form = state.auth_form_mut();
            for (field, value) in values {
                form.set_field(field, value);
            }
            form.set_remember_me(remember);
            session::submit(state, out).await?;
        }
        Command::Whoami => session::whoami(state, out)?,
        Command::Logout => session::logout(state, out)?,
        Command::Theme => {
            state.toggle_theme();
            writeln!(out, "Theme: {:?}", state.theme())?;
        }
        Command::Json => {
            serde_json::to_writer_pretty(&mut *out, &state.snapshot())?;
            writeln!(out)?;
        }
        Command::Quit => {}
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use techstore_storefront::catalog::Catalog;
    use techstore_storefront::config::StorefrontConfig;
    use techstore_storefront::store::Storage;

    use super::*;

    /// Signed-out state over the built-in catalog and in-memory storage.
    pub fn state() -> AppState {
        let config = StorefrontConfig::from_lookup(|_| None).unwrap();
        AppState::new(config, Catalog::builtin().unwrap(), Storage::in_memory())
    }

    async fn script(state: &mut AppState, lines: &str) -> String {
        let mut out = Vec::new();
        run(state, lines.as_bytes(), &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse() {
        assert_eq!(Command::parse("  \n"), Ok(None));
        assert_eq!(
            Command::parse("qty 3 2\n"),
            Ok(Some(Command::Quantity(ProductId::new(3), 2)))
        );
        assert_eq!(
            Command::parse("sort price-high"),
            Ok(Some(Command::Sort(SortMode::PriceDescending)))
        );
        assert_eq!(
            Command::parse("search galaxy s24"),
            Ok(Some(Command::Search("galaxy s24".to_string())))
        );
        assert!(Command::parse("add phone").is_err());
        assert!(Command::parse("checkout").is_err());
    }

    #[tokio::test]
    async fn test_cart_session() {
        let mut state = state();
        let text = script(&mut state, "add 1\nadd 1\nadd 3\nqty 1 0\ncart\nquit\n").await;

        assert!(text.contains("Added. Cart has 2 item(s)"));
        assert!(text.contains("1 item(s), total ₹29,990"));
        assert_eq!(state.cart().count(), 1);
    }

    #[tokio::test]
    async fn test_input_mistakes_keep_shell_running() {
        let mut state = state();
        let text = script(&mut state, "add 99\nbrand Nokia\nfly\nwish 2\n").await;

        assert!(text.contains("Unknown product: 99"));
        assert!(text.contains("Unknown brand: Nokia"));
        assert!(text.contains("unknown command: fly"));
        assert!(text.contains("Added to wishlist"));
        assert!(state.is_wishlisted(ProductId::new(2)));
    }

    #[tokio::test]
    async fn test_filters() {
        let mut state = state();
        let text = script(&mut state, "search zzz\nclear\n").await;

        assert!(text.contains("Showing 0 of 10 products for \"zzz\"\nNo products found"));
        assert!(text.contains("Showing 10 of 10 products"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_prompts() {
        let mut state = state();
        let text = script(&mut state, "login\njane@x.com\nsecret1\ny\nwhoami\n").await;

        assert!(text.contains("Signing in..."));
        assert!(text.contains("Hi, jane"));
        assert!(text.contains("jane [cart 0]> "));
        assert!(state.session().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_signup_validation_is_reported() {
        let mut state = state();
        let text = script(&mut state, "signup\nJ\nj!\nbad\n123\n456\nn\n").await;

        assert!(text.contains("Please fix the following:"));
        assert!(text.contains("email: Please enter a valid email"));
        assert!(state.session().is_none());
    }
}
