//! AgroLink marketplace client - interactive demo shell.
//!
//! A minimal host around [`agrolink_client::app::MarketplaceApp`]: it
//! wires the durable file store, the demo catalog, the HTTP auth client,
//! and the local order sink, then applies the effects handlers return
//! (notifications are printed, redirects are announced).

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::io::{BufRead, Write as _};

use agrolink_client::app::MarketplaceApp;
use agrolink_client::cart::CartView;
use agrolink_client::catalog::{ProductCatalog, StaticCatalog};
use agrolink_client::config::ClientConfig;
use agrolink_client::effect::{Effect, NotificationLevel};
use agrolink_client::error::ClientError;
use agrolink_client::forms::{LoginForm, ShippingForm};
use agrolink_client::services::auth::AuthClient;
use agrolink_client::services::orders::LocalOrderSink;
use agrolink_client::storage::JsonFileStore;
use agrolink_core::ProductId;

type App = MarketplaceApp<JsonFileStore, StaticCatalog, AuthClient, LocalOrderSink>;

fn apply_effects(effects: &[Effect]) {
    for effect in effects {
        match effect {
            Effect::Notify(n) => {
                let tag = match n.level {
                    NotificationLevel::Info => "info",
                    NotificationLevel::Success => "ok",
                    NotificationLevel::Error => "error",
                };
                println!("[{tag}] {}", n.message);
            }
            Effect::Redirect { target, .. } => println!("-> {target}"),
        }
    }
}

fn report(result: Result<Vec<Effect>, ClientError>) {
    match result {
        Ok(effects) => apply_effects(&effects),
        Err(e) => println!("[error] {}", e.user_message()),
    }
}

fn prompt(label: &str) -> std::io::Result<String> {
    print!("{label}: ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_owned())
}

fn show_products(app: &App) {
    for product in app.catalog().all() {
        println!(
            "  [{}] {} - {}/kg by {} ({})",
            product.id, product.name, product.unit_price, product.farmer, product.location
        );
    }
}

fn show_cart(app: &App) {
    match app.cart_view() {
        CartView::Empty => println!("Your cart is empty"),
        CartView::Items { rows, totals } => {
            for row in rows {
                println!(
                    "  {} x{} @ {} = {} (by {})",
                    row.name, row.quantity, row.unit_price, row.subtotal, row.farmer
                );
            }
            println!("  total: {} items, {}", totals.total_units, totals.total_price);
        }
    }
}

async fn run_command(app: &mut App, line: &str) -> std::io::Result<bool> {
    let mut parts = line.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("products"), _) => show_products(app),
        (Some("cart"), _) => show_cart(app),
        (Some("add"), Some(id)) => report(app.add_item(&ProductId::new(id))),
        (Some("remove"), Some(id)) => report(app.remove_item(&ProductId::new(id))),
        (Some("inc"), Some(id)) => report(app.adjust_quantity(&ProductId::new(id), 1)),
        (Some("dec"), Some(id)) => report(app.adjust_quantity(&ProductId::new(id), -1)),
        (Some("checkout"), _) => {
            let form = ShippingForm {
                full_name: prompt("full name")?,
                phone: prompt("phone")?,
                address: prompt("address")?,
                location: prompt("location")?,
                note: prompt("note (optional)")?,
            };
            match app.checkout(form).await {
                Ok((confirmation, effects)) => {
                    println!("[ok] order {} placed", confirmation.order_id);
                    apply_effects(&effects);
                }
                Err(e) => println!("[error] {}", e.user_message()),
            }
        }
        (Some("login"), _) => {
            let form = LoginForm {
                email: prompt("email")?,
                password: prompt("password")?,
                role: prompt("role (farmer/buyer/transporter/admin)")?,
            };
            report(app.login(form).await);
        }
        (Some("logout"), _) => report(app.logout()),
        (Some("whoami"), _) => match app.current_user() {
            Some(user) => println!("{} <{}> ({})", user.display_name(), user.email, user.role),
            None => println!("not logged in"),
        },
        (Some("orders"), _) => {
            for order in app.placed_orders() {
                println!("  {} - {} ({})", order.id, order.total, order.status);
            }
        }
        (Some("quit" | "exit"), _) => return Ok(false),
        (Some(other), _) => println!("unknown command: {other}"),
        (None, _) => {}
    }
    Ok(true)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "agrolink_client=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = ClientConfig::from_env()?;
    let storage = JsonFileStore::open(&config.state_path)?;
    let auth = AuthClient::new(&config)?;
    let mut app = App::new(storage, StaticCatalog::with_demo_products(), auth, LocalOrderSink);

    println!("AgroLink client. Commands: products, cart, add <id>, remove <id>, inc <id>, dec <id>, checkout, login, logout, whoami, orders, quit");
    loop {
        let line = prompt("agrolink")?;
        if !run_command(&mut app, &line).await? {
            break;
        }
    }
    Ok(())
}
