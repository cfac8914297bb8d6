//! Order placement: the interactive cart loop and its persistence.
//!
//! The loop collects cart entries against the current catalog, then writes
//! one order header followed by one line record per entry. There is no
//! atomicity across those appends; a failure mid-sequence leaves a partial
//! order behind, which the append-only model accepts rather than masks.
use crate::catalog;
use crate::config::AppConfig;
use crate::console::Console;
use crate::receipt;
use crate::schema::{CartEntry, Order, OrderLine, User, ORDERS, ORDER_LINES};
use crate::store::Store;
use anyhow::Result;
use rust_decimal::Decimal;

/// Item-id input that ends the cart loop.
const DONE_SENTINEL: &str = "0";

#[derive(Debug)]
pub struct PlacedOrder {
    pub order_id: u32,
    pub total: Decimal,
}

/// Run the cart loop for an authenticated user. Returns `None` when the
/// cart ends empty (nothing is written), otherwise the persisted order id
/// and total.
pub fn place_order(
    store: &Store,
    config: &AppConfig,
    user: &User,
    console: &mut Console,
) -> Result<Option<PlacedOrder>> {
    let cart = collect_cart(store, config, console)?;
    if cart.is_empty() {
        console.say("Cart is empty. Order cancelled.")?;
        return Ok(None);
    }

    let total: Decimal = cart.iter().map(CartEntry::amount).sum();
    let placed_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

    // Header first, then one line per entry in insertion order.
    let order = Order {
        id: store.next_id(&ORDERS),
        user_id: user.id,
        date: placed_at.clone(),
    };
    store.append(&ORDERS, &order.to_record());
    for entry in &cart {
        let line = OrderLine {
            order_id: order.id,
            item_id: entry.item_id,
            qty: entry.qty,
        };
        store.append(&ORDER_LINES, &line.to_record());
    }

    console.say("")?;
    console.say("Order Summary:")?;
    let currency = &config.currency;
    for entry in &cart {
        console.say(&format!(
            "{} x {} = {currency}{:.2}",
            entry.name,
            entry.qty,
            entry.amount()
        ))?;
    }
    console.say(&format!("TOTAL: {currency}{total:.2}"))?;
    console.say(&format!("Order placed. Order ID: {}", order.id))?;

    // The order is already durable; a receipt failure is only reported.
    match receipt::generate(
        &config.receipt_dir,
        order.id,
        &user.name,
        &placed_at,
        &cart,
        total,
        currency,
    ) {
        Ok(path) => console.say(&format!("Receipt written to {}", path.display()))?,
        Err(err) => console.say(&format!("Could not write receipt: {err:#}"))?,
    }

    Ok(Some(PlacedOrder {
        order_id: order.id,
        total,
    }))
}

fn collect_cart(
    store: &Store,
    config: &AppConfig,
    console: &mut Console,
) -> Result<Vec<CartEntry>> {
    let mut cart = Vec::new();
    loop {
        let items = catalog::list(store);
        if items.is_empty() {
            console.say("Menu is empty!")?;
        } else {
            console.say(&catalog::render_table(&items, &config.currency))?;
        }

        let Some(input) = console.prompt("Enter Item ID (0 to finish): ")? else {
            break;
        };
        if input == DONE_SENTINEL {
            break;
        }
        let Ok(item_id) = input.parse::<u32>() else {
            console.say("Invalid Item ID!")?;
            continue;
        };
        let Some(item) = catalog::find_by_id(store, item_id) else {
            console.say("Invalid Item ID!")?;
            continue;
        };

        let Some(qty_input) = console.prompt("Enter Quantity: ")? else {
            break;
        };
        let qty = match qty_input.parse::<u32>() {
            Ok(qty) if qty >= 1 => qty,
            _ => {
                console.say("Quantity must be a whole number of at least 1.")?;
                continue;
            }
        };

        console.say(&format!("Added {} x {qty} to cart.", item.name))?;
        cart.push(CartEntry {
            item_id: item.id,
            name: item.name,
            price: item.price,
            qty,
        });
    }
    Ok(cart)
}
