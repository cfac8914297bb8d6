//! Order history view: Orders x OrderLines x MenuItems for one user.
use crate::catalog;
use crate::console::Console;
use crate::schema::{Order, OrderLine, ORDERS, ORDER_LINES};
use crate::store::Store;
use anyhow::Result;
use rust_decimal::Decimal;

/// Print every past order for the user, with per-line subtotals.
///
/// Subtotals use the menu's current price for the item id; lines do not
/// record the price paid, so the display can diverge from the amount on the
/// order's receipt if the menu has changed since. Lines whose item id no
/// longer resolves are skipped.
pub fn show(store: &Store, user_id: u32, currency: &str, console: &mut Console) -> Result<()> {
    let orders: Vec<Order> = store
        .read_all(&ORDERS)
        .iter()
        .filter_map(|record| Order::from_record(record))
        .filter(|order| order.user_id == user_id)
        .collect();
    let lines: Vec<OrderLine> = store
        .read_all(&ORDER_LINES)
        .iter()
        .filter_map(|record| OrderLine::from_record(record))
        .collect();

    console.say("")?;
    console.say("===== My Orders =====")?;
    if orders.is_empty() {
        console.say("No orders yet.")?;
        return Ok(());
    }
    for order in orders {
        console.say(&format!("Order ID: {} Date: {}", order.id, order.date))?;
        for line in lines.iter().filter(|line| line.order_id == order.id) {
            let Some(item) = catalog::find_by_id(store, line.item_id) else {
                continue;
            };
            let subtotal = item.price * Decimal::from(line.qty);
            console.say(&format!(
                " - {} x {} = {currency}{subtotal:.2}",
                item.name, line.qty
            ))?;
        }
        console.say("---------------------------")?;
    }
    Ok(())
}
