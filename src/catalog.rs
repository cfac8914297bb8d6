//! Read-mostly view over the menu collection.
use crate::schema::{MenuItem, MENU};
use crate::store::Store;
use rust_decimal::Decimal;

/// All menu items sorted ascending by name, case-insensitive.
pub fn list(store: &Store) -> Vec<MenuItem> {
    let mut items: Vec<MenuItem> = store
        .read_all(&MENU)
        .iter()
        .filter_map(|record| MenuItem::from_record(record))
        .collect();
    items.sort_by_key(|item| item.name.to_lowercase());
    items
}

/// First item whose id matches, or `None`.
pub fn find_by_id(store: &Store, id: u32) -> Option<MenuItem> {
    store
        .read_all(&MENU)
        .iter()
        .filter_map(|record| MenuItem::from_record(record))
        .find(|item| item.id == id)
}

/// Append a new item under the next free id and return that id.
pub fn add(store: &Store, name: &str, price: Decimal) -> u32 {
    let item = MenuItem {
        id: store.next_id(&MENU),
        name: name.to_string(),
        price,
    };
    store.append(&MENU, &item.to_record());
    item.id
}

/// Remove by id via a full-collection rewrite. Records that fail to parse
/// are preserved as-is. Single-process only; the rewrite window is not safe
/// under concurrent readers.
pub fn remove(store: &Store, id: u32) {
    let id = id.to_string();
    let keep: Vec<_> = store
        .read_all(&MENU)
        .into_iter()
        .filter(|record| record.first() != Some(&id))
        .collect();
    store.overwrite_all(&MENU, &keep);
}

/// Boxed menu table for the interactive views.
pub fn render_table(items: &[MenuItem], currency: &str) -> String {
    let mut out = String::new();
    let price_header = format!("Price ({currency})");
    out.push_str("┌───────┬─────────────────────┬────────────┐\n");
    out.push_str(&format!(
        "│ ID    │ Item Name           │ {price_header:<10} │\n"
    ));
    out.push_str("├───────┼─────────────────────┼────────────┤\n");
    for item in items {
        out.push_str(&format!(
            "│ {:<5} │ {:<19} │ {:<10.2} │\n",
            item.id, item.name, item.price
        ));
    }
    out.push_str("└───────┴─────────────────────┴────────────┘");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, Store) {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().to_path_buf());
        (dir, store)
    }

    fn price(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    #[test]
    fn list_sorts_case_insensitively_regardless_of_insertion_order() {
        let (_dir, store) = store();
        add(&store, "samosa", price("30"));
        add(&store, "Biryani", price("180"));
        add(&store, "aloo tikki", price("25"));

        let names: Vec<_> = list(&store).into_iter().map(|item| item.name).collect();
        assert_eq!(names, vec!["aloo tikki", "Biryani", "samosa"]);
    }

    #[test]
    fn find_by_id_returns_the_matching_item() {
        let (_dir, store) = store();
        let id = add(&store, "Tea", price("12.50"));
        let item = find_by_id(&store, id).expect("item");
        assert_eq!(item.name, "Tea");
        assert_eq!(item.price, price("12.50"));
        assert!(find_by_id(&store, id + 1).is_none());
    }

    #[test]
    fn remove_rewrites_the_collection_without_the_item() {
        let (_dir, store) = store();
        let tea = add(&store, "Tea", price("12.50"));
        let soup = add(&store, "Soup", price("40"));
        remove(&store, tea);

        let items = list(&store);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, soup);
        // The next id reuses nothing below the surviving maximum.
        assert_eq!(store.next_id(&crate::schema::MENU), soup + 1);
    }

    #[test]
    fn remove_of_unknown_id_is_a_no_op() {
        let (_dir, store) = store();
        add(&store, "Tea", price("12.50"));
        remove(&store, 99);
        assert_eq!(list(&store).len(), 1);
    }

    #[test]
    fn table_lists_prices_with_two_fraction_digits() {
        let items = vec![MenuItem {
            id: 1,
            name: "Tea".to_string(),
            price: price("12.5"),
        }];
        let table = render_table(&items, "Rs.");
        assert!(table.contains("12.50"));
        assert!(table.contains("Price (Rs.)"));
    }
}
