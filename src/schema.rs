//! Persisted entities and their collection schemas.
//!
//! Reads are permissive (rows that fail to parse are skipped by the typed
//! readers), writes are strict: every written record comes from a typed value.
use crate::store::Collection;
use rust_decimal::Decimal;

pub const USERS: Collection = Collection {
    file: "users.csv",
    fields: &["id", "name", "email", "password", "role"],
};

pub const MENU: Collection = Collection {
    file: "menu.csv",
    fields: &["id", "item_name", "price"],
};

pub const ORDERS: Collection = Collection {
    file: "orders.csv",
    fields: &["id", "user_id", "date"],
};

pub const ORDER_LINES: Collection = Collection {
    file: "order_items.csv",
    fields: &["order_id", "item_id", "qty"],
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::User => "USER",
        }
    }

    /// Unknown spellings read back as the unprivileged role.
    pub fn parse(value: &str) -> Self {
        if value == "ADMIN" {
            Role::Admin
        } else {
            Role::User
        }
    }
}

#[derive(Clone, Debug)]
pub struct User {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl User {
    pub fn from_record(record: &[String]) -> Option<Self> {
        Some(Self {
            id: record.first()?.parse().ok()?,
            name: record.get(1)?.clone(),
            email: record.get(2)?.clone(),
            password: record.get(3)?.clone(),
            role: Role::parse(record.get(4)?),
        })
    }

    pub fn to_record(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.email.clone(),
            self.password.clone(),
            self.role.as_str().to_string(),
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuItem {
    pub id: u32,
    pub name: String,
    pub price: Decimal,
}

impl MenuItem {
    pub fn from_record(record: &[String]) -> Option<Self> {
        Some(Self {
            id: record.first()?.parse().ok()?,
            name: record.get(1)?.clone(),
            price: record.get(2)?.trim().parse().ok()?,
        })
    }

    pub fn to_record(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.price.to_string(),
        ]
    }
}

#[derive(Clone, Debug)]
pub struct Order {
    pub id: u32,
    pub user_id: u32,
    pub date: String,
}

impl Order {
    pub fn from_record(record: &[String]) -> Option<Self> {
        Some(Self {
            id: record.first()?.parse().ok()?,
            user_id: record.get(1)?.parse().ok()?,
            date: record.get(2)?.clone(),
        })
    }

    pub fn to_record(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.user_id.to_string(),
            self.date.clone(),
        ]
    }
}

#[derive(Clone, Debug)]
pub struct OrderLine {
    pub order_id: u32,
    pub item_id: u32,
    pub qty: u32,
}

impl OrderLine {
    pub fn from_record(record: &[String]) -> Option<Self> {
        Some(Self {
            order_id: record.first()?.parse().ok()?,
            item_id: record.get(1)?.parse().ok()?,
            qty: record.get(2)?.parse().ok()?,
        })
    }

    pub fn to_record(&self) -> Vec<String> {
        vec![
            self.order_id.to_string(),
            self.item_id.to_string(),
            self.qty.to_string(),
        ]
    }
}

/// Transient cart line; snapshots the item's name and price at selection
/// time so later menu edits do not change what this order displays.
#[derive(Clone, Debug)]
pub struct CartEntry {
    pub item_id: u32,
    pub name: String,
    pub price: Decimal,
    pub qty: u32,
}

impl CartEntry {
    pub fn amount(&self) -> Decimal {
        self.price * Decimal::from(self.qty)
    }
}
