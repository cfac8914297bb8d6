//! Authentication state for one interactive session.
//!
//! The session is an explicit value owned by the shell loop; nothing reads
//! the current identity through shared state.
use crate::schema::{Role, User, USERS};
use crate::store::Store;

pub const BOOTSTRAP_ADMIN_EMAIL: &str = "admin@food.com";
pub const BOOTSTRAP_ADMIN_PASSWORD: &str = "admin123";

#[derive(Default)]
pub struct Session {
    current: Option<User>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&User> {
        self.current.as_ref()
    }

    /// Linear scan for an exact plaintext match on both fields; the first
    /// match wins if duplicates exist.
    pub fn login(&mut self, store: &Store, email: &str, password: &str) -> Option<&User> {
        self.current = store
            .read_all(&USERS)
            .iter()
            .filter_map(|record| User::from_record(record))
            .find(|user| user.email == email && user.password == password);
        self.current.as_ref()
    }

    pub fn logout(&mut self) {
        self.current = None;
    }
}

/// Create the well-known admin account on first run. The fixed credentials
/// are printed so the operator can log in; this mirrors the legacy bootstrap
/// and is a documented credential-hygiene weakness.
pub fn ensure_admin(store: &Store) {
    let has_admin = store
        .read_all(&USERS)
        .iter()
        .filter_map(|record| User::from_record(record))
        .any(|user| user.role == Role::Admin);
    if has_admin {
        return;
    }
    let admin = User {
        id: store.next_id(&USERS),
        name: "admin".to_string(),
        email: BOOTSTRAP_ADMIN_EMAIL.to_string(),
        password: BOOTSTRAP_ADMIN_PASSWORD.to_string(),
        role: Role::Admin,
    };
    store.append(&USERS, &admin.to_record());
    println!("Admin account created: {BOOTSTRAP_ADMIN_EMAIL} / {BOOTSTRAP_ADMIN_PASSWORD}");
}

/// Register a new unprivileged account and return its id.
pub fn register(store: &Store, name: &str, email: &str, password: &str) -> u32 {
    let user = User {
        id: store.next_id(&USERS),
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        role: Role::User,
    };
    store.append(&USERS, &user.to_record());
    user.id
}
