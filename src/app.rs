//! Top-level interaction shell: register/login, then the role submenu.
//!
//! No failure is fatal mid-session; every operation reports and falls back
//! to a menu prompt. Exhausted input ends the session cleanly.
use crate::catalog;
use crate::config::AppConfig;
use crate::console::Console;
use crate::history;
use crate::schema::{Role, User};
use crate::session::{self, Session};
use crate::store::Store;
use crate::workflow;
use anyhow::Result;

pub fn run(store: &Store, config: &AppConfig, console: &mut Console) -> Result<()> {
    let mut session = Session::new();
    loop {
        console.say("")?;
        console.say("=== Welcome to Comanda ===")?;
        console.say("1. Register")?;
        console.say("2. Login")?;
        console.say("3. Exit")?;
        let Some(choice) = console.prompt("Choice: ")? else {
            return Ok(());
        };
        match choice.as_str() {
            "1" => register(store, console)?,
            "2" => {
                login(store, &mut session, console)?;
                if let Some(user) = session.current().cloned() {
                    match user.role {
                        Role::Admin => admin_menu(store, config, console)?,
                        Role::User => user_menu(store, config, &user, console)?,
                    }
                    session.logout();
                }
            }
            "3" => {
                console.say("Goodbye!")?;
                return Ok(());
            }
            _ => console.say("Invalid choice!")?,
        }
    }
}

fn register(store: &Store, console: &mut Console) -> Result<()> {
    let Some(name) = console.prompt("Enter Name: ")? else {
        return Ok(());
    };
    let Some(email) = console.prompt("Enter Email: ")? else {
        return Ok(());
    };
    let Some(password) = console.prompt("Enter Password: ")? else {
        return Ok(());
    };
    session::register(store, &name, &email, &password);
    console.say("User registered successfully!")?;
    Ok(())
}

fn login(store: &Store, session: &mut Session, console: &mut Console) -> Result<()> {
    let Some(email) = console.prompt("Enter Email: ")? else {
        return Ok(());
    };
    let Some(password) = console.prompt("Enter Password: ")? else {
        return Ok(());
    };
    match session.login(store, &email, &password) {
        Some(user) => {
            let role = user.role.as_str();
            console.say(&format!("Login successful! Logged in as {role}"))?;
        }
        None => console.say("Invalid credentials!")?,
    }
    Ok(())
}

fn view_menu(store: &Store, config: &AppConfig, console: &mut Console) -> Result<()> {
    let items = catalog::list(store);
    if items.is_empty() {
        console.say("Menu is empty!")?;
    } else {
        console.say(&catalog::render_table(&items, &config.currency))?;
    }
    Ok(())
}

fn admin_menu(store: &Store, config: &AppConfig, console: &mut Console) -> Result<()> {
    loop {
        console.say("")?;
        console.say("--- Admin Menu ---")?;
        console.say("1. View Menu")?;
        console.say("2. Add Menu Item")?;
        console.say("3. Remove Menu Item")?;
        console.say("4. Logout")?;
        let Some(choice) = console.prompt("Choice: ")? else {
            return Ok(());
        };
        match choice.as_str() {
            "1" => view_menu(store, config, console)?,
            "2" => add_menu_item(store, console)?,
            "3" => remove_menu_item(store, config, console)?,
            "4" => {
                console.say("Logged out!")?;
                return Ok(());
            }
            _ => console.say("Invalid choice!")?,
        }
    }
}

fn add_menu_item(store: &Store, console: &mut Console) -> Result<()> {
    let Some(name) = console.prompt("Enter Item Name: ")? else {
        return Ok(());
    };
    if name.is_empty() {
        console.say("Item name must not be empty.")?;
        return Ok(());
    }
    let Some(price_input) = console.prompt("Enter Price: ")? else {
        return Ok(());
    };
    let price = match price_input.parse::<rust_decimal::Decimal>() {
        Ok(price) if !price.is_sign_negative() => price,
        _ => {
            console.say("Price must be a non-negative number.")?;
            return Ok(());
        }
    };
    catalog::add(store, &name, price);
    console.say("Menu item added!")?;
    Ok(())
}

fn remove_menu_item(store: &Store, config: &AppConfig, console: &mut Console) -> Result<()> {
    view_menu(store, config, console)?;
    let Some(input) = console.prompt("Enter Menu ID to remove: ")? else {
        return Ok(());
    };
    let Ok(id) = input.parse::<u32>() else {
        console.say("Invalid Menu ID!")?;
        return Ok(());
    };
    catalog::remove(store, id);
    console.say("Menu item removed!")?;
    Ok(())
}

fn user_menu(
    store: &Store,
    config: &AppConfig,
    user: &User,
    console: &mut Console,
) -> Result<()> {
    loop {
        console.say("")?;
        console.say("--- User Menu ---")?;
        console.say("1. View Menu")?;
        console.say("2. Place Order")?;
        console.say("3. View My Orders")?;
        console.say("4. Logout")?;
        let Some(choice) = console.prompt("Choice: ")? else {
            return Ok(());
        };
        match choice.as_str() {
            "1" => view_menu(store, config, console)?,
            "2" => {
                if let Some(placed) = workflow::place_order(store, config, user, console)? {
                    tracing::info!(
                        "order {} placed by user {} for {:.2}",
                        placed.order_id,
                        user.id,
                        placed.total
                    );
                }
            }
            "3" => history::show(store, user.id, &config.currency, console)?,
            "4" => {
                console.say("Logged out!")?;
                return Ok(());
            }
            _ => console.say("Invalid choice!")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{MENU, ORDERS, USERS};
    use std::io::Cursor;
    use tempfile::TempDir;

    fn fixture(dir: &TempDir) -> (Store, AppConfig) {
        let store = Store::new(dir.path().to_path_buf());
        let config = AppConfig {
            data_dir: dir.path().to_path_buf(),
            receipt_dir: dir.path().to_path_buf(),
            currency: "Rs.".to_string(),
        };
        (store, config)
    }

    fn run_script(script: &str, store: &Store, config: &AppConfig) -> String {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut output = Vec::new();
        {
            let mut console = Console::new(&mut input, &mut output);
            run(store, config, &mut console).unwrap();
        }
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn register_then_login_reaches_the_user_menu() {
        let dir = TempDir::new().unwrap();
        let (store, config) = fixture(&dir);

        let script = "1\nalice\nalice@example.com\npw\n2\nalice@example.com\npw\n4\n3\n";
        let output = run_script(script, &store, &config);

        assert!(output.contains("User registered successfully!"));
        assert!(output.contains("Logged in as USER"));
        assert!(output.contains("--- User Menu ---"));
        assert!(output.contains("Goodbye!"));
        assert_eq!(store.read_all(&USERS).len(), 1);
    }

    #[test]
    fn bad_credentials_stay_at_the_top_menu() {
        let dir = TempDir::new().unwrap();
        let (store, config) = fixture(&dir);
        session::register(&store, "alice", "alice@example.com", "pw");

        let script = "2\nalice@example.com\nwrong\n3\n";
        let output = run_script(script, &store, &config);

        assert!(output.contains("Invalid credentials!"));
        assert!(!output.contains("--- User Menu ---"));
    }

    #[test]
    fn admin_can_add_and_remove_menu_items() {
        let dir = TempDir::new().unwrap();
        let (store, config) = fixture(&dir);
        session::ensure_admin(&store);

        let script = "2\nadmin@food.com\nadmin123\n2\nTea\n12.50\n2\nSoup\n40\n3\n1\n4\n3\n";
        let output = run_script(script, &store, &config);

        assert!(output.contains("Logged in as ADMIN"));
        assert!(output.contains("--- Admin Menu ---"));
        assert_eq!(output.matches("Menu item added!").count(), 2);
        assert!(output.contains("Menu item removed!"));
        assert_eq!(store.read_all(&MENU).len(), 1);
    }

    #[test]
    fn invalid_price_aborts_the_add() {
        let dir = TempDir::new().unwrap();
        let (store, config) = fixture(&dir);
        session::ensure_admin(&store);

        let script = "2\nadmin@food.com\nadmin123\n2\nTea\n-5\n2\nTea\nfree\n4\n3\n";
        let output = run_script(script, &store, &config);

        assert_eq!(
            output.matches("Price must be a non-negative number.").count(),
            2
        );
        assert!(store.read_all(&MENU).is_empty());
    }

    #[test]
    fn full_user_session_places_an_order() {
        let dir = TempDir::new().unwrap();
        let (store, config) = fixture(&dir);
        catalog::add(&store, "Tea", "12.50".parse().unwrap());
        session::register(&store, "alice", "alice@example.com", "pw");

        let script = "2\nalice@example.com\npw\n2\n1\n2\n0\n3\n4\n3\n";
        let output = run_script(script, &store, &config);

        assert!(output.contains("Order placed. Order ID: 1"));
        assert!(output.contains("===== My Orders ====="));
        assert!(output.contains(" - Tea x 2 = Rs.25.00"));
        assert_eq!(store.read_all(&ORDERS).len(), 1);
    }

    #[test]
    fn exhausted_input_exits_cleanly() {
        let dir = TempDir::new().unwrap();
        let (store, config) = fixture(&dir);
        let output = run_script("", &store, &config);
        assert!(output.contains("=== Welcome to Comanda ==="));
    }
}
