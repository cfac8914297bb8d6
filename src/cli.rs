//! CLI argument parsing for the interactive shell.
//!
//! The binary takes only launcher flags; everything else is line-oriented
//! prompt/response over stdin/stdout once the shell is running.
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "comanda",
    version,
    about = "Terminal food ordering and menu management over flat record files",
    after_help = "Data lives in four record files under the data directory:\n  users.csv, menu.csv, orders.csv, order_items.csv\nReceipts are written as Order_<id>_Receipt.txt under the receipt directory.\nAn optional config.json in the data directory may set receipt_dir and currency."
)]
pub struct RootArgs {
    /// Directory holding the record files (default: current directory)
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Directory where order receipts are written (default: data directory)
    #[arg(long, value_name = "DIR")]
    pub receipt_dir: Option<PathBuf>,
}
