//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `laurel_core` linkage.
//! - Exercise the offline store bootstrap end to end against an in-memory
//!   database.

use laurel_core::db::open_db_in_memory;
use laurel_core::{OfflineRepository, SqliteOfflineRepository};

fn main() {
    println!("laurel_core ping={}", laurel_core::ping());
    println!("laurel_core version={}", laurel_core::core_version());

    if let Err(err) = store_smoke_check() {
        eprintln!("offline store smoke check failed: {err}");
        std::process::exit(1);
    }
}

fn store_smoke_check() -> Result<(), Box<dyn std::error::Error>> {
    let conn = open_db_in_memory()?;
    let repo = SqliteOfflineRepository::try_new(&conn)?;
    let info = repo.storage_info()?;
    println!(
        "offline_store used_bytes={} capacity_bytes={} percent_used={}",
        info.used_bytes, info.capacity_bytes, info.percent_used
    );
    Ok(())
}
