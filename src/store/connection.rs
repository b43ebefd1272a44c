// src/store/connection.rs
//! Opening SQLite with runtime parameters.

use rusqlite::Connection;
use std::{path::Path, time::Duration};

pub fn open_db_connection(path: &Path) -> rusqlite::Result<Connection> {
    let conn = Connection::open(path)?;
    conn.busy_timeout(Duration::from_millis(1_000))?;
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    Ok(conn)
}
