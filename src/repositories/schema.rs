use rusqlite::Connection;

use crate::error::ContactResult;

/// Initialize the database schema. Creates all tables if they don't exist.
///
/// Phones and addresses cascade with their contact; the type tables are
/// shared lookups and are never deleted through a contact.
pub fn initialize(conn: &Connection) -> ContactResult<()> {
    conn.execute_batch(
        "
        PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS phone_types (
            phone_type_id INTEGER PRIMARY KEY,
            name TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS address_types (
            address_type_id INTEGER PRIMARY KEY,
            name TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS contacts (
            contact_id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT NOT NULL,
            middle_name TEXT,
            last_name TEXT NOT NULL,
            email_address TEXT NOT NULL,
            birthday TEXT,
            anniversary TEXT,
            image_url TEXT,
            notes TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_contacts_name ON contacts(last_name, first_name);

        CREATE TABLE IF NOT EXISTS phones (
            phone_id INTEGER PRIMARY KEY AUTOINCREMENT,
            contact_id INTEGER NOT NULL REFERENCES contacts(contact_id) ON DELETE CASCADE,
            phone_number TEXT,
            extension TEXT,
            phone_type_id INTEGER REFERENCES phone_types(phone_type_id)
        );

        CREATE TABLE IF NOT EXISTS addresses (
            address_id INTEGER PRIMARY KEY AUTOINCREMENT,
            contact_id INTEGER NOT NULL REFERENCES contacts(contact_id) ON DELETE CASCADE,
            street_address TEXT,
            secondary_address TEXT,
            unit TEXT,
            city TEXT,
            state TEXT,
            country TEXT,
            postal_code TEXT,
            address_type_id INTEGER REFERENCES address_types(address_type_id)
        );
        ",
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        initialize(&conn).unwrap();

        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'
                 AND name IN ('contacts', 'phones', 'addresses', 'phone_types', 'address_types')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 5);
    }

    #[test]
    fn initialize_enables_foreign_keys() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        let enabled: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 1);
    }
}
