use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction};
use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, Mutex};

use super::schema;
use crate::error::{ContactError, ContactResult};
use crate::models::{Address, AddressType, Contact, Phone, PhoneType};
use crate::repositories::traits::ContactRepository;

const CONTACT_COLUMNS: &str = "contact_id, first_name, middle_name, last_name, email_address,
     birthday, anniversary, image_url, notes";

/// Contact repository backed by a SQLite database.
///
/// A single connection is shared behind a mutex and every statement runs on
/// tokio's blocking pool, so callers on the async runtime are never blocked
/// by disk I/O.
#[derive(Clone)]
pub struct SqliteContactRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteContactRepository {
    /// Open (or create) a database file and bootstrap the schema.
    pub fn open(path: impl AsRef<Path>) -> ContactResult<Self> {
        let path = path.as_ref();
        tracing::info!("Opening SQLite contact store at {}", path.display());
        Self::from_connection(Connection::open(path)?)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> ContactResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    /// Wrap an existing connection, bootstrapping the schema on it.
    pub fn from_connection(conn: Connection) -> ContactResult<Self> {
        schema::initialize(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `op` against the connection on the blocking thread pool.
    async fn with_connection<T, F>(&self, op: F) -> ContactResult<T>
    where
        F: FnOnce(&mut Connection) -> ContactResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let mut guard = conn
                .lock()
                .map_err(|_| ContactError::Other("SQLite connection lock poisoned".to_string()))?;
            op(&mut guard)
        })
        .await
        .map_err(|e| ContactError::Other(format!("Task join error: {}", e)))?
    }
}

#[async_trait]
impl ContactRepository for SqliteContactRepository {
    async fn get(&self, contact_id: i64) -> ContactResult<Option<Contact>> {
        tracing::debug!(contact_id, "sqlite: get contact");
        self.with_connection(move |conn| find_contact(conn, contact_id))
            .await
    }

    async fn get_all(&self) -> ContactResult<Vec<Contact>> {
        tracing::debug!("sqlite: get all contacts");
        self.with_connection(|conn| {
            let sql = format!("SELECT {} FROM contacts ORDER BY contact_id", CONTACT_COLUMNS);
            query_contacts(conn, &sql, params![])
        })
        .await
    }

    async fn get_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> ContactResult<Vec<Contact>> {
        tracing::debug!(first_name, last_name, "sqlite: get contacts by name");
        let first_name = first_name.to_string();
        let last_name = last_name.to_string();

        self.with_connection(move |conn| {
            let sql = format!(
                "SELECT {} FROM contacts WHERE first_name = ?1 AND last_name = ?2
                 ORDER BY contact_id",
                CONTACT_COLUMNS
            );
            query_contacts(conn, &sql, params![first_name, last_name])
        })
        .await
    }

    async fn save(&self, contact: &Contact) -> ContactResult<Option<Contact>> {
        tracing::debug!(contact_id = contact.contact_id, "sqlite: save contact");
        let contact = contact.clone();
        self.with_connection(move |conn| save_contact(conn, contact))
            .await
    }

    async fn delete(&self, contact_id: i64) -> ContactResult<bool> {
        tracing::debug!(contact_id, "sqlite: delete contact");
        self.with_connection(move |conn| delete_contact(conn, contact_id))
            .await
    }

    async fn get_phones(&self, contact_id: i64) -> ContactResult<Vec<Phone>> {
        self.with_connection(move |conn| find_phones(conn, contact_id))
            .await
    }

    async fn get_phone(&self, contact_id: i64, phone_id: i64) -> ContactResult<Option<Phone>> {
        self.with_connection(move |conn| {
            let phone = conn
                .query_row(
                    &format!("{} WHERE p.contact_id = ?1 AND p.phone_id = ?2", PHONE_SELECT),
                    params![contact_id, phone_id],
                    row_to_phone,
                )
                .optional()?;
            Ok(phone)
        })
        .await
    }

    async fn get_addresses(&self, contact_id: i64) -> ContactResult<Vec<Address>> {
        self.with_connection(move |conn| find_addresses(conn, contact_id))
            .await
    }

    async fn get_address(
        &self,
        contact_id: i64,
        address_id: i64,
    ) -> ContactResult<Option<Address>> {
        self.with_connection(move |conn| {
            let address = conn
                .query_row(
                    &format!(
                        "{} WHERE a.contact_id = ?1 AND a.address_id = ?2",
                        ADDRESS_SELECT
                    ),
                    params![contact_id, address_id],
                    row_to_address,
                )
                .optional()?;
            Ok(address)
        })
        .await
    }
}

// Contacts

fn find_contact(conn: &Connection, contact_id: i64) -> ContactResult<Option<Contact>> {
    let sql = format!("SELECT {} FROM contacts WHERE contact_id = ?1", CONTACT_COLUMNS);
    let contact = conn
        .query_row(&sql, params![contact_id], row_to_contact)
        .optional()?;

    match contact {
        Some(contact) => Ok(Some(with_children(conn, contact)?)),
        None => Ok(None),
    }
}

fn query_contacts(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> ContactResult<Vec<Contact>> {
    let mut stmt = conn.prepare(sql)?;
    let contacts = stmt
        .query_map(params, row_to_contact)?
        .collect::<Result<Vec<_>, _>>()?;

    contacts
        .into_iter()
        .map(|contact| with_children(conn, contact))
        .collect()
}

fn with_children(conn: &Connection, mut contact: Contact) -> ContactResult<Contact> {
    contact.phones = find_phones(conn, contact.contact_id)?;
    contact.addresses = find_addresses(conn, contact.contact_id)?;
    Ok(contact)
}

fn save_contact(conn: &mut Connection, mut contact: Contact) -> ContactResult<Option<Contact>> {
    let tx = conn.transaction()?;

    let birthday = contact.birthday.map(format_date);
    let anniversary = contact.anniversary.map(format_date);

    // Child ids that may be kept; anything else gets a fresh id from SQLite.
    let mut owned_phones = HashSet::new();
    let mut owned_addresses = HashSet::new();

    if contact.is_new() {
        tx.execute(
            "INSERT INTO contacts (first_name, middle_name, last_name, email_address,
                                   birthday, anniversary, image_url, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                contact.first_name,
                contact.middle_name,
                contact.last_name,
                contact.email_address,
                birthday,
                anniversary,
                contact.image_url,
                contact.notes,
            ],
        )?;
        contact.contact_id = tx.last_insert_rowid();
    } else {
        let updated = tx.execute(
            "UPDATE contacts SET first_name = ?1, middle_name = ?2, last_name = ?3,
                    email_address = ?4, birthday = ?5, anniversary = ?6,
                    image_url = ?7, notes = ?8
             WHERE contact_id = ?9",
            params![
                contact.first_name,
                contact.middle_name,
                contact.last_name,
                contact.email_address,
                birthday,
                anniversary,
                contact.image_url,
                contact.notes,
                contact.contact_id,
            ],
        )?;

        if updated == 0 {
            // Dropping the transaction rolls it back.
            return Ok(None);
        }

        owned_phones = child_ids(&tx, "phones", "phone_id", contact.contact_id)?;
        owned_addresses = child_ids(&tx, "addresses", "address_id", contact.contact_id)?;

        // Replace-on-save: children are rewritten from the incoming contact.
        tx.execute(
            "DELETE FROM phones WHERE contact_id = ?1",
            params![contact.contact_id],
        )?;
        tx.execute(
            "DELETE FROM addresses WHERE contact_id = ?1",
            params![contact.contact_id],
        )?;
    }

    let contact_id = contact.contact_id;
    for phone in contact.phones.iter_mut() {
        if !owned_phones.contains(&phone.phone_id) {
            phone.phone_id = 0;
        }
        insert_phone(&tx, contact_id, phone)?;
    }
    for address in contact.addresses.iter_mut() {
        if !owned_addresses.contains(&address.address_id) {
            address.address_id = 0;
        }
        insert_address(&tx, contact_id, address)?;
    }

    tx.commit()?;
    Ok(Some(contact))
}

/// Ids of the child rows a contact owns right now.
fn child_ids(
    tx: &Transaction<'_>,
    table: &str,
    id_column: &str,
    contact_id: i64,
) -> ContactResult<HashSet<i64>> {
    let mut stmt = tx.prepare(&format!(
        "SELECT {id_column} FROM {table} WHERE contact_id = ?1"
    ))?;
    let ids = stmt
        .query_map(params![contact_id], |row| row.get(0))?
        .collect::<Result<HashSet<i64>, _>>()?;
    Ok(ids)
}

fn delete_contact(conn: &mut Connection, contact_id: i64) -> ContactResult<bool> {
    let tx = conn.transaction()?;

    // The foreign keys cascade too; removing children first keeps the
    // behaviour identical on connections opened without the pragma.
    tx.execute(
        "DELETE FROM phones WHERE contact_id = ?1",
        params![contact_id],
    )?;
    tx.execute(
        "DELETE FROM addresses WHERE contact_id = ?1",
        params![contact_id],
    )?;
    let deleted = tx.execute(
        "DELETE FROM contacts WHERE contact_id = ?1",
        params![contact_id],
    )?;

    tx.commit()?;
    Ok(deleted > 0)
}

fn row_to_contact(row: &Row<'_>) -> rusqlite::Result<Contact> {
    Ok(Contact {
        contact_id: row.get(0)?,
        first_name: row.get(1)?,
        middle_name: row.get(2)?,
        last_name: row.get(3)?,
        email_address: row.get(4)?,
        birthday: parse_date(row, 5)?,
        anniversary: parse_date(row, 6)?,
        image_url: row.get(7)?,
        notes: row.get(8)?,
        phones: Vec::new(),
        addresses: Vec::new(),
    })
}

/// Dates are stored as RFC 3339 text with full precision so they read back
/// exactly as written.
fn format_date(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn parse_date(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<DateTime<Utc>>> {
    let raw: Option<String> = row.get(idx)?;
    raw.map(|value| {
        DateTime::parse_from_rfc3339(&value)
            .map(|date| date.with_timezone(&Utc))
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
    })
    .transpose()
}

// Phones

const PHONE_SELECT: &str = "SELECT p.phone_id, p.phone_number, p.extension, p.contact_id,
            t.phone_type_id, t.name
     FROM phones p LEFT JOIN phone_types t ON t.phone_type_id = p.phone_type_id";

fn find_phones(conn: &Connection, contact_id: i64) -> ContactResult<Vec<Phone>> {
    let mut stmt = conn.prepare(&format!(
        "{} WHERE p.contact_id = ?1 ORDER BY p.phone_id",
        PHONE_SELECT
    ))?;
    let phones = stmt
        .query_map(params![contact_id], row_to_phone)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(phones)
}

fn row_to_phone(row: &Row<'_>) -> rusqlite::Result<Phone> {
    let type_id: Option<i64> = row.get(4)?;
    let type_name: Option<String> = row.get(5)?;

    Ok(Phone {
        phone_id: row.get(0)?,
        phone_number: row.get(1)?,
        extension: row.get(2)?,
        contact_id: row.get(3)?,
        phone_type: type_id.zip(type_name).map(|(id, name)| PhoneType::new(id, name)),
    })
}

fn insert_phone(tx: &Transaction<'_>, contact_id: i64, phone: &mut Phone) -> ContactResult<()> {
    let phone_type_id = match phone.phone_type.as_mut() {
        Some(phone_type) => {
            let (id, name) = resolve_lookup(
                tx,
                "phone_types",
                "phone_type_id",
                phone_type.phone_type_id,
                &phone_type.name,
            )?;
            phone_type.phone_type_id = id;
            phone_type.name = name;
            Some(id)
        }
        None => None,
    };

    tx.execute(
        "INSERT INTO phones (phone_id, contact_id, phone_number, extension, phone_type_id)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            (phone.phone_id != 0).then_some(phone.phone_id),
            contact_id,
            phone.phone_number,
            phone.extension,
            phone_type_id,
        ],
    )?;

    phone.phone_id = tx.last_insert_rowid();
    phone.contact_id = contact_id;
    Ok(())
}

// Addresses

const ADDRESS_SELECT: &str = "SELECT a.address_id, a.street_address, a.secondary_address,
            a.unit, a.city, a.state, a.country, a.postal_code, a.contact_id,
            t.address_type_id, t.name
     FROM addresses a LEFT JOIN address_types t ON t.address_type_id = a.address_type_id";

fn find_addresses(conn: &Connection, contact_id: i64) -> ContactResult<Vec<Address>> {
    let mut stmt = conn.prepare(&format!(
        "{} WHERE a.contact_id = ?1 ORDER BY a.address_id",
        ADDRESS_SELECT
    ))?;
    let addresses = stmt
        .query_map(params![contact_id], row_to_address)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(addresses)
}

fn row_to_address(row: &Row<'_>) -> rusqlite::Result<Address> {
    let type_id: Option<i64> = row.get(9)?;
    let type_name: Option<String> = row.get(10)?;

    Ok(Address {
        address_id: row.get(0)?,
        street_address: row.get(1)?,
        secondary_address: row.get(2)?,
        unit: row.get(3)?,
        city: row.get(4)?,
        state: row.get(5)?,
        country: row.get(6)?,
        postal_code: row.get(7)?,
        contact_id: row.get(8)?,
        address_type: type_id
            .zip(type_name)
            .map(|(id, name)| AddressType::new(id, name)),
    })
}

fn insert_address(
    tx: &Transaction<'_>,
    contact_id: i64,
    address: &mut Address,
) -> ContactResult<()> {
    let address_type_id = match address.address_type.as_mut() {
        Some(address_type) => {
            let (id, name) = resolve_lookup(
                tx,
                "address_types",
                "address_type_id",
                address_type.address_type_id,
                &address_type.name,
            )?;
            address_type.address_type_id = id;
            address_type.name = name;
            Some(id)
        }
        None => None,
    };

    tx.execute(
        "INSERT INTO addresses (address_id, contact_id, street_address, secondary_address,
                                unit, city, state, country, postal_code, address_type_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            (address.address_id != 0).then_some(address.address_id),
            contact_id,
            address.street_address,
            address.secondary_address,
            address.unit,
            address.city,
            address.state,
            address.country,
            address.postal_code,
            address_type_id,
        ],
    )?;

    address.address_id = tx.last_insert_rowid();
    address.contact_id = contact_id;
    Ok(())
}

// Lookup types

/// Make sure a lookup row exists and return its id and stored name.
///
/// An id of 0 inserts a new row. Any other id refers to a shared row: it is
/// created when missing, and an existing row keeps its name.
fn resolve_lookup(
    tx: &Transaction<'_>,
    table: &str,
    id_column: &str,
    id: i64,
    name: &str,
) -> ContactResult<(i64, String)> {
    if id == 0 {
        tx.execute(
            &format!("INSERT INTO {} (name) VALUES (?1)", table),
            params![name],
        )?;
        return Ok((tx.last_insert_rowid(), name.to_string()));
    }

    tx.execute(
        &format!(
            "INSERT INTO {table} ({id_column}, name) VALUES (?1, ?2)
             ON CONFLICT({id_column}) DO NOTHING"
        ),
        params![id, name],
    )?;
    let stored: String = tx.query_row(
        &format!("SELECT name FROM {table} WHERE {id_column} = ?1"),
        params![id],
        |row| row.get(0),
    )?;
    Ok((id, stored))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn sample_contact() -> Contact {
        let mut contact = Contact::new("Joseph", "Guadagno", "jguadagno@hotmail.com");
        contact.birthday = Some(Utc.with_ymd_and_hms(1980, 3, 4, 5, 6, 7).unwrap());
        contact.phones = vec![Phone {
            phone_number: Some("555-0100".into()),
            extension: Some("42".into()),
            phone_type: Some(PhoneType::new(1, "Mobile")),
            ..Default::default()
        }];
        contact.addresses = vec![Address {
            street_address: Some("1 Main St".into()),
            city: Some("Phoenix".into()),
            state: Some("AZ".into()),
            postal_code: Some("85001".into()),
            address_type: Some(AddressType::new(1, "Home")),
            ..Default::default()
        }];
        contact
    }

    #[tokio::test]
    async fn save_new_contact_assigns_ids() {
        let repo = SqliteContactRepository::open_in_memory().unwrap();

        let saved = repo.save(&sample_contact()).await.unwrap().unwrap();
        assert_ne!(saved.contact_id, 0);
        assert_ne!(saved.phones[0].phone_id, 0);
        assert_eq!(saved.phones[0].contact_id, saved.contact_id);
        assert_ne!(saved.addresses[0].address_id, 0);
        assert_eq!(saved.addresses[0].contact_id, saved.contact_id);
    }

    #[tokio::test]
    async fn saved_contact_round_trips() {
        let repo = SqliteContactRepository::open_in_memory().unwrap();
        let mut contact = sample_contact();
        contact.anniversary = Some(Utc::now() - Duration::days(1));

        let saved = repo.save(&contact).await.unwrap().unwrap();
        let loaded = repo.get(saved.contact_id).await.unwrap().unwrap();
        assert_eq!(loaded, saved);
    }

    #[tokio::test]
    async fn get_unknown_contact_is_none() {
        let repo = SqliteContactRepository::open_in_memory().unwrap();
        assert!(repo.get(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_replaces_contact_and_children() {
        let repo = SqliteContactRepository::open_in_memory().unwrap();
        let mut saved = repo.save(&sample_contact()).await.unwrap().unwrap();

        saved.first_name = Some("Joe".into());
        saved.phones.clear();
        saved.addresses.push(Address {
            city: Some("Chandler".into()),
            ..Default::default()
        });

        let updated = repo.save(&saved).await.unwrap().unwrap();
        let loaded = repo.get(updated.contact_id).await.unwrap().unwrap();
        assert_eq!(loaded.first_name.as_deref(), Some("Joe"));
        assert!(loaded.phones.is_empty());
        assert_eq!(loaded.addresses.len(), 2);
        assert_eq!(repo.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_of_missing_contact_returns_none() {
        let repo = SqliteContactRepository::open_in_memory().unwrap();
        let mut contact = sample_contact();
        contact.contact_id = 999;

        assert!(repo.save(&contact).await.unwrap().is_none());
        assert!(repo.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_by_name_matches_both_names_exactly() {
        let repo = SqliteContactRepository::open_in_memory().unwrap();
        repo.save(&Contact::new("Joseph", "Guadagno", "j@x.com"))
            .await
            .unwrap();
        repo.save(&Contact::new("Joseph", "Smith", "s@x.com"))
            .await
            .unwrap();

        let found = repo.get_by_name("Joseph", "Guadagno").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].email_address.as_deref(), Some("j@x.com"));
        assert!(repo.get_by_name("Jo", "Guadagno").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_cascades_to_children() {
        let repo = SqliteContactRepository::open_in_memory().unwrap();
        let saved = repo.save(&sample_contact()).await.unwrap().unwrap();
        let phone_id = saved.phones[0].phone_id;
        let address_id = saved.addresses[0].address_id;

        assert!(repo.delete(saved.contact_id).await.unwrap());
        assert!(repo.get(saved.contact_id).await.unwrap().is_none());
        assert!(repo.get_phones(saved.contact_id).await.unwrap().is_empty());
        assert!(repo
            .get_phone(saved.contact_id, phone_id)
            .await
            .unwrap()
            .is_none());
        assert!(repo
            .get_address(saved.contact_id, address_id)
            .await
            .unwrap()
            .is_none());

        assert!(!repo.delete(saved.contact_id).await.unwrap());
    }

    #[tokio::test]
    async fn delete_contact_delegates_to_id() {
        let repo = SqliteContactRepository::open_in_memory().unwrap();
        let saved = repo.save(&sample_contact()).await.unwrap().unwrap();
        assert!(repo.delete_contact(&saved).await.unwrap());
        assert!(repo.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn nested_lookups_are_scoped_to_owner() {
        let repo = SqliteContactRepository::open_in_memory().unwrap();
        let first = repo.save(&sample_contact()).await.unwrap().unwrap();
        let second = repo
            .save(&Contact::new("Jane", "Doe", "jane@example.com"))
            .await
            .unwrap()
            .unwrap();

        let phone_id = first.phones[0].phone_id;
        let phone = repo.get_phone(first.contact_id, phone_id).await.unwrap();
        assert_eq!(phone.unwrap().phone_type, Some(PhoneType::new(1, "Mobile")));
        assert!(repo
            .get_phone(second.contact_id, phone_id)
            .await
            .unwrap()
            .is_none());

        let addresses = repo.get_addresses(first.contact_id).await.unwrap();
        assert_eq!(addresses.len(), 1);
        assert_eq!(addresses[0].address_type, Some(AddressType::new(1, "Home")));
        assert!(repo.get_addresses(second.contact_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn new_lookup_type_gets_an_id() {
        let repo = SqliteContactRepository::open_in_memory().unwrap();
        let mut contact = Contact::new("Jane", "Doe", "jane@example.com");
        contact.phones.push(Phone::new("555-0199", Some(PhoneType::new(0, "Fax"))));

        let saved = repo.save(&contact).await.unwrap().unwrap();
        let phone_type = saved.phones[0].phone_type.clone().unwrap();
        assert_ne!(phone_type.phone_type_id, 0);
        assert_eq!(phone_type.name, "Fax");
    }

    #[tokio::test]
    async fn saving_a_contact_never_renames_a_shared_type() {
        let repo = SqliteContactRepository::open_in_memory().unwrap();
        let first = repo.save(&sample_contact()).await.unwrap().unwrap();

        let mut other = Contact::new("Jane", "Doe", "jane@example.com");
        other.phones.push(Phone::new("555-0142", Some(PhoneType::new(1, "Pager"))));
        let other = repo.save(&other).await.unwrap().unwrap();

        let expected = Some(PhoneType::new(1, "Mobile"));
        assert_eq!(other.phones[0].phone_type, expected);
        let reloaded = repo.get(first.contact_id).await.unwrap().unwrap();
        assert_eq!(reloaded.phones[0].phone_type, expected);
    }

    #[tokio::test]
    async fn copy_of_loaded_contact_saves_as_new() {
        let repo = SqliteContactRepository::open_in_memory().unwrap();
        let original = repo.save(&sample_contact()).await.unwrap().unwrap();

        let mut copy = repo.get(original.contact_id).await.unwrap().unwrap();
        copy.contact_id = 0;
        let saved = repo.save(&copy).await.unwrap().unwrap();

        assert_ne!(saved.contact_id, original.contact_id);
        assert_ne!(saved.phones[0].phone_id, original.phones[0].phone_id);
        assert_ne!(saved.addresses[0].address_id, original.addresses[0].address_id);
        assert_eq!(repo.get_phones(original.contact_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_keeps_own_child_ids_and_reassigns_foreign_ones() {
        let repo = SqliteContactRepository::open_in_memory().unwrap();
        let mut first = repo.save(&sample_contact()).await.unwrap().unwrap();
        let second = repo.save(&sample_contact()).await.unwrap().unwrap();
        let own_phone_id = first.phones[0].phone_id;
        let foreign_phone_id = second.phones[0].phone_id;

        let mut borrowed = second.phones[0].clone();
        borrowed.contact_id = first.contact_id;
        first.phones.push(borrowed);
        let updated = repo.save(&first).await.unwrap().unwrap();

        assert_eq!(updated.phones[0].phone_id, own_phone_id);
        assert_ne!(updated.phones[1].phone_id, foreign_phone_id);
        assert_eq!(repo.get_phones(first.contact_id).await.unwrap().len(), 2);
        let untouched = repo.get_phone(second.contact_id, foreign_phone_id).await.unwrap();
        assert_eq!(untouched.map(|p| p.contact_id), Some(second.contact_id));
    }
}
