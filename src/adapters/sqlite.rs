use crate::domain::model::{
    AuditStamp, Package, PackageDraft, ReceiverAddress, ReceptionMode, SenderAddress,
    ShippingMode, ShippingParty, ShippingType, WriteAck, COUNTRY_CODE_LENGTH, MAX_BARANGAY,
    MAX_CITY, MAX_CONTACT_NUMBER, MAX_EMAIL_ADDRESS, MAX_FULL_NAME, MAX_STATE_OR_PROVINCE,
    MAX_STREET_ADDRESS, MAX_USER_ID,
};
use crate::domain::ports::PackageStore;
use crate::utils::error::{IntakeError, Result};
use async_trait::async_trait;
use rusqlite::types::Type;
use rusqlite::{Connection, Row, ToSql};
use std::path::Path;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const IN_MEMORY: &str = ":memory:";

const SELECT_ALL_SQL: &str = "SELECT id, shipping_party, shipping_mode, shipping_type, \
     reception_mode, weight_in_kg, \
     sender_full_name, sender_contact_number, sender_email_address, sender_street_address, \
     sender_city, sender_state_province, sender_country_code, sender_postal_code, \
     receiver_full_name, receiver_contact_number, receiver_email_address, \
     receiver_street_address, receiver_barangay, receiver_city, receiver_state_province, \
     receiver_country_code, receiver_postal_code, \
     created_at, created_by_id, updated_at, updated_by_id, created_in_hub_id, is_archived \
     FROM packages ORDER BY id";

const INSERT_SQL: &str = "INSERT INTO packages (shipping_mode, shipping_type, reception_mode, \
     weight_in_kg, \
     sender_full_name, sender_contact_number, sender_email_address, sender_street_address, \
     sender_city, sender_state_province, sender_country_code, sender_postal_code, \
     receiver_full_name, receiver_contact_number, receiver_email_address, \
     receiver_street_address, receiver_barangay, receiver_city, receiver_state_province, \
     receiver_country_code, receiver_postal_code, \
     created_at, created_by_id, updated_at, updated_by_id, created_in_hub_id) \
     VALUES (:shipping_mode, :shipping_type, :reception_mode, :weight_in_kg, \
     :sender_full_name, :sender_contact_number, :sender_email_address, :sender_street_address, \
     :sender_city, :sender_state_province, :sender_country_code, :sender_postal_code, \
     :receiver_full_name, :receiver_contact_number, :receiver_email_address, \
     :receiver_street_address, :receiver_barangay, :receiver_city, :receiver_state_province, \
     :receiver_country_code, :receiver_postal_code, \
     :at, :user_id, :at, :user_id, :hub_id)";

// Full rewrite of every mutable column; created_at is never touched.
const UPDATE_SQL: &str = "UPDATE packages SET shipping_mode = :shipping_mode, \
     shipping_type = :shipping_type, reception_mode = :reception_mode, \
     weight_in_kg = :weight_in_kg, \
     sender_full_name = :sender_full_name, sender_contact_number = :sender_contact_number, \
     sender_email_address = :sender_email_address, \
     sender_street_address = :sender_street_address, sender_city = :sender_city, \
     sender_state_province = :sender_state_province, \
     sender_country_code = :sender_country_code, sender_postal_code = :sender_postal_code, \
     receiver_full_name = :receiver_full_name, \
     receiver_contact_number = :receiver_contact_number, \
     receiver_email_address = :receiver_email_address, \
     receiver_street_address = :receiver_street_address, \
     receiver_barangay = :receiver_barangay, receiver_city = :receiver_city, \
     receiver_state_province = :receiver_state_province, \
     receiver_country_code = :receiver_country_code, \
     receiver_postal_code = :receiver_postal_code, \
     created_in_hub_id = :hub_id, created_by_id = :user_id, \
     updated_at = :at, updated_by_id = :user_id \
     WHERE id = :id";

const DELETE_SQL: &str = "DELETE FROM packages WHERE id = ?1";

fn in_list(values: &[&str]) -> String {
    values
        .iter()
        .map(|value| format!("'{}'", value))
        .collect::<Vec<_>>()
        .join(", ")
}

fn bounded(column: &str, max: usize) -> String {
    format!(
        "{column} TEXT NOT NULL CHECK (length({column}) BETWEEN 1 AND {max})",
        column = column,
        max = max
    )
}

/// `CREATE TABLE` statement; CHECK constraints mirror the validation rules.
pub fn schema_sql() -> String {
    let columns = [
        "id INTEGER PRIMARY KEY AUTOINCREMENT".to_string(),
        format!(
            "shipping_party TEXT NOT NULL DEFAULT '{}' CHECK (shipping_party IN ({}))",
            ShippingParty::default(),
            in_list(ShippingParty::SUPPORTED)
        ),
        format!(
            "shipping_mode TEXT NOT NULL CHECK (shipping_mode IN ({}))",
            in_list(ShippingMode::SUPPORTED)
        ),
        format!(
            "shipping_type TEXT NOT NULL CHECK (shipping_type IN ({}))",
            in_list(ShippingType::SUPPORTED)
        ),
        format!(
            "reception_mode TEXT NOT NULL CHECK (reception_mode IN ({}))",
            in_list(ReceptionMode::SUPPORTED)
        ),
        "weight_in_kg REAL".to_string(),
        bounded("sender_full_name", MAX_FULL_NAME),
        bounded("sender_contact_number", MAX_CONTACT_NUMBER),
        bounded("sender_email_address", MAX_EMAIL_ADDRESS),
        bounded("sender_street_address", MAX_STREET_ADDRESS),
        bounded("sender_city", MAX_CITY),
        bounded("sender_state_province", MAX_STATE_OR_PROVINCE),
        format!(
            "sender_country_code TEXT NOT NULL CHECK (length(sender_country_code) = {})",
            COUNTRY_CODE_LENGTH
        ),
        "sender_postal_code INTEGER NOT NULL".to_string(),
        bounded("receiver_full_name", MAX_FULL_NAME),
        bounded("receiver_contact_number", MAX_CONTACT_NUMBER),
        bounded("receiver_email_address", MAX_EMAIL_ADDRESS),
        bounded("receiver_street_address", MAX_STREET_ADDRESS),
        bounded("receiver_barangay", MAX_BARANGAY),
        bounded("receiver_city", MAX_CITY),
        bounded("receiver_state_province", MAX_STATE_OR_PROVINCE),
        format!(
            "receiver_country_code TEXT NOT NULL CHECK (length(receiver_country_code) = {})",
            COUNTRY_CODE_LENGTH
        ),
        "receiver_postal_code INTEGER NOT NULL".to_string(),
        "created_at TEXT NOT NULL".to_string(),
        bounded("created_by_id", MAX_USER_ID),
        "updated_at TEXT NOT NULL".to_string(),
        bounded("updated_by_id", MAX_USER_ID),
        "created_in_hub_id INTEGER NOT NULL".to_string(),
        "is_archived INTEGER NOT NULL DEFAULT 0".to_string(),
    ];

    format!(
        "CREATE TABLE IF NOT EXISTS packages (\n    {}\n)",
        columns.join(",\n    ")
    )
}

/// SQLite-backed [`PackageStore`].
///
/// A single connection is shared behind a mutex and every statement runs on
/// tokio's blocking pool.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore").finish_non_exhaustive()
    }
}

impl SqliteStore {
    /// Opens (or creates) the database at `path` and ensures the schema exists.
    ///
    /// `":memory:"` opens a private in-memory database.
    pub fn open(path: &str, busy_timeout: Duration) -> Result<Self> {
        let conn = if path == IN_MEMORY {
            Connection::open_in_memory()?
        } else {
            if let Some(parent) = Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            Connection::open(path)?
        };
        conn.busy_timeout(busy_timeout)?;
        conn.execute_batch(&schema_sql())?;

        tracing::debug!("Opened package store at {}", path);
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::open(IN_MEMORY, Duration::from_millis(0))
    }

    async fn run<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| IntakeError::store_unavailable("connection lock poisoned"))?;
            op(&guard)
        })
        .await?
    }
}

fn column<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: String = row.get(idx)?;
    raw.parse::<T>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn package_from_row(row: &Row<'_>) -> rusqlite::Result<Package> {
    Ok(Package {
        id: row.get(0)?,
        shipping_party: column(row, 1)?,
        shipping_mode: column(row, 2)?,
        shipping_type: column(row, 3)?,
        reception_mode: column(row, 4)?,
        weight_in_kg: row.get(5)?,
        sender: SenderAddress {
            full_name: row.get(6)?,
            contact_number: row.get(7)?,
            email_address: row.get(8)?,
            street_address: row.get(9)?,
            city: row.get(10)?,
            state_or_province: row.get(11)?,
            country_code: row.get(12)?,
            postal_code: row.get(13)?,
        },
        receiver: ReceiverAddress {
            full_name: row.get(14)?,
            contact_number: row.get(15)?,
            email_address: row.get(16)?,
            street_address: row.get(17)?,
            barangay: row.get(18)?,
            city: row.get(19)?,
            state_or_province: row.get(20)?,
            country_code: row.get(21)?,
            postal_code: row.get(22)?,
        },
        created_at: row.get(23)?,
        created_by_id: row.get(24)?,
        updated_at: row.get(25)?,
        updated_by_id: row.get(26)?,
        created_in_hub_id: row.get(27)?,
        is_archived: row.get::<_, i64>(28)? != 0,
    })
}

/// Owned values for one write, bound by name.
struct WriteValues {
    draft: PackageDraft,
    weight: f64,
    shipping_mode: &'static str,
    shipping_type: &'static str,
    reception_mode: &'static str,
    stamp: AuditStamp,
}

impl WriteValues {
    fn new(draft: PackageDraft, stamp: AuditStamp) -> Self {
        Self {
            weight: draft.stored_weight(),
            shipping_mode: draft.shipping_mode.as_str(),
            shipping_type: draft.shipping_type.as_str(),
            reception_mode: draft.reception_mode.as_str(),
            draft,
            stamp,
        }
    }

    fn named(&self) -> Vec<(&'static str, &dyn ToSql)> {
        let sender = &self.draft.sender;
        let receiver = &self.draft.receiver;
        vec![
            (":shipping_mode", &self.shipping_mode as &dyn ToSql),
            (":shipping_type", &self.shipping_type as &dyn ToSql),
            (":reception_mode", &self.reception_mode as &dyn ToSql),
            (":weight_in_kg", &self.weight as &dyn ToSql),
            (":sender_full_name", &sender.full_name as &dyn ToSql),
            (":sender_contact_number", &sender.contact_number as &dyn ToSql),
            (":sender_email_address", &sender.email_address as &dyn ToSql),
            (":sender_street_address", &sender.street_address as &dyn ToSql),
            (":sender_city", &sender.city as &dyn ToSql),
            (":sender_state_province", &sender.state_or_province as &dyn ToSql),
            (":sender_country_code", &sender.country_code as &dyn ToSql),
            (":sender_postal_code", &sender.postal_code as &dyn ToSql),
            (":receiver_full_name", &receiver.full_name as &dyn ToSql),
            (":receiver_contact_number", &receiver.contact_number as &dyn ToSql),
            (":receiver_email_address", &receiver.email_address as &dyn ToSql),
            (":receiver_street_address", &receiver.street_address as &dyn ToSql),
            (":receiver_barangay", &receiver.barangay as &dyn ToSql),
            (":receiver_city", &receiver.city as &dyn ToSql),
            (":receiver_state_province", &receiver.state_or_province as &dyn ToSql),
            (":receiver_country_code", &receiver.country_code as &dyn ToSql),
            (":receiver_postal_code", &receiver.postal_code as &dyn ToSql),
            (":at", &self.stamp.at as &dyn ToSql),
            (":user_id", &self.stamp.user_id as &dyn ToSql),
            (":hub_id", &self.stamp.hub_id as &dyn ToSql),
        ]
    }
}

#[async_trait]
impl PackageStore for SqliteStore {
    async fn select_all(&self) -> Result<Vec<Package>> {
        self.run(|conn| {
            let mut stmt = conn.prepare(SELECT_ALL_SQL)?;
            let rows = stmt.query_map([], package_from_row)?;
            let packages = rows.collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(packages)
        })
        .await
    }

    async fn insert(&self, draft: PackageDraft, stamp: AuditStamp) -> Result<WriteAck> {
        let values = WriteValues::new(draft, stamp);
        self.run(move |conn| {
            let rows_affected = conn.execute(INSERT_SQL, values.named().as_slice())?;
            Ok(WriteAck {
                rows_affected,
                inserted_id: Some(conn.last_insert_rowid()),
            })
        })
        .await
    }

    async fn update(&self, id: i64, draft: PackageDraft, stamp: AuditStamp) -> Result<WriteAck> {
        let values = WriteValues::new(draft, stamp);
        self.run(move |conn| {
            let mut named = values.named();
            named.push((":id", &id as &dyn ToSql));
            let rows_affected = conn.execute(UPDATE_SQL, named.as_slice())?;
            Ok(WriteAck {
                rows_affected,
                inserted_id: None,
            })
        })
        .await
    }

    async fn delete(&self, id: i64) -> Result<WriteAck> {
        self.run(move |conn| {
            let rows_affected = conn.execute(DELETE_SQL, [id])?;
            Ok(WriteAck {
                rows_affected,
                inserted_id: None,
            })
        })
        .await
    }
}
