//! User account storage with a unique e-mail index.

use anyhow::{Result, anyhow};
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use std::sync::Arc;

const USERS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("users");
const EMAIL_INDEX_TABLE: TableDefinition<&str, &str> = TableDefinition::new("users:email_index");

/// Byte-level account storage.
///
/// E-mail addresses are expected to be normalized by the caller; the index
/// compares them byte for byte.
#[derive(Debug, Clone)]
pub struct UserStorage {
    db: Arc<Database>,
}

impl UserStorage {
    pub fn new(db: Arc<Database>) -> Result<Self> {
        let write_txn = db.begin_write()?;
        write_txn.open_table(USERS_TABLE)?;
        write_txn.open_table(EMAIL_INDEX_TABLE)?;
        write_txn.commit()?;

        Ok(Self { db })
    }

    /// Insert a new account.
    ///
    /// Returns `Ok(false)` without writing anything when the e-mail is
    /// already indexed. A duplicate id is an error.
    pub fn create(&self, id: &str, email: &str, data: &[u8]) -> Result<bool> {
        let write_txn = self.db.begin_write()?;

        {
            let mut email_index = write_txn.open_table(EMAIL_INDEX_TABLE)?;
            if email_index.get(email)?.is_some() {
                return Ok(false);
            }
            email_index.insert(email, id)?;
        }

        {
            let mut users = write_txn.open_table(USERS_TABLE)?;
            if users.get(id)?.is_some() {
                return Err(anyhow!("User {} already exists", id));
            }
            users.insert(id, data)?;
        }

        write_txn.commit()?;
        Ok(true)
    }

    pub fn get(&self, id: &str) -> Result<Option<Vec<u8>>> {
        let read_txn = self.db.begin_read()?;
        let users = read_txn.open_table(USERS_TABLE)?;
        Ok(users.get(id)?.map(|value| value.value().to_vec()))
    }

    /// Resolve an account id from its e-mail.
    pub fn find_id_by_email(&self, email: &str) -> Result<Option<String>> {
        let read_txn = self.db.begin_read()?;
        let email_index = read_txn.open_table(EMAIL_INDEX_TABLE)?;
        Ok(email_index.get(email)?.map(|value| value.value().to_string()))
    }

    pub fn get_by_email(&self, email: &str) -> Result<Option<(String, Vec<u8>)>> {
        let read_txn = self.db.begin_read()?;
        let email_index = read_txn.open_table(EMAIL_INDEX_TABLE)?;
        let Some(id) = email_index.get(email)?.map(|value| value.value().to_string()) else {
            return Ok(None);
        };

        let users = read_txn.open_table(USERS_TABLE)?;
        Ok(users
            .get(id.as_str())?
            .map(|value| (id.clone(), value.value().to_vec())))
    }

    pub fn list(&self) -> Result<Vec<(String, Vec<u8>)>> {
        let read_txn = self.db.begin_read()?;
        let users = read_txn.open_table(USERS_TABLE)?;

        let mut items = Vec::new();
        for row in users.iter()? {
            let (key, value) = row?;
            items.push((key.value().to_string(), value.value().to_vec()));
        }
        Ok(items)
    }
}
