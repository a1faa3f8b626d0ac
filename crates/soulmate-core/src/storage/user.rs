//! Typed account storage.

use crate::models::UserAccount;
use anyhow::Result;
use redb::Database;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct UserStorage {
    inner: soulmate_storage::UserStorage,
}

impl UserStorage {
    pub fn new(db: Arc<Database>) -> Result<Self> {
        Ok(Self {
            inner: soulmate_storage::UserStorage::new(db)?,
        })
    }

    /// Insert a new account; `false` when the e-mail is already registered.
    pub fn create(&self, account: &UserAccount) -> Result<bool> {
        let json = serde_json::to_vec(account)?;
        self.inner.create(&account.id, &account.email, &json)
    }

    pub fn get(&self, id: &str) -> Result<Option<UserAccount>> {
        match self.inner.get(id)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    pub fn get_by_email(&self, email: &str) -> Result<Option<UserAccount>> {
        match self.inner.get_by_email(email)? {
            Some((_, bytes)) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    pub fn email_exists(&self, email: &str) -> Result<bool> {
        Ok(self.inner.find_id_by_email(email)?.is_some())
    }

    /// All accounts, oldest first.
    pub fn list(&self) -> Result<Vec<UserAccount>> {
        let mut accounts = self
            .inner
            .list()?
            .into_iter()
            .map(|(_, bytes)| serde_json::from_slice::<UserAccount>(&bytes))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        accounts.sort_by_key(|a| a.created_at);
        Ok(accounts)
    }
}
