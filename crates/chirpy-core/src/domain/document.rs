//! The persisted aggregate: every chirp and user in one document.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Deserializer, Serialize};

use super::{Chirp, User};
use crate::error::StoreError;

/// Last id handed out per collection.
///
/// Ids are taken from these counters rather than from the collection size,
/// so an id freed by a deletion is never assigned again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequences {
    #[serde(default)]
    pub chirps: i64,
    #[serde(default)]
    pub users: i64,
}

/// Lookup tables over `users`, rebuilt on decode and kept in step with every mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct UserIndex {
    by_email: HashMap<String, i64>,
    by_refresh_token: HashMap<String, i64>,
}

impl UserIndex {
    fn add(&mut self, user: &User) {
        self.by_email.entry(user.email.clone()).or_insert(user.id);
        if !user.refresh_token.is_empty() {
            self.by_refresh_token
                .entry(user.refresh_token.clone())
                .or_insert(user.id);
        }
    }

    fn remove(&mut self, user: &User) {
        if self.by_email.get(&user.email) == Some(&user.id) {
            self.by_email.remove(&user.email);
        }
        if self.by_refresh_token.get(&user.refresh_token) == Some(&user.id) {
            self.by_refresh_token.remove(&user.refresh_token);
        }
    }
}

/// The whole database: `{ chirps, users, sequences }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredDocument")]
pub struct Document {
    chirps: BTreeMap<i64, Chirp>,
    users: BTreeMap<i64, User>,
    sequences: Sequences,
    #[serde(skip)]
    index: UserIndex,
}

/// On-disk shape. Collections written as `null` read as empty and a missing
/// `sequences` object is derived from the stored ids.
#[derive(Deserialize)]
struct StoredDocument {
    #[serde(default, deserialize_with = "null_as_empty")]
    chirps: BTreeMap<i64, Chirp>,
    #[serde(default, deserialize_with = "null_as_empty")]
    users: BTreeMap<i64, User>,
    #[serde(default)]
    sequences: Sequences,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl From<StoredDocument> for Document {
    fn from(stored: StoredDocument) -> Self {
        let max_chirp = stored.chirps.keys().copied().max().unwrap_or(0);
        let max_user = stored.users.keys().copied().max().unwrap_or(0);

        let mut doc = Self {
            chirps: stored.chirps,
            users: stored.users,
            sequences: Sequences {
                chirps: stored.sequences.chirps.max(max_chirp),
                users: stored.sequences.users.max(max_user),
            },
            index: UserIndex::default(),
        };
        doc.reindex();
        doc
    }
}

impl Document {
    fn reindex(&mut self) {
        let mut index = UserIndex::default();
        for user in self.users.values() {
            index.add(user);
        }
        self.index = index;
    }

    pub fn sequences(&self) -> Sequences {
        self.sequences
    }

    // Chirps

    pub fn chirp(&self, id: i64) -> Option<&Chirp> {
        self.chirps.get(&id)
    }

    pub fn chirps(&self) -> impl Iterator<Item = &Chirp> {
        self.chirps.values()
    }

    pub fn chirp_count(&self) -> usize {
        self.chirps.len()
    }

    /// Store a new chirp under the next chirp id.
    pub fn insert_chirp(&mut self, body: String, author_id: i64) -> Result<Chirp, StoreError> {
        let id = next_id(&mut self.sequences.chirps, "chirps")?;
        let chirp = Chirp {
            id,
            body,
            author_id,
        };
        self.chirps.insert(chirp.id, chirp.clone());
        Ok(chirp)
    }

    pub fn remove_chirp(&mut self, id: i64) -> Option<Chirp> {
        self.chirps.remove(&id)
    }

    // Users

    pub fn user(&self, id: i64) -> Option<&User> {
        self.users.get(&id)
    }

    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Exact, case-sensitive email lookup.
    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.index
            .by_email
            .get(email)
            .and_then(|id| self.users.get(id))
    }

    /// Find the user currently holding `token`. Empty tokens match nobody.
    pub fn user_by_refresh_token(&self, token: &str) -> Option<&User> {
        if token.is_empty() {
            return None;
        }
        self.index
            .by_refresh_token
            .get(token)
            .and_then(|id| self.users.get(id))
    }

    /// Store a new user under the next user id. Uniqueness is the caller's check.
    pub fn insert_user(&mut self, email: String, password_hash: String) -> Result<User, StoreError> {
        let id = next_id(&mut self.sequences.users, "users")?;
        let user = User::new(id, email, password_hash);
        self.index.add(&user);
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    /// Apply `change` to a stored user, keeping the lookup tables in step.
    ///
    /// The id is restored after `change` runs, so records cannot be re-keyed.
    pub fn update_user<F>(&mut self, id: i64, change: F) -> Option<&User>
    where
        F: FnOnce(&mut User),
    {
        let user = self.users.get_mut(&id)?;
        self.index.remove(user);
        change(user);
        user.id = id;
        self.index.add(user);
        Some(user)
    }
}

fn next_id(sequence: &mut i64, collection: &'static str) -> Result<i64, StoreError> {
    *sequence = sequence
        .checked_add(1)
        .ok_or(StoreError::IdsExhausted { collection })?;
    Ok(*sequence)
}
