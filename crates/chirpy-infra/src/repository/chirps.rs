//! Chirp repository over the JSON document store.

use std::sync::Arc;

use chirpy_core::domain::{Chirp, SortDirection};
use chirpy_core::error::RepoError;
use chirpy_core::ports::{BodyFilter, ChirpRepository};

use crate::store::JsonFileStore;

pub struct JsonChirpRepository {
    store: Arc<JsonFileStore>,
    filter: Arc<dyn BodyFilter>,
}

impl JsonChirpRepository {
    pub fn new(store: Arc<JsonFileStore>, filter: Arc<dyn BodyFilter>) -> Self {
        Self { store, filter }
    }
}

impl ChirpRepository for JsonChirpRepository {
    fn create(&self, body: &str, author_id: i64) -> Result<Chirp, RepoError> {
        let body = self.filter.filter(body);

        let chirp = self
            .store
            .write(|doc| doc.insert_chirp(body, author_id))?;

        tracing::debug!(chirp_id = chirp.id, author_id, "Created chirp");
        Ok(chirp)
    }

    fn get(&self, id: i64) -> Result<Chirp, RepoError> {
        self.store.read(|doc| {
            doc.chirp(id)
                .cloned()
                .ok_or_else(|| RepoError::not_found("Chirp", id))
        })
    }

    fn list(&self) -> Result<Vec<Chirp>, RepoError> {
        let mut chirps = self
            .store
            .read(|doc| Ok::<_, RepoError>(doc.chirps().cloned().collect::<Vec<_>>()))?;
        SortDirection::Desc.sort(&mut chirps);
        Ok(chirps)
    }

    fn list_by_author(
        &self,
        author_id: i64,
        direction: SortDirection,
    ) -> Result<Vec<Chirp>, RepoError> {
        let mut chirps = self.store.read(|doc| {
            Ok::<_, RepoError>(
                doc.chirps()
                    .filter(|c| c.author_id == author_id)
                    .cloned()
                    .collect::<Vec<_>>(),
            )
        })?;
        direction.sort(&mut chirps);
        Ok(chirps)
    }

    fn delete(&self, id: i64, requester_id: i64) -> Result<(), RepoError> {
        self.store.write(|doc| -> Result<(), RepoError> {
            let chirp = doc
                .chirp(id)
                .ok_or_else(|| RepoError::not_found("Chirp", id))?;
            if chirp.author_id != requester_id {
                return Err(RepoError::Forbidden);
            }
            doc.remove_chirp(id);
            Ok(())
        })?;

        tracing::debug!(chirp_id = id, "Deleted chirp");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::thread;

    use tempfile::TempDir;

    use super::*;
    use crate::filter::ProfanityFilter;

    fn repo() -> (TempDir, JsonChirpRepository) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(JsonFileStore::open(dir.path().join("database.json")).unwrap());
        let repo = JsonChirpRepository::new(store, Arc::new(ProfanityFilter::default()));
        (dir, repo)
    }

    fn ids(chirps: &[Chirp]) -> Vec<i64> {
        chirps.iter().map(|c| c.id).collect()
    }

    #[test]
    fn test_create_filters_body() {
        let (_dir, repo) = repo();

        let chirp = repo.create("such a kerfuffle", 7).unwrap();

        assert_eq!(chirp.id, 1);
        assert_eq!(chirp.body, "such a ****");
        assert_eq!(chirp.author_id, 7);
        assert_eq!(repo.get(1).unwrap(), chirp);
    }

    #[test]
    fn test_create_accepts_any_length() {
        let (_dir, repo) = repo();
        let long = "x".repeat(10_000);

        assert_eq!(repo.create(&long, 1).unwrap().body, long);
        assert_eq!(repo.create("", 0).unwrap().body, "");
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let (_dir, repo) = repo();
        assert!(repo.get(42).unwrap_err().is_not_found());
    }

    #[test]
    fn test_list_newest_first() {
        let (_dir, repo) = repo();
        for body in ["one", "two", "three"] {
            repo.create(body, 1).unwrap();
        }

        assert_eq!(ids(&repo.list().unwrap()), vec![3, 2, 1]);
    }

    #[test]
    fn test_list_by_author_directions() {
        let (_dir, repo) = repo();
        repo.create("a1", 1).unwrap();
        repo.create("b1", 2).unwrap();
        repo.create("a2", 1).unwrap();
        repo.create("a3", 1).unwrap();

        let asc = repo.list_by_author(1, SortDirection::Asc).unwrap();
        let mut desc = repo.list_by_author(1, SortDirection::Desc).unwrap();

        assert_eq!(ids(&asc), vec![1, 3, 4]);
        desc.reverse();
        assert_eq!(desc, asc);
        assert!(repo.list_by_author(3, SortDirection::Asc).unwrap().is_empty());
    }

    #[test]
    fn test_delete_by_non_author_is_forbidden() {
        let (_dir, repo) = repo();
        let chirp = repo.create("mine", 1).unwrap();

        assert!(matches!(repo.delete(chirp.id, 2), Err(RepoError::Forbidden)));
        assert_eq!(repo.get(chirp.id).unwrap(), chirp);
    }

    #[test]
    fn test_delete_by_author() {
        let (_dir, repo) = repo();
        let chirp = repo.create("mine", 1).unwrap();

        repo.delete(chirp.id, 1).unwrap();

        assert!(repo.get(chirp.id).unwrap_err().is_not_found());
        assert!(repo.delete(chirp.id, 1).unwrap_err().is_not_found());
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let (_dir, repo) = repo();
        repo.create("one", 1).unwrap();
        let two = repo.create("two", 1).unwrap();
        repo.delete(two.id, 1).unwrap();

        let three = repo.create("three", 1).unwrap();
        assert_eq!(three.id, 3);
        assert_eq!(ids(&repo.list().unwrap()), vec![3, 1]);
    }

    #[test]
    fn test_concurrent_creates_keep_every_record() {
        let (_dir, repo) = repo();
        let repo = Arc::new(repo);
        let n = 32;

        let handles: Vec<_> = (0..n)
            .map(|i| {
                let repo = repo.clone();
                thread::spawn(move || repo.create(&format!("chirp {i}"), i).unwrap())
            })
            .collect();
        let created: Vec<Chirp> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        let listed = repo.list().unwrap();
        assert_eq!(listed.len(), n as usize);

        let distinct: HashSet<i64> = created.iter().map(|c| c.id).collect();
        assert_eq!(distinct.len(), n as usize);
        assert_eq!(listed.iter().map(|c| c.id).collect::<HashSet<_>>(), distinct);
    }
}
