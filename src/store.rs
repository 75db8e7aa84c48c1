use std::path::{Path, PathBuf};

use tokio::sync::Mutex;

use crate::error::{AppError, AppResult};
use crate::models::{Movie, NewMovie};

/// Sole owner of the on-disk movie collection: a single pretty-printed JSON
/// array, rewritten whole on every mutation. The file is re-read on every
/// operation rather than cached at startup, and writers within this process
/// are serialized by a lock. Writers in other processes are not coordinated;
/// single-process deployment is assumed.
pub struct MovieStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl MovieStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), write_lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Full collection in file order. A missing file reads as an empty
    /// collection so a fresh deployment works before the first create.
    pub async fn list(&self) -> AppResult<Vec<Movie>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// First record with a matching id, if any.
    pub async fn get(&self, id: i64) -> AppResult<Option<Movie>> {
        let movies = self.list().await?;
        Ok(movies.into_iter().find(|m| m.id == id))
    }

    /// Appends a record with the next id and rewrites the file. Ids are one
    /// greater than the current maximum and start at 1 on an empty
    /// collection; deleted ids are never reused unless the maximum itself
    /// was deleted.
    pub async fn create(&self, new: NewMovie) -> AppResult<Movie> {
        let _guard = self.write_lock.lock().await;

        let mut movies = self.list().await?;
        let next_id = movies.iter().map(|m| m.id).max().unwrap_or(0) + 1;
        let movie = new.into_movie(next_id);
        movies.push(movie.clone());
        self.persist(&movies).await?;

        tracing::debug!(id = movie.id, title = %movie.title, "created movie");
        Ok(movie)
    }

    /// Removes the record with the given id and rewrites the file, returning
    /// the remaining collection. Absence is detected by an existence check
    /// before filtering, so a failed delete leaves the file untouched.
    pub async fn delete(&self, id: i64) -> AppResult<Vec<Movie>> {
        let _guard = self.write_lock.lock().await;

        let mut movies = self.list().await?;
        if !movies.iter().any(|m| m.id == id) {
            return Err(AppError::NotFound);
        }
        movies.retain(|m| m.id != id);
        self.persist(&movies).await?;

        tracing::debug!(id, "deleted movie");
        Ok(movies)
    }

    /// Whole-file replace via a sibling temp file and rename, so readers
    /// never observe a half-written collection.
    async fn persist(&self, movies: &[Movie]) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let bytes = serde_json::to_vec_pretty(movies)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateMovie;

    fn new_movie(title: &str) -> NewMovie {
        CreateMovie {
            title: Some(title.to_string()),
            genres: Some(vec![crate::models::Genre { name: "Drama".to_string() }]),
            ..CreateMovie::default()
        }
        .validate()
        .unwrap()
    }

    fn temp_store(dir: &tempfile::TempDir) -> MovieStore {
        MovieStore::new(dir.path().join("movies.json"))
    }

    #[tokio::test]
    async fn empty_collection_starts_at_id_1() {
        let dir = tempfile::tempdir().unwrap();
        let store = temp_store(&dir);

        let movie = store.create(new_movie("First")).await.unwrap();
        assert_eq!(movie.id, 1);
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn ids_continue_from_the_maximum() {
        let dir = tempfile::tempdir().unwrap();
        let store = temp_store(&dir);

        let a = store.create(new_movie("A")).await.unwrap();
        let b = store.create(new_movie("B")).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));

        // Deleting below the maximum must not cause id reuse.
        store.delete(1).await.unwrap();
        let c = store.create(new_movie("C")).await.unwrap();
        assert_eq!(c.id, 3);
    }

    #[tokio::test]
    async fn id_assignment_skips_gaps() {
        let dir = tempfile::tempdir().unwrap();
        let store = temp_store(&dir);

        let movies =
            vec![new_movie("One").into_movie(1), new_movie("Seven").into_movie(7)];
        store.persist(&movies).await.unwrap();

        let movie = store.create(new_movie("Next")).await.unwrap();
        assert_eq!(movie.id, 8);
    }

    #[tokio::test]
    async fn get_after_create_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = temp_store(&dir);

        let created = store.create(new_movie("Heat")).await.unwrap();
        let fetched = store.get(created.id).await.unwrap().unwrap();
        assert_eq!(created, fetched);
    }

    #[tokio::test]
    async fn delete_then_get_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = temp_store(&dir);

        let a = store.create(new_movie("A")).await.unwrap();
        let b = store.create(new_movie("B")).await.unwrap();

        let remaining = store.delete(a.id).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, b.id);
        assert!(store.get(a.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_of_absent_id_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let store = temp_store(&dir);

        store.create(new_movie("Only")).await.unwrap();
        let before = tokio::fs::read(store.path()).await.unwrap();

        let err = store.delete(999).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound));

        let after = tokio::fs::read(store.path()).await.unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = temp_store(&dir);
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn persisted_file_round_trips_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = temp_store(&dir);

        for title in ["Alien", "Blade Runner", "Contact"] {
            store.create(new_movie(title)).await.unwrap();
        }

        let bytes = tokio::fs::read(store.path()).await.unwrap();
        let reparsed: Vec<Movie> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(reparsed, store.list().await.unwrap());
        assert_eq!(
            reparsed.iter().map(|m| m.title.as_str()).collect::<Vec<_>>(),
            vec!["Alien", "Blade Runner", "Contact"]
        );

        // Human-readable on disk.
        assert!(std::str::from_utf8(&bytes).unwrap().contains('\n'));
    }

    #[tokio::test]
    async fn corrupt_file_is_a_data_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = temp_store(&dir);
        tokio::fs::write(store.path(), b"not json").await.unwrap();

        assert!(matches!(store.list().await.unwrap_err(), AppError::Data(_)));
    }
}
