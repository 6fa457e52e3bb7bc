use std::sync::Arc;

use models::song::{self, SongFields};
use tracing::{debug, info, instrument};

use super::domain::SongFilter;
use super::repository::SongRepository;
use crate::errors::ServiceError;
use crate::pagination::{LyricsPage, Pagination};

/// Song catalog service: listing, lyrics paging and whole-record writes.
/// Holds no state of its own; consistency is the repository's concern.
pub struct SongService<R: SongRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: SongRepository + ?Sized> SongService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// List songs matching `filter`, ordered by id ascending.
    #[instrument(skip(self))]
    pub async fn list(&self, filter: SongFilter, pagination: Pagination) -> Result<Vec<song::Model>, ServiceError> {
        let (offset, limit) = pagination.normalize();
        let songs = self.repo.list(&filter, offset, limit).await?;
        debug!(count = songs.len(), offset, limit, "listed songs");
        Ok(songs)
    }

    pub async fn get(&self, id: i32) -> Result<song::Model, ServiceError> { self.repo.get(id).await }

    /// One page of a song's lyrics, split on newlines.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use models::song::SongFields;
    /// use service::song::{repository::memory::InMemorySongRepository, SongService};
    /// let svc = SongService::new(Arc::new(InMemorySongRepository::new()));
    /// let fields = SongFields { group_name: "Muse".into(), title: "Hysteria".into(), text: "a\nb\nc\nd\ne".into(), ..SongFields::default() };
    /// let song = tokio_test::block_on(svc.create(fields)).unwrap();
    /// let page = tokio_test::block_on(svc.lyrics_page(song.id, "2", "2")).unwrap();
    /// assert_eq!(page, vec!["c", "d"]);
    /// ```
    #[instrument(skip(self))]
    pub async fn lyrics_page(&self, id: i32, page: &str, limit: &str) -> Result<Vec<String>, ServiceError> {
        let song = self.repo.get(id).await?;
        let paging = LyricsPage::parse(page, limit)?;
        let lines = paging.apply(&song.text);
        debug!(song_id = id, page = paging.page(), limit = paging.limit(), lines = lines.len(), "lyrics page");
        Ok(lines)
    }

    #[instrument(skip(self, fields), fields(group = %fields.group_name, song = %fields.title))]
    pub async fn create(&self, fields: SongFields) -> Result<song::Model, ServiceError> {
        song::validate(&fields)?;
        let created = self.repo.insert(fields).await?;
        info!(song_id = created.id, "song_created");
        Ok(created)
    }

    /// Replace every field of song `id`.
    #[instrument(skip(self, fields))]
    pub async fn update(&self, id: i32, fields: SongFields) -> Result<song::Model, ServiceError> {
        song::validate(&fields)?;
        let updated = self.repo.replace(id, fields).await?;
        info!(song_id = id, "song_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        self.repo.delete(id).await?;
        info!(song_id = id, "song_deleted");
        Ok(())
    }
}
