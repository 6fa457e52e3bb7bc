use async_trait::async_trait;
use models::song::{self, SongFields};
use sea_orm::DatabaseConnection;

use super::domain::SongFilter;
use crate::errors::ServiceError;

/// Store capability the catalog depends on.
#[async_trait]
pub trait SongRepository: Send + Sync {
    async fn list(&self, filter: &SongFilter, offset: u64, limit: u64) -> Result<Vec<song::Model>, ServiceError>;
    /// `NotFound` if absent.
    async fn get(&self, id: i32) -> Result<song::Model, ServiceError>;
    async fn insert(&self, fields: SongFields) -> Result<song::Model, ServiceError>;
    /// Whole-record replace; `NotFound` if absent.
    async fn replace(&self, id: i32, fields: SongFields) -> Result<song::Model, ServiceError>;
    /// `NotFound` if absent.
    async fn delete(&self, id: i32) -> Result<(), ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmSongRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl SongRepository for SeaOrmSongRepository {
    async fn list(&self, filter: &SongFilter, offset: u64, limit: u64) -> Result<Vec<song::Model>, ServiceError> {
        crate::db::song_service::list_songs(&self.db, filter, offset, limit).await
    }

    async fn get(&self, id: i32) -> Result<song::Model, ServiceError> {
        crate::db::song_service::get_song(&self.db, id)
            .await?
            .ok_or_else(|| ServiceError::not_found("song"))
    }

    async fn insert(&self, fields: SongFields) -> Result<song::Model, ServiceError> {
        crate::db::song_service::create_song(&self.db, fields).await
    }

    async fn replace(&self, id: i32, fields: SongFields) -> Result<song::Model, ServiceError> {
        crate::db::song_service::replace_song(&self.db, id, fields).await
    }

    async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if crate::db::song_service::delete_song(&self.db, id).await? {
            Ok(())
        } else {
            Err(ServiceError::not_found("song"))
        }
    }
}

/// In-memory repository for tests and database-less runs
pub mod memory {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    struct State {
        songs: BTreeMap<i32, song::Model>, // ordered by id
        last_id: i32,
    }

    #[derive(Default)]
    pub struct InMemorySongRepository {
        state: Mutex<State>,
    }

    impl InMemorySongRepository {
        pub fn new() -> Self { Self::default() }

        fn state(&self) -> Result<MutexGuard<'_, State>, ServiceError> {
            self.state.lock().map_err(|_| ServiceError::Storage("in-memory song store poisoned".into()))
        }
    }

    #[async_trait]
    impl SongRepository for InMemorySongRepository {
        async fn list(&self, filter: &SongFilter, offset: u64, limit: u64) -> Result<Vec<song::Model>, ServiceError> {
            let state = self.state()?;
            let offset = usize::try_from(offset).unwrap_or(usize::MAX);
            let limit = usize::try_from(limit).unwrap_or(usize::MAX);
            Ok(state
                .songs
                .values()
                .filter(|s| filter.matches(s))
                .skip(offset)
                .take(limit)
                .cloned()
                .collect())
        }

        async fn get(&self, id: i32) -> Result<song::Model, ServiceError> {
            let state = self.state()?;
            state.songs.get(&id).cloned().ok_or_else(|| ServiceError::not_found("song"))
        }

        async fn insert(&self, fields: SongFields) -> Result<song::Model, ServiceError> {
            song::validate(&fields)?;
            let mut state = self.state()?;
            let id = state
                .last_id
                .checked_add(1)
                .ok_or_else(|| ServiceError::Storage("song id space exhausted".into()))?;
            state.last_id = id;
            let model = song::Model::from_fields(id, fields);
            state.songs.insert(id, model.clone());
            Ok(model)
        }

        async fn replace(&self, id: i32, fields: SongFields) -> Result<song::Model, ServiceError> {
            let mut state = self.state()?;
            let slot = state.songs.get_mut(&id).ok_or_else(|| ServiceError::not_found("song"))?;
            *slot = song::Model::from_fields(id, fields);
            Ok(slot.clone())
        }

        async fn delete(&self, id: i32) -> Result<(), ServiceError> {
            let mut state = self.state()?;
            state.songs.remove(&id).map(|_| ()).ok_or_else(|| ServiceError::not_found("song"))
        }
    }
}
