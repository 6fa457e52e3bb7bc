use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use models::song::{self, Entity as SongEntity, SongFields};

use crate::errors::ServiceError;
use crate::song::domain::SongFilter;

/// List songs matching `filter`, ordered by id, skipping `offset` and returning at most `limit`.
pub async fn list_songs(db: &DatabaseConnection, filter: &SongFilter, offset: u64, limit: u64) -> Result<Vec<song::Model>, ServiceError> {
    let mut finder = SongEntity::find();
    if let Some(g) = &filter.group { finder = finder.filter(song::Column::GroupName.eq(g.as_str())); }
    if let Some(t) = &filter.title { finder = finder.filter(song::Column::Title.eq(t.as_str())); }
    let rows = finder
        .order_by_asc(song::Column::Id)
        .offset(offset)
        .limit(limit)
        .all(db)
        .await
        .map_err(|e| ServiceError::storage("list songs", e))?;
    Ok(rows)
}

/// Get a song by id.
pub async fn get_song(db: &DatabaseConnection, id: i32) -> Result<Option<song::Model>, ServiceError> {
    let found = SongEntity::find_by_id(id).one(db).await.map_err(|e| ServiceError::storage("get song", e))?;
    Ok(found)
}

/// Insert a song; the database assigns the id.
pub async fn create_song(db: &DatabaseConnection, fields: SongFields) -> Result<song::Model, ServiceError> {
    // validations are in models::song
    let created = song::create(db, fields).await?;
    Ok(created)
}

/// Replace every field of an existing song.
pub async fn replace_song(db: &DatabaseConnection, id: i32, fields: SongFields) -> Result<song::Model, ServiceError> {
    let current = SongEntity::find_by_id(id).one(db).await.map_err(|e| ServiceError::storage("replace song", e))?;
    let Some(existing) = current else { return Err(ServiceError::not_found("song")); };
    let mut am: song::ActiveModel = existing.into();
    fields.apply_to(&mut am);
    let updated = am.update(db).await.map_err(|e| ServiceError::storage("replace song", e))?;
    Ok(updated)
}

/// Delete a song; returns true if a row was removed.
pub async fn delete_song(db: &DatabaseConnection, id: i32) -> Result<bool, ServiceError> {
    let res = SongEntity::delete_by_id(id).exec(db).await.map_err(|e| ServiceError::storage("delete song", e))?;
    Ok(res.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    fn fields(group: &str, title: &str) -> SongFields {
        SongFields {
            group_name: group.into(),
            title: title.into(),
            release_date: "01.01.2001".into(),
            text: "l1\nl2".into(),
            link: "https://example.com".into(),
        }
    }

    #[tokio::test]
    async fn song_crud_service() -> Result<(), anyhow::Error> {
        let db = get_db().await?;

        let a = create_song(&db, fields("Muse", "Hysteria")).await?;
        let found = get_song(&db, a.id).await?.unwrap();
        assert_eq!(found, a);

        let replaced = replace_song(&db, a.id, fields("Muse", "Uprising")).await?;
        assert_eq!(replaced.id, a.id);
        assert_eq!(replaced.title, "Uprising");

        assert!(delete_song(&db, a.id).await?);
        assert!(get_song(&db, a.id).await?.is_none());
        assert!(!delete_song(&db, a.id).await?);

        Ok(())
    }

    #[tokio::test]
    async fn replace_missing_song_is_not_found() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let err = replace_song(&db, 4242, fields("Muse", "Hysteria")).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        Ok(())
    }

    #[tokio::test]
    async fn list_filters_orders_and_pages() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let mut muse = Vec::new();
        for title in ["Hysteria", "Madness", "Uprising"] {
            muse.push(create_song(&db, fields("Muse", title)).await?.id);
        }
        create_song(&db, fields("Queen", "Hysteria")).await?;

        let all = list_songs(&db, &SongFilter::default(), 0, 10).await?;
        assert_eq!(all.len(), 4);
        assert!(all.windows(2).all(|w| w[0].id < w[1].id));

        let by_group = list_songs(&db, &SongFilter::new("Muse", ""), 0, 10).await?;
        assert_eq!(by_group.iter().map(|s| s.id).collect::<Vec<_>>(), muse);

        let by_title = list_songs(&db, &SongFilter::new("", "Hysteria"), 0, 10).await?;
        assert_eq!(by_title.len(), 2);
        assert!(by_title.iter().all(|s| s.title == "Hysteria"));

        let both = list_songs(&db, &SongFilter::new("Queen", "Hysteria"), 0, 10).await?;
        assert_eq!(both.len(), 1);

        let second_page = list_songs(&db, &SongFilter::new("Muse", ""), 2, 2).await?;
        assert_eq!(second_page.iter().map(|s| s.id).collect::<Vec<_>>(), vec![muse[2]]);

        let past_end = list_songs(&db, &SongFilter::default(), 100, 10).await?;
        assert!(past_end.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn list_accepts_largest_normalized_bounds() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let a = create_song(&db, fields("Muse", "Hysteria")).await?;

        let (offset, limit) = crate::pagination::Pagination::new(1, u64::MAX).normalize();
        let all = list_songs(&db, &SongFilter::default(), offset, limit).await?;
        assert_eq!(all, vec![a]);

        let (offset, limit) = crate::pagination::Pagination::new(u64::MAX, u64::MAX).normalize();
        assert!(list_songs(&db, &SongFilter::default(), offset, limit).await?.is_empty());
        Ok(())
    }
}
