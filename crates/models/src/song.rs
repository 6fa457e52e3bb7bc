use sea_orm::{entity::prelude::*, ActiveValue::NotSet, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};

use crate::errors;

/// Stored song. Wire names follow the public API (`group`, `song`, `releaseDate`).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "song")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[serde(rename = "group")]
    pub group_name: String,
    #[serde(rename = "song")]
    pub title: String,
    #[serde(rename = "releaseDate")]
    pub release_date: String,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    pub link: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Song contents without an identity; an unsaved song or the body of a replace.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongFields {
    #[serde(rename = "group", default)]
    pub group_name: String,
    #[serde(rename = "song", default)]
    pub title: String,
    #[serde(rename = "releaseDate", default)]
    pub release_date: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub link: String,
}

impl SongFields {
    /// Active model for insert; the id is left to the database.
    pub fn into_active_model(self) -> ActiveModel {
        ActiveModel {
            id: NotSet,
            group_name: Set(self.group_name),
            title: Set(self.title),
            release_date: Set(self.release_date),
            text: Set(self.text),
            link: Set(self.link),
        }
    }

    /// Overwrite every column of `am` with these fields.
    pub fn apply_to(self, am: &mut ActiveModel) {
        am.group_name = Set(self.group_name);
        am.title = Set(self.title);
        am.release_date = Set(self.release_date);
        am.text = Set(self.text);
        am.link = Set(self.link);
    }
}

impl Model {
    pub fn from_fields(id: i32, fields: SongFields) -> Self {
        Self {
            id,
            group_name: fields.group_name,
            title: fields.title,
            release_date: fields.release_date,
            text: fields.text,
            link: fields.link,
        }
    }

    pub fn fields(&self) -> SongFields {
        SongFields {
            group_name: self.group_name.clone(),
            title: self.title.clone(),
            release_date: self.release_date.clone(),
            text: self.text.clone(),
            link: self.link.clone(),
        }
    }
}

pub fn validate_group(group: &str) -> Result<(), errors::ModelError> {
    if group.trim().is_empty() {
        return Err(errors::ModelError::Validation("group required".into()));
    }
    Ok(())
}

pub fn validate_title(title: &str) -> Result<(), errors::ModelError> {
    if title.trim().is_empty() {
        return Err(errors::ModelError::Validation("song required".into()));
    }
    Ok(())
}

pub fn validate(fields: &SongFields) -> Result<(), errors::ModelError> {
    validate_group(&fields.group_name)?;
    validate_title(&fields.title)
}

pub async fn create(db: &DatabaseConnection, fields: SongFields) -> Result<Model, errors::ModelError> {
    validate(&fields)?;
    fields
        .into_active_model()
        .insert(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}
