use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use models::song::{self, SongFields};
use serde::Deserialize;
use service::pagination::Pagination;
use service::song::domain::SongFilter;
use tracing::{error, info, warn};

use crate::{errors::JsonApiError, state::AppState};

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Exact group name
    pub group: Option<String>,
    /// Exact song title
    pub song: Option<String>,
    /// 1-based page, defaults to 1
    pub page: Option<String>,
    /// Page size, defaults to 10
    pub limit: Option<String>,
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LyricsQuery {
    /// 1-based page, required, >= 1
    pub page: Option<String>,
    /// Lines per page, required, >= 1
    pub limit: Option<String>,
}

/// Unparsable or missing numbers count as unset.
fn lenient_number(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.trim().parse::<u64>().ok()).unwrap_or(0)
}

#[utoipa::path(
    get, path = "/songs", tag = "songs",
    params(ListQuery),
    responses(
        (status = 200, description = "List OK", body = [crate::openapi::SongDoc]),
        (status = 500, description = "List Failed", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn list(State(state): State<AppState>, Query(q): Query<ListQuery>) -> Result<Json<Vec<song::Model>>, JsonApiError> {
    let group = q.group.as_deref().unwrap_or_default();
    let title = q.song.as_deref().unwrap_or_default();
    info!(%group, song = %title, "list_songs_request");

    let pagination = Pagination::new(lenient_number(q.page.as_deref()), lenient_number(q.limit.as_deref()));
    match state.songs.list(SongFilter::new(group, title), pagination).await {
        Ok(list) => { info!(count = list.len(), "listed songs"); Ok(Json(list)) }
        Err(e) => { error!(err = %e, "couldn't get songs"); Err(e.into()) }
    }
}

#[utoipa::path(
    get, path = "/songs/{id}", tag = "songs",
    params(("id" = i32, Path, description = "Song ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::SongDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn get(State(state): State<AppState>, id: Result<Path<i32>, PathRejection>) -> Result<Json<song::Model>, JsonApiError> {
    let Path(id) = id?;
    let found = state.songs.get(id).await?;
    Ok(Json(found))
}

#[utoipa::path(
    get, path = "/songs/{id}/lyrics", tag = "songs",
    params(("id" = i32, Path, description = "Song ID"), LyricsQuery),
    responses(
        (status = 200, description = "Lyric lines of the requested page", body = [String]),
        (status = 400, description = "Invalid page or limit", body = crate::openapi::ErrorResponseDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn lyrics(State(state): State<AppState>, id: Result<Path<i32>, PathRejection>, Query(q): Query<LyricsQuery>) -> Result<Json<Vec<String>>, JsonApiError> {
    let Path(id) = id?;
    let page = q.page.as_deref().unwrap_or_default();
    let limit = q.limit.as_deref().unwrap_or_default();
    info!(id, %page, %limit, "get_song_lyrics_request");

    match state.songs.lyrics_page(id, page, limit).await {
        Ok(lines) => { info!(id, lines = lines.len(), "retrieved song lyrics"); Ok(Json(lines)) }
        Err(e) => { warn!(id, err = %e, "error retrieving song lyrics"); Err(e.into()) }
    }
}

#[utoipa::path(
    post, path = "/songs", tag = "songs",
    request_body = crate::openapi::NewSongDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::SongDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorResponseDoc),
        (status = 502, description = "External API failure", body = crate::openapi::ErrorResponseDoc),
        (status = 500, description = "Create Failed", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn create(State(state): State<AppState>, input: Result<Json<SongFields>, JsonRejection>) -> Result<(StatusCode, Json<song::Model>), JsonApiError> {
    let Json(mut input) = input?;
    info!(group = %input.group_name, song = %input.title, "create_song_request");
    song::validate(&input).map_err(|e| JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some(e.to_string())))?;

    let detail = match state.details.fetch_detail(&input.group_name, &input.title).await {
        Ok(d) => d,
        Err(e) => { error!(err = %e, "song detail enrichment failed"); return Err(e.into()); }
    };
    input.release_date = detail.release_date;
    input.text = detail.text;
    input.link = detail.link;

    match state.songs.create(input).await {
        Ok(m) => { info!(id = m.id, group = %m.group_name, song = %m.title, "created song"); Ok((StatusCode::CREATED, Json(m))) }
        Err(e) => { error!(err = %e, "failed to create song"); Err(e.into()) }
    }
}

#[utoipa::path(
    put, path = "/songs/{id}", tag = "songs",
    params(("id" = i32, Path, description = "Song ID")),
    request_body = crate::openapi::SongInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::SongDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorResponseDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorResponseDoc),
        (status = 500, description = "Update Failed", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    input: Result<Json<SongFields>, JsonRejection>,
) -> Result<Json<song::Model>, JsonApiError> {
    let Path(id) = id?;
    let Json(input) = input?;
    info!(id, "update_song_request");
    match state.songs.update(id, input).await {
        Ok(m) => { info!(id = m.id, "updated song"); Ok(Json(m)) }
        Err(e) => { warn!(id, err = %e, "failed to update song"); Err(e.into()) }
    }
}

#[utoipa::path(
    delete, path = "/songs/{id}", tag = "songs",
    params(("id" = i32, Path, description = "Song ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorResponseDoc),
        (status = 500, description = "Delete Failed", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn delete(State(state): State<AppState>, id: Result<Path<i32>, PathRejection>) -> Result<StatusCode, JsonApiError> {
    let Path(id) = id?;
    info!(id, "delete_song_request");
    match state.songs.delete(id).await {
        Ok(()) => { info!(id, "deleted song"); Ok(StatusCode::NO_CONTENT) }
        Err(e) => { warn!(id, err = %e, "failed to delete song"); Err(e.into()) }
    }
}
