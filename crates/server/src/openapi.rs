use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
pub struct ErrorResponseDoc {
    pub error: String,
    pub detail: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct SongDoc {
    pub id: i32,
    pub group: String,
    pub song: String,
    #[serde(rename = "releaseDate")]
    pub release_date: String,
    pub text: String,
    pub link: String,
}

/// Create body; release date, lyrics and link come from the enrichment API.
#[derive(Serialize, ToSchema)]
pub struct NewSongDoc {
    pub group: String,
    pub song: String,
}

#[derive(Serialize, ToSchema)]
pub struct SongInputDoc {
    pub group: String,
    pub song: String,
    #[serde(rename = "releaseDate")]
    pub release_date: String,
    pub text: String,
    pub link: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::songs::list,
        crate::routes::songs::get,
        crate::routes::songs::lyrics,
        crate::routes::songs::create,
        crate::routes::songs::update,
        crate::routes::songs::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorResponseDoc,
            SongDoc,
            NewSongDoc,
            SongInputDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "songs")
    )
)]
pub struct ApiDoc;
