//! Service layer providing the song catalog on top of models.
//! - Separates catalog logic (lyrics paging, filtered listing) from data access.
//! - Reuses validation and entity definitions in `models` crate.
//! - Store access goes through the `SongRepository` trait.

pub mod errors;
pub mod pagination;
pub mod db;
pub mod song;
#[cfg(test)]
pub mod test_support;
