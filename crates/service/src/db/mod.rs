//! SeaORM-backed data access functions.

pub mod song_service;
