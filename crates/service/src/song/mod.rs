//! Song catalog: domain filter, repository abstraction, application service.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::SongService;
