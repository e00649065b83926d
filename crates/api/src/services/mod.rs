//! Business rules sitting between the HTTP handlers and storage.

pub mod character;

pub use character::CharacterService;
