pub mod analyzer;
pub mod handlers;
pub mod index;
pub mod projector;
pub mod service;
pub mod stemmer;
