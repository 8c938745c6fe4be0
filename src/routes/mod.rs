pub mod candidate;
pub mod file;
pub mod form;
pub mod health;
pub mod index;
pub mod user;
pub mod vacancy;
