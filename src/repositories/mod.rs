//! Persistence per entity: a trait plus a PostgreSQL and an in-memory implementation.

pub mod candidate_repository;
pub mod city_repository;
pub mod file_repository;
pub mod memory;
pub mod user_repository;
pub mod vacancy_repository;
