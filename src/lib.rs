pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::config::Config;
use crate::error::Result;
use crate::middleware::session::SessionKeys;
use crate::repositories::{
    candidate_repository::{CandidateRepository, MemoryCandidateRepository, PgCandidateRepository},
    city_repository::{CityRepository, MemoryCityRepository, PgCityRepository},
    file_repository::{FileRepository, MemoryFileRepository, PgFileRepository},
    user_repository::{MemoryUserRepository, PgUserRepository, UserRepository},
    vacancy_repository::{MemoryVacancyRepository, PgVacancyRepository, VacancyRepository},
};
use crate::services::{
    candidate_service::CandidateService, city_service::CityService, file_service::FileService,
    user_service::UserService, vacancy_service::VacancyService,
};

const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageMode {
    Postgres,
    Memory,
}

impl StorageMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageMode::Postgres => "postgres",
            StorageMode::Memory => "memory",
        }
    }
}

/// One implementation per repository trait; picked once at startup.
pub struct Repositories {
    pub candidates: Arc<dyn CandidateRepository>,
    pub vacancies: Arc<dyn VacancyRepository>,
    pub cities: Arc<dyn CityRepository>,
    pub users: Arc<dyn UserRepository>,
    pub files: Arc<dyn FileRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            candidates: Arc::new(PgCandidateRepository::new(pool.clone())),
            vacancies: Arc::new(PgVacancyRepository::new(pool.clone())),
            cities: Arc::new(PgCityRepository::new(pool.clone())),
            users: Arc::new(PgUserRepository::new(pool.clone())),
            files: Arc::new(PgFileRepository::new(pool)),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            candidates: Arc::new(MemoryCandidateRepository::new()),
            vacancies: Arc::new(MemoryVacancyRepository::new()),
            cities: Arc::new(MemoryCityRepository::new()),
            users: Arc::new(MemoryUserRepository::new()),
            files: Arc::new(MemoryFileRepository::new()),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub storage: StorageMode,
    pub candidate_service: CandidateService,
    pub vacancy_service: VacancyService,
    pub city_service: CityService,
    pub user_service: UserService,
    pub file_service: FileService,
    pub session: SessionKeys,
}

impl AppState {
    pub fn new(storage: StorageMode, repositories: Repositories, config: &Config) -> Result<Self> {
        let file_service = FileService::new(repositories.files, config.file_directory.clone())?;
        let candidate_service = CandidateService::new(repositories.candidates, file_service.clone());
        let vacancy_service = VacancyService::new(repositories.vacancies, file_service.clone());
        let city_service = CityService::new(repositories.cities);
        let user_service = UserService::new(repositories.users);
        let session = SessionKeys::new(&config.session_secret, config.session_ttl_hours);

        Ok(Self {
            storage,
            candidate_service,
            vacancy_service,
            city_service,
            user_service,
            file_service,
            session,
        })
    }

    pub fn postgres(pool: PgPool, config: &Config) -> Result<Self> {
        Self::new(StorageMode::Postgres, Repositories::postgres(pool), config)
    }

    pub fn in_memory(config: &Config) -> Result<Self> {
        Self::new(StorageMode::Memory, Repositories::in_memory(), config)
    }
}

pub fn create_router(state: AppState, config: &Config) -> Router {
    let candidate_routes = Router::new()
        .route("/candidates", get(routes::candidate::list_candidates))
        .route(
            "/candidates/create",
            get(routes::candidate::creation_page).post(routes::candidate::create_candidate),
        )
        .route("/candidates/update", post(routes::candidate::update_candidate))
        .route("/candidates/delete/:id", get(routes::candidate::delete_candidate))
        .route("/candidates/:id", get(routes::candidate::get_candidate));

    let vacancy_routes = Router::new()
        .route("/vacancies", get(routes::vacancy::list_vacancies))
        .route(
            "/vacancies/create",
            get(routes::vacancy::creation_page).post(routes::vacancy::create_vacancy),
        )
        .route("/vacancies/update", post(routes::vacancy::update_vacancy))
        .route("/vacancies/delete/:id", get(routes::vacancy::delete_vacancy))
        .route("/vacancies/:id", get(routes::vacancy::get_vacancy));

    let user_routes = Router::new()
        .route(
            "/users/register",
            get(routes::user::registration_page).post(routes::user::register),
        )
        .route(
            "/users/login",
            get(routes::user::login_page).post(routes::user::login),
        )
        .route("/users/logout", get(routes::user::logout));

    let base_routes = Router::new()
        .route("/", get(routes::index::index))
        .route("/index", get(routes::index::index))
        .route("/health", get(routes::health::health))
        .route("/files/:id", get(routes::file::get_file));

    let session = state.session.clone();

    base_routes
        .merge(candidate_routes)
        .merge(vacancy_routes)
        .merge(user_routes)
        .nest_service("/css", ServeDir::new(config.static_dir.join("css")))
        .nest_service("/js", ServeDir::new(config.static_dir.join("js")))
        .with_state(state)
        .layer(axum::middleware::from_fn_with_state(
            session,
            middleware::auth::require_session,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}
