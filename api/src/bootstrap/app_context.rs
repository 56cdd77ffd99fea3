use std::sync::Arc;

use crate::application::ports::department_repository::DepartmentRepository;
use crate::application::ports::feed_repository::FeedRepository;
use crate::application::ports::files_repository::FilesRepository;
use crate::application::ports::post_repository::PostRepository;
use crate::application::ports::storage_port::StoragePort;
use crate::application::ports::user_repository::UserRepository;
use crate::bootstrap::config::Config;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

#[derive(Clone)]
pub struct AppServices {
    user_repo: Arc<dyn UserRepository>,
    feed_repo: Arc<dyn FeedRepository>,
    post_repo: Arc<dyn PostRepository>,
    department_repo: Arc<dyn DepartmentRepository>,
    files_repo: Arc<dyn FilesRepository>,
    storage_port: Arc<dyn StoragePort>,
}

impl AppServices {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        feed_repo: Arc<dyn FeedRepository>,
        post_repo: Arc<dyn PostRepository>,
        department_repo: Arc<dyn DepartmentRepository>,
        files_repo: Arc<dyn FilesRepository>,
        storage_port: Arc<dyn StoragePort>,
    ) -> Self {
        Self {
            user_repo,
            feed_repo,
            post_repo,
            department_repo,
            files_repo,
            storage_port,
        }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn user_repo(&self) -> Arc<dyn UserRepository> {
        self.services.user_repo.clone()
    }

    pub fn feed_repo(&self) -> Arc<dyn FeedRepository> {
        self.services.feed_repo.clone()
    }

    pub fn post_repo(&self) -> Arc<dyn PostRepository> {
        self.services.post_repo.clone()
    }

    pub fn department_repo(&self) -> Arc<dyn DepartmentRepository> {
        self.services.department_repo.clone()
    }

    pub fn files_repo(&self) -> Arc<dyn FilesRepository> {
        self.services.files_repo.clone()
    }

    pub fn storage_port(&self) -> Arc<dyn StoragePort> {
        self.services.storage_port.clone()
    }
}
