use std::sync::Arc;

use learnhub_core::application::LearnHubService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: LearnHubService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: LearnHubService) -> Self {
        Self { args, service }
    }
}
