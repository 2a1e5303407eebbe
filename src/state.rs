//! Shared state handed to every handler and middleware.

use std::sync::Arc;

use crate::application::services::{Authenticator, UserService};

/// Application state.
///
/// Collaborators are held behind trait objects so tests can swap in mocks.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    pub authenticator: Arc<dyn Authenticator>,
}

impl AppState {
    pub fn new(user_service: Arc<dyn UserService>, authenticator: Arc<dyn Authenticator>) -> Self {
        Self {
            user_service,
            authenticator,
        }
    }
}
