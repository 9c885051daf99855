use crate::services::UserService;

/// Per-process state shared with handlers through `web::Data`.
#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
}

impl AppState {
    pub fn new(users: UserService) -> Self {
        Self { users }
    }
}
