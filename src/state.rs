use std::sync::Arc;

use crate::db::CourseRepository;

#[derive(Clone)]
pub struct AppState {
    pub courses: Arc<dyn CourseRepository>,
}
