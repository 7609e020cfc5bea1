pub mod course;

pub use course::{Course, CourseRow, CreateCourseParams, UpdateCourseParams};
