use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A course as exposed over the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub technology: Vec<String>,
}

/// A course as stored in the `courses` table. `technology` holds a JSON array.
#[derive(Debug, Clone, FromRow)]
pub struct CourseRow {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub technology: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCourseParams {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub technology: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCourseParams {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub technology: Option<Vec<String>>,
}

impl CreateCourseParams {
    pub fn is_empty(&self) -> bool {
        is_blank(&self.name, self.price, self.technology.as_deref())
    }
}

impl UpdateCourseParams {
    pub fn is_empty(&self) -> bool {
        is_blank(&self.name, self.price, self.technology.as_deref())
    }
}

// A missing or empty technology list counts as absent.
fn is_blank(name: &str, price: f64, technology: Option<&[String]>) -> bool {
    name.is_empty() || price == 0.0 || technology.is_none_or(<[String]>::is_empty)
}

pub fn encode_technology(technology: &[String]) -> Result<String, serde_json::Error> {
    serde_json::to_string(technology)
}

pub fn decode_technology(blob: &str) -> Result<Vec<String>, serde_json::Error> {
    serde_json::from_str(blob)
}

impl CourseRow {
    pub fn into_course(self) -> Result<Course, serde_json::Error> {
        let technology = decode_technology(&self.technology)?;
        Ok(Course {
            id: self.id,
            name: self.name,
            price: self.price,
            technology,
        })
    }
}
