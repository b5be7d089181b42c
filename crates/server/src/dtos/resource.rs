use crate::error::AppError;
use database::{
    entities::resources,
    services::{query_resource::ChapterWithResources, save_resource::AddedResource},
};
use models::resource::ResourceFields;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::non_blank;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ResourceScopeParams {
    /// Branch name, e.g. `CE`
    pub branch: Option<String>,
    /// Semester number
    pub semester: Option<String>,
}

impl ResourceScopeParams {
    /// The validated `(branch, semester)` pair
    pub fn scope(&self) -> Result<(&str, i32), AppError> {
        let (Some(branch), Some(semester)) = (non_blank(&self.branch), non_blank(&self.semester))
        else {
            return Err(AppError::validation("Branch and semester are required."));
        };

        Ok((branch, parse_semester(semester)?))
    }
}

/// A semester sent either as a JSON number or as numeric text
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum SemesterInput {
    Number(i64),
    Text(String),
}

impl SemesterInput {
    pub fn number(&self) -> Result<i32, AppError> {
        match self {
            SemesterInput::Number(n) => i32::try_from(*n).map_err(|_| semester_not_a_number()),
            SemesterInput::Text(text) => parse_semester(text),
        }
    }
}

fn parse_semester(text: &str) -> Result<i32, AppError> {
    text.trim().parse().map_err(|_| semester_not_a_number())
}

fn semester_not_a_number() -> AppError {
    AppError::validation("Semester must be a number.")
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddResourceRequest {
    pub branch: Option<String>,
    pub semester: Option<SemesterInput>,
    pub subject: Option<String>,
    pub chapter: Option<String>,
    pub resource: ResourceFields,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResourceRequest {
    pub chapter_id: Uuid,
    pub resource_id: Uuid,
    /// Wire fields to overwrite; unknown keys are ignored
    #[schema(value_type = Object)]
    pub updates: Map<String, Value>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ResourceResponse {
    pub id: Uuid,
    #[serde(flatten)]
    pub fields: ResourceFields,
}

impl From<&resources::Model> for ResourceResponse {
    fn from(model: &resources::Model) -> Self {
        Self {
            id: model.id,
            fields: ResourceFields::from(model),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubjectSummary {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChapterResponse {
    pub id: Uuid,
    pub name: String,
    pub subject: SubjectSummary,
    pub resources: Vec<ResourceResponse>,
}

impl From<ChapterWithResources> for ChapterResponse {
    fn from((chapter, resources): ChapterWithResources) -> Self {
        Self {
            id: chapter.id,
            name: chapter.name,
            subject: SubjectSummary {
                id: chapter.subject_id,
                name: chapter.subject_name,
            },
            resources: resources.iter().map(ResourceResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AddedResourceData {
    pub branch: String,
    pub semester: i32,
    pub subject: String,
    pub chapter: String,
    pub resource: ResourceResponse,
}

impl From<AddedResource> for AddedResourceData {
    fn from(added: AddedResource) -> Self {
        Self {
            branch: added.branch.name,
            semester: added.semester.number,
            subject: added.subject.name,
            chapter: added.chapter.name,
            resource: ResourceResponse::from(&added.resource),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AddResourceResponse {
    pub message: String,
    pub data: AddedResourceData,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UpdateResourceResponse {
    pub message: String,
    pub data: ResourceResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(branch: Option<&str>, semester: Option<&str>) -> ResourceScopeParams {
        ResourceScopeParams {
            branch: branch.map(str::to_string),
            semester: semester.map(str::to_string),
        }
    }

    #[test]
    fn test_scope() {
        assert_eq!(params(Some("CE"), Some(" 4 ")).scope().unwrap(), ("CE", 4));
        assert!(matches!(
            params(Some("CE"), None).scope(),
            Err(AppError::Validation(ref m)) if m == "Branch and semester are required."
        ));
        assert!(params(Some(" "), Some("4")).scope().is_err());
        assert!(matches!(
            params(Some("CE"), Some("fourth")).scope(),
            Err(AppError::Validation(ref m)) if m == "Semester must be a number."
        ));
    }

    #[test]
    fn test_semester_input() {
        let number: SemesterInput = serde_json::from_str("4").unwrap();
        let text: SemesterInput = serde_json::from_str("\"4\"").unwrap();

        assert_eq!(number.number().unwrap(), 4);
        assert_eq!(text.number().unwrap(), 4);
        assert!(SemesterInput::Text("IV".into()).number().is_err());
    }
}
