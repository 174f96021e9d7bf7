//! Transfer objects used at the HTTP boundary.
//!
//! DTOs are flat JSON shapes distinct from the persistence entities; field
//! names follow the persisted column names. Ids are optional so request
//! bodies may omit them (POST bodies carry no id; the PUT path segment
//! overrides whatever the body says).
//!
//! Nesting is one level deep: a child embedded in a parent carries a
//! shallow department (empty collections) and never re-enters the parent.

use serde::{Deserialize, Serialize};

/// Department transfer object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DepartmentDto {
    /// Generated id; absent in create bodies
    #[serde(default)]
    pub department_id: Option<i64>,

    /// Department name
    pub department_name: String,

    /// Users belonging to this department
    #[serde(default)]
    pub user_list: Vec<UserDto>,

    /// Tasks owned by this department
    #[serde(default)]
    pub task_list: Vec<TaskDto>,
}

/// Task transfer object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskDto {
    /// Generated id; absent in create bodies
    #[serde(default)]
    pub task_id: Option<i64>,

    /// Task name
    pub task_name: String,

    /// Owning department; required when creating or updating a task
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<DepartmentDto>,

    /// Users assigned to this task
    #[serde(default)]
    pub user_list: Vec<UserDto>,
}

/// User transfer object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserDto {
    /// Generated id; absent in create bodies
    #[serde(default)]
    pub user_id: Option<i64>,

    /// First name
    pub user_firstname: String,

    /// Last name
    pub user_lastname: String,

    /// Owning department; required when creating or updating a user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<DepartmentDto>,

    /// Tasks assigned to this user
    #[serde(default)]
    pub task_list: Vec<TaskDto>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_body_without_id_deserializes() {
        let dto: DepartmentDto =
            serde_json::from_str(r#"{"department_name":"Engineering"}"#).unwrap();

        assert!(dto.department_id.is_none());
        assert_eq!(dto.department_name, "Engineering");
        assert!(dto.user_list.is_empty());
        assert!(dto.task_list.is_empty());
    }

    #[test]
    fn test_absent_department_is_skipped_in_serialization() {
        let dto = UserDto {
            user_id: Some(1),
            user_firstname: "Ada".to_string(),
            user_lastname: "Lovelace".to_string(),
            department: None,
            task_list: Vec::new(),
        };

        let json = serde_json::to_value(&dto).unwrap();
        assert!(json.get("department").is_none());
        assert_eq!(json["task_list"], serde_json::json!([]));
    }

    #[test]
    fn test_task_body_with_department_deserializes() {
        let dto: TaskDto = serde_json::from_str(
            r#"{"task_name":"Ship it","department":{"department_id":3,"department_name":"Engineering"}}"#,
        )
        .unwrap();

        assert!(dto.task_id.is_none());
        assert_eq!(dto.task_name, "Ship it");
        assert_eq!(dto.department.unwrap().department_id, Some(3));
        assert!(dto.user_list.is_empty());
    }
}
