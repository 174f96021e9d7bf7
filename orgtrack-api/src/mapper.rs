//! Entity / DTO conversions.
//!
//! Entity-to-DTO mapping here is shallow: collections come back empty and
//! embedded departments are left out. Services backfill nested structure
//! from what the entity actually carries.
//!
//! DTO-to-input mapping validates the fields a write needs; a missing one
//! surfaces as [`MapError::MissingField`] and becomes a 400 upstream.

use orgtrack_shared::models::department::{Department, NewDepartment, UpdateDepartment};
use orgtrack_shared::models::task::{NewTask, Task, TaskAssignee, UpdateTask};
use orgtrack_shared::models::user::{NewUser, UpdateUser, User};
use thiserror::Error;

use crate::dto::{DepartmentDto, TaskDto, UserDto};

/// Mapping failure: a write body is missing a field the entity requires.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// Maps a department entity to its DTO, without collections.
pub fn department_to_dto(department: &Department) -> DepartmentDto {
    DepartmentDto {
        department_id: Some(department.id),
        department_name: department.name.clone(),
        user_list: Vec::new(),
        task_list: Vec::new(),
    }
}

/// Maps a task entity to its DTO, without department or assignees.
pub fn task_to_dto(task: &Task) -> TaskDto {
    TaskDto {
        task_id: Some(task.id),
        task_name: task.name.clone(),
        department: None,
        user_list: Vec::new(),
    }
}

/// Maps a user entity to its DTO, without department or assignments.
pub fn user_to_dto(user: &User) -> UserDto {
    UserDto {
        user_id: Some(user.id),
        user_firstname: user.first_name.clone(),
        user_lastname: user.last_name.clone(),
        department: None,
        task_list: Vec::new(),
    }
}

pub fn new_department(dto: &DepartmentDto) -> NewDepartment {
    NewDepartment {
        name: dto.department_name.clone(),
    }
}

pub fn update_department(dto: &DepartmentDto) -> UpdateDepartment {
    UpdateDepartment {
        name: dto.department_name.clone(),
    }
}

/// Builds a task insert from its DTO.
///
/// The owning department id is required. Requested assignees come from the
/// body's `user_list`; each needs its own id and department id so the
/// data layer can decide which assignments to keep.
pub fn new_task(dto: &TaskDto) -> Result<NewTask, MapError> {
    let department_id = require_department_id(dto.department.as_ref(), "department")?;

    let assignees = dto
        .user_list
        .iter()
        .map(assignee_from_dto)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(NewTask {
        name: dto.task_name.clone(),
        department_id,
        assignees,
    })
}

pub fn update_task(dto: &TaskDto) -> Result<UpdateTask, MapError> {
    Ok(UpdateTask {
        name: dto.task_name.clone(),
        department_id: require_department_id(dto.department.as_ref(), "department")?,
    })
}

pub fn new_user(dto: &UserDto) -> Result<NewUser, MapError> {
    Ok(NewUser {
        first_name: dto.user_firstname.clone(),
        last_name: dto.user_lastname.clone(),
        department_id: require_department_id(dto.department.as_ref(), "department")?,
    })
}

pub fn update_user(dto: &UserDto) -> Result<UpdateUser, MapError> {
    Ok(UpdateUser {
        first_name: dto.user_firstname.clone(),
        last_name: dto.user_lastname.clone(),
        department_id: require_department_id(dto.department.as_ref(), "department")?,
    })
}

fn assignee_from_dto(user: &UserDto) -> Result<TaskAssignee, MapError> {
    Ok(TaskAssignee {
        user_id: user.user_id.ok_or(MapError::MissingField("user_list.user_id"))?,
        department_id: require_department_id(user.department.as_ref(), "user_list.department")?,
    })
}

fn require_department_id(
    department: Option<&DepartmentDto>,
    field: &'static str,
) -> Result<i64, MapError> {
    department
        .and_then(|d| d.department_id)
        .ok_or(MapError::MissingField(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn department_dto(id: i64) -> DepartmentDto {
        DepartmentDto {
            department_id: Some(id),
            department_name: "Engineering".to_string(),
            user_list: Vec::new(),
            task_list: Vec::new(),
        }
    }

    #[test]
    fn test_department_to_dto_is_shallow() {
        let mut department = Department::shallow(4, "Engineering".to_string());
        department.users.push(User {
            id: 9,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            department: Department::shallow(4, "Engineering".to_string()),
            tasks: Vec::new(),
        });

        let dto = department_to_dto(&department);
        assert_eq!(dto.department_id, Some(4));
        assert_eq!(dto.department_name, "Engineering");
        assert!(dto.user_list.is_empty());
    }

    #[test]
    fn test_new_task_requires_department() {
        let dto = TaskDto {
            task_id: None,
            task_name: "Ship it".to_string(),
            department: None,
            user_list: Vec::new(),
        };

        assert_eq!(new_task(&dto), Err(MapError::MissingField("department")));
    }

    #[test]
    fn test_new_task_collects_assignees() {
        let dto = TaskDto {
            task_id: None,
            task_name: "Ship it".to_string(),
            department: Some(department_dto(4)),
            user_list: vec![
                UserDto {
                    user_id: Some(9),
                    user_firstname: "Ada".to_string(),
                    user_lastname: "Lovelace".to_string(),
                    department: Some(department_dto(4)),
                    task_list: Vec::new(),
                },
                UserDto {
                    user_id: Some(11),
                    user_firstname: "Grace".to_string(),
                    user_lastname: "Hopper".to_string(),
                    department: Some(department_dto(7)),
                    task_list: Vec::new(),
                },
            ],
        };

        let new = new_task(&dto).unwrap();
        assert_eq!(new.department_id, 4);
        assert_eq!(new.assignees.len(), 2);
        assert_eq!(new.assignees[0], TaskAssignee { user_id: 9, department_id: 4 });
        assert_eq!(new.assignees[1], TaskAssignee { user_id: 11, department_id: 7 });
    }

    #[test]
    fn test_assignee_without_id_is_rejected() {
        let dto = TaskDto {
            task_id: None,
            task_name: "Ship it".to_string(),
            department: Some(department_dto(4)),
            user_list: vec![UserDto {
                user_id: None,
                user_firstname: "Ada".to_string(),
                user_lastname: "Lovelace".to_string(),
                department: Some(department_dto(4)),
                task_list: Vec::new(),
            }],
        };

        assert_eq!(new_task(&dto), Err(MapError::MissingField("user_list.user_id")));
    }

    #[test]
    fn test_new_user_requires_department() {
        let dto = UserDto {
            user_id: None,
            user_firstname: "Ada".to_string(),
            user_lastname: "Lovelace".to_string(),
            department: None,
            task_list: Vec::new(),
        };

        assert_eq!(new_user(&dto), Err(MapError::MissingField("department")));
    }
}
