//! Department model and database operations.
//!
//! A department owns its users and tasks (one-to-many each). Loading a
//! department issues a primary select plus one secondary select per child
//! collection; `list_all` repeats the child selects for every department
//! row.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE departments (
//!     department_id   BIGSERIAL PRIMARY KEY,
//!     department_name VARCHAR(255) NOT NULL
//! );
//! ```
//!
//! # Example
//!
//! ```no_run
//! use orgtrack_shared::models::department::{Department, NewDepartment};
//! use sqlx::PgPool;
//!
//! # async fn example(pool: PgPool) -> Result<(), orgtrack_shared::error::DaoError> {
//! let id = Department::create(&pool, NewDepartment { name: "Engineering".into() }).await?;
//!
//! let department = Department::find_by_id(&pool, id).await?.unwrap();
//! assert!(department.users.is_empty());
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::DaoError;
use crate::models::task::Task;
use crate::models::user::User;

/// Department entity with its member users and tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    /// Generated primary key
    pub id: i64,

    /// Department name
    pub name: String,

    /// Users belonging to this department
    pub users: Vec<User>,

    /// Tasks owned by this department
    pub tasks: Vec<Task>,
}

/// Input for creating a new department.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDepartment {
    /// Department name
    pub name: String,
}

/// Input for updating an existing department.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateDepartment {
    /// Replacement name
    pub name: String,
}

#[derive(sqlx::FromRow)]
struct DepartmentRow {
    department_id: i64,
    department_name: String,
}

#[derive(sqlx::FromRow)]
struct TaskRow {
    task_id: i64,
    task_name: String,
}

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: i64,
    user_firstname: String,
    user_lastname: String,
}

impl Department {
    /// Builds a department with empty collections, as embedded in children.
    pub fn shallow(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            users: Vec::new(),
            tasks: Vec::new(),
        }
    }

    /// Finds a department by id, hydrating its user and task collections.
    ///
    /// Returns `Ok(None)` if no such department exists.
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, DaoError> {
        let row = sqlx::query_as::<_, DepartmentRow>(
            r#"
            SELECT department_id, department_name
            FROM departments
            WHERE department_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        match row {
            Some(row) => Ok(Some(Self::hydrate(pool, row).await?)),
            None => Ok(None),
        }
    }

    /// Lists all departments with hydrated collections.
    ///
    /// Child collections are loaded with one query pair per department row.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, DaoError> {
        let rows = sqlx::query_as::<_, DepartmentRow>(
            r#"
            SELECT department_id, department_name
            FROM departments
            ORDER BY department_id
            "#,
        )
        .fetch_all(pool)
        .await?;

        let mut departments = Vec::with_capacity(rows.len());
        for row in rows {
            departments.push(Self::hydrate(pool, row).await?);
        }

        Ok(departments)
    }

    async fn hydrate(pool: &PgPool, row: DepartmentRow) -> Result<Self, DaoError> {
        let mut department = Department::shallow(row.department_id, row.department_name);

        let task_rows = sqlx::query_as::<_, TaskRow>(
            r#"
            SELECT task_id, task_name
            FROM tasks
            WHERE departments_id = $1
            ORDER BY task_id
            "#,
        )
        .bind(department.id)
        .fetch_all(pool)
        .await?;

        let user_rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, user_firstname, user_lastname
            FROM users
            WHERE department_id = $1
            ORDER BY user_id
            "#,
        )
        .bind(department.id)
        .fetch_all(pool)
        .await?;

        department.tasks = task_rows
            .into_iter()
            .map(|t| Task {
                id: t.task_id,
                name: t.task_name,
                department: Department::shallow(department.id, department.name.clone()),
                users: Vec::new(),
            })
            .collect();

        department.users = user_rows
            .into_iter()
            .map(|u| User {
                id: u.user_id,
                first_name: u.user_firstname,
                last_name: u.user_lastname,
                department: Department::shallow(department.id, department.name.clone()),
                tasks: Vec::new(),
            })
            .collect();

        Ok(department)
    }

    /// Creates a department and returns its generated id.
    pub async fn create(pool: &PgPool, data: NewDepartment) -> Result<i64, DaoError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO departments (department_name)
            VALUES ($1)
            RETURNING department_id
            "#,
        )
        .bind(&data.name)
        .fetch_one(pool)
        .await?;

        Ok(id)
    }

    /// Replaces the mutable columns of a department by primary key.
    pub async fn update(pool: &PgPool, id: i64, data: UpdateDepartment) -> Result<(), DaoError> {
        let result = sqlx::query(
            r#"
            UPDATE departments
            SET department_name = $1
            WHERE department_id = $2
            "#,
        )
        .bind(&data.name)
        .bind(id)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DaoError::not_found("department", id));
        }

        Ok(())
    }

    /// Deletes a department by primary key.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<(), DaoError> {
        let result = sqlx::query("DELETE FROM departments WHERE department_id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DaoError::not_found("department", id));
        }

        Ok(())
    }
}
