//! User model and database operations.
//!
//! A user belongs to exactly one department and holds the set of tasks
//! assigned to them via the `users_tasks` join table. User creation and
//! update never write join rows; assignments come from task creation only.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE users (
//!     user_id        BIGSERIAL PRIMARY KEY,
//!     user_firstname VARCHAR(255) NOT NULL,
//!     user_lastname  VARCHAR(255) NOT NULL,
//!     department_id  BIGINT NOT NULL REFERENCES departments(department_id)
//! );
//! ```
//!
//! # Example
//!
//! ```no_run
//! use orgtrack_shared::models::user::{NewUser, User};
//! use sqlx::PgPool;
//!
//! # async fn example(pool: PgPool, department_id: i64) -> Result<(), orgtrack_shared::error::DaoError> {
//! let id = User::create(&pool, NewUser {
//!     first_name: "Grace".into(),
//!     last_name: "Hopper".into(),
//!     department_id,
//! }).await?;
//!
//! let user = User::find_by_id(&pool, id).await?.unwrap();
//! assert!(user.tasks.is_empty());
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::DaoError;
use crate::models::department::Department;
use crate::models::task::Task;

/// User entity with their owning department and assigned tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Generated primary key
    pub id: i64,

    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,

    /// Owning department (shallow: empty collections)
    pub department: Department,

    /// Tasks assigned to this user
    pub tasks: Vec<Task>,
}

/// Input for creating a new user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,

    /// Owning department id
    pub department_id: i64,
}

/// Input for updating an existing user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUser {
    /// Replacement first name
    pub first_name: String,

    /// Replacement last name
    pub last_name: String,

    /// Replacement owning department id
    pub department_id: i64,
}

#[derive(sqlx::FromRow)]
struct UserWithDepartmentRow {
    user_id: i64,
    user_firstname: String,
    user_lastname: String,
    department_id: i64,
    department_name: String,
}

#[derive(sqlx::FromRow)]
struct AssignedTaskRow {
    task_id: i64,
    task_name: String,
}

impl User {
    /// Finds a user by id, with their department and assigned tasks.
    ///
    /// Returns `Ok(None)` if no such user exists.
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, DaoError> {
        let row = sqlx::query_as::<_, UserWithDepartmentRow>(
            r#"
            SELECT u.user_id, u.user_firstname, u.user_lastname,
                   d.department_id, d.department_name
            FROM users u JOIN departments d ON u.department_id = d.department_id
            WHERE u.user_id = $1
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

    /// Lists all users with hydrated departments and assigned tasks.
    ///
    /// Assigned tasks are loaded with one query per user row.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, DaoError> {
        let rows = sqlx::query_as::<_, UserWithDepartmentRow>(
            r#"
            SELECT u.user_id, u.user_firstname, u.user_lastname,
                   d.department_id, d.department_name
            FROM users u JOIN departments d ON u.department_id = d.department_id
            ORDER BY u.user_id
            "#,
        )
        .fetch_all(pool)
        .await?;

        let mut users = Vec::with_capacity(rows.len());
        for row in rows {
            users.push(Self::hydrate(pool, row).await?);
        }

        Ok(users)
    }

    async fn hydrate(pool: &PgPool, row: UserWithDepartmentRow) -> Result<Self, DaoError> {
        let department = Department::shallow(row.department_id, row.department_name);

        let task_rows = sqlx::query_as::<_, AssignedTaskRow>(
            r#"
            SELECT t.task_id, t.task_name
            FROM tasks t JOIN users_tasks ut ON t.task_id = ut.task_id
            WHERE ut.user_id = $1
            ORDER BY t.task_id
            "#,
        )
        .bind(row.user_id)
        .fetch_all(pool)
        .await?;

        // Assigned tasks embed the user's department.
        let tasks = task_rows
            .into_iter()
            .map(|t| Task {
                id: t.task_id,
                name: t.task_name,
                department: department.clone(),
                users: Vec::new(),
            })
            .collect();

        Ok(User {
            id: row.user_id,
            first_name: row.user_firstname,
            last_name: row.user_lastname,
            department,
            tasks,
        })
    }

    /// Creates a user and returns the generated id.
    pub async fn create(pool: &PgPool, data: NewUser) -> Result<i64, DaoError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (user_firstname, user_lastname, department_id)
            VALUES ($1, $2, $3)
            RETURNING user_id
            "#,
        )
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(data.department_id)
        .fetch_one(pool)
        .await?;

        Ok(id)
    }

    /// Replaces the mutable columns of a user by primary key.
    ///
    /// Join-table membership is left untouched.
    pub async fn update(pool: &PgPool, id: i64, data: UpdateUser) -> Result<(), DaoError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET user_firstname = $1, user_lastname = $2, department_id = $3
            WHERE user_id = $4
            "#,
        )
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(data.department_id)
        .bind(id)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DaoError::not_found("user", id));
        }

        Ok(())
    }

    /// Deletes a user by primary key.
    ///
    /// Assignment rows are not removed first; a user still referenced from
    /// `users_tasks` fails the foreign key constraint.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<(), DaoError> {
        let result = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DaoError::not_found("user", id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_struct() {
        let new_user = NewUser {
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            department_id: 1,
        };

        assert_eq!(new_user.first_name, "Grace");
        assert_eq!(new_user.last_name, "Hopper");
        assert_eq!(new_user.department_id, 1);
    }

    // Database-backed tests live in tests/dao_tests.rs
}
