//! Task model and database operations.
//!
//! A task belongs to exactly one department and holds the set of users
//! assigned to it via the `users_tasks` join table.
//!
//! Join rows are written only at creation time, and only for assignees
//! whose supplied department matches the task's department; assignees from
//! other departments are skipped. `update` does not resynchronize
//! assignments.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE tasks (
//!     task_id        BIGSERIAL PRIMARY KEY,
//!     task_name      VARCHAR(255) NOT NULL,
//!     departments_id BIGINT NOT NULL REFERENCES departments(department_id)
//! );
//!
//! CREATE TABLE users_tasks (
//!     user_id BIGINT NOT NULL REFERENCES users(user_id),
//!     task_id BIGINT NOT NULL REFERENCES tasks(task_id),
//!     PRIMARY KEY (user_id, task_id)
//! );
//! ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::debug;

use crate::error::DaoError;
use crate::models::department::Department;
use crate::models::user::User;

/// Task entity with its owning department and assigned users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Generated primary key
    pub id: i64,

    /// Task name
    pub name: String,

    /// Owning department (shallow: empty collections)
    pub department: Department,

    /// Users assigned to this task
    pub users: Vec<User>,
}

/// A user proposed for assignment at task creation.
///
/// The department id is the one supplied by the caller, not necessarily the
/// one stored for the user; eligibility is judged against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskAssignee {
    /// The user to assign
    pub user_id: i64,

    /// The department the caller claims the user belongs to
    pub department_id: i64,
}

/// Input for creating a new task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTask {
    /// Task name
    pub name: String,

    /// Owning department id
    pub department_id: i64,

    /// Proposed assignees; cross-department entries are skipped
    pub assignees: Vec<TaskAssignee>,
}

/// Input for updating an existing task.
///
/// Assignments are not touched by updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTask {
    /// Replacement name
    pub name: String,

    /// Replacement owning department id
    pub department_id: i64,
}

#[derive(sqlx::FromRow)]
struct TaskWithDepartmentRow {
    task_id: i64,
    task_name: String,
    department_id: i64,
    department_name: String,
}

#[derive(sqlx::FromRow)]
struct AssignedUserRow {
    user_id: i64,
    user_firstname: String,
    user_lastname: String,
}

/// Ids of the assignees eligible for a join row: only users whose supplied
/// department matches the task's department are linked.
pub fn eligible_assignees(department_id: i64, assignees: &[TaskAssignee]) -> Vec<i64> {
    assignees
        .iter()
        .filter(|a| a.department_id == department_id)
        .map(|a| a.user_id)
        .collect()
}

impl Task {
    /// Finds a task by id, with its department and assigned users.
    ///
    /// Returns `Ok(None)` if no such task exists.
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, DaoError> {
        let row = sqlx::query_as::<_, TaskWithDepartmentRow>(
            r#"
            SELECT t.task_id, t.task_name, d.department_id, d.department_name
            FROM tasks t JOIN departments d ON t.departments_id = d.department_id
            WHERE t.task_id = $1
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

    /// Lists all tasks with hydrated departments and assigned users.
    ///
    /// Assigned users are loaded with one query per task row.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, DaoError> {
        let rows = sqlx::query_as::<_, TaskWithDepartmentRow>(
            r#"
            SELECT t.task_id, t.task_name, d.department_id, d.department_name
            FROM tasks t JOIN departments d ON t.departments_id = d.department_id
            ORDER BY t.task_id
            "#,
        )
        .fetch_all(pool)
        .await?;

        let mut tasks = Vec::with_capacity(rows.len());
        for row in rows {
            tasks.push(Self::hydrate(pool, row).await?);
        }

        Ok(tasks)
    }

    async fn hydrate(pool: &PgPool, row: TaskWithDepartmentRow) -> Result<Self, DaoError> {
        let department = Department::shallow(row.department_id, row.department_name);

        let user_rows = sqlx::query_as::<_, AssignedUserRow>(
            r#"
            SELECT u.user_id, u.user_firstname, u.user_lastname
            FROM users_tasks ut JOIN users u ON ut.user_id = u.user_id
            WHERE ut.task_id = $1
            ORDER BY u.user_id
            "#,
        )
        .bind(row.task_id)
        .fetch_all(pool)
        .await?;

        // Assigned users embed the task's department, not their own.
        let users = user_rows
            .into_iter()
            .map(|u| User {
                id: u.user_id,
                first_name: u.user_firstname,
                last_name: u.user_lastname,
                department: department.clone(),
                tasks: Vec::new(),
            })
            .collect();

        Ok(Task {
            id: row.task_id,
            name: row.task_name,
            department,
            users,
        })
    }

    /// Creates a task and its eligible assignment rows in one transaction,
    /// returning the generated id.
    pub async fn create(pool: &PgPool, data: NewTask) -> Result<i64, DaoError> {
        let eligible = eligible_assignees(data.department_id, &data.assignees);
        if eligible.len() != data.assignees.len() {
            debug!(
                task_department = data.department_id,
                skipped = data.assignees.len() - eligible.len(),
                "Skipping assignees from other departments"
            );
        }

        let mut tx = pool.begin().await?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO tasks (task_name, departments_id)
            VALUES ($1, $2)
            RETURNING task_id
            "#,
        )
        .bind(&data.name)
        .bind(data.department_id)
        .fetch_one(&mut *tx)
        .await?;

        for user_id in eligible {
            let result = sqlx::query(
                r#"
                INSERT INTO users_tasks (user_id, task_id)
                VALUES ($1, $2)
                "#,
            )
            .bind(user_id)
            .bind(id)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                return Err(DaoError::WriteFailed("users_tasks"));
            }
        }

        tx.commit().await?;

        Ok(id)
    }

    /// Replaces the mutable columns of a task by primary key.
    ///
    /// Join-table membership is left as written at creation time.
    pub async fn update(pool: &PgPool, id: i64, data: UpdateTask) -> Result<(), DaoError> {
        let result = sqlx::query(
            r#"
            UPDATE tasks SET task_name = $1, departments_id = $2
            WHERE task_id = $3
            "#,
        )
        .bind(&data.name)
        .bind(data.department_id)
        .bind(id)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DaoError::not_found("task", id));
        }

        Ok(())
    }

    /// Deletes a task and its assignment rows in one transaction.
    ///
    /// A task with no assignment rows deletes cleanly.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<(), DaoError> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM users_tasks WHERE task_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM tasks WHERE task_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DaoError::not_found("task", id));
        }

        tx.commit().await?;

        Ok(())
    }
}
