//! Task service.

use orgtrack_shared::error::DaoError;
use orgtrack_shared::models::task::Task;
use sqlx::PgPool;

use crate::dto::TaskDto;
use crate::mapper;
use crate::services::ServiceError;

/// CRUD orchestration for tasks.
#[derive(Clone)]
pub struct TaskService {
    pool: PgPool,
}

impl TaskService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns all tasks with their department and assigned users.
    pub async fn get_all(&self) -> Result<Vec<TaskDto>, ServiceError> {
        let tasks = Task::list_all(&self.pool).await?;
        Ok(tasks.iter().map(Self::to_dto).collect())
    }

    /// Returns one task, or `None` if the id is unknown.
    pub async fn get(&self, id: i64) -> Result<Option<TaskDto>, ServiceError> {
        let task = Task::find_by_id(&self.pool, id).await?;
        Ok(task.as_ref().map(Self::to_dto))
    }

    /// Creates a task (and assignment rows for same-department users in the
    /// body's `user_list`), returning it freshly loaded.
    pub async fn create(&self, dto: &TaskDto) -> Result<TaskDto, ServiceError> {
        let id = Task::create(&self.pool, mapper::new_task(dto)?).await?;

        self.get(id)
            .await?
            .ok_or_else(|| ServiceError::Dao(DaoError::not_found("task", id)))
    }

    /// Updates name and owning department. Assignments are not touched.
    pub async fn update(&self, id: i64, dto: &TaskDto) -> Result<(), ServiceError> {
        Task::update(&self.pool, id, mapper::update_task(dto)?).await?;
        Ok(())
    }

    /// Deletes a task together with its assignment rows.
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        Task::delete(&self.pool, id).await?;
        Ok(())
    }

    /// Shallow map plus department and assignee backfill.
    fn to_dto(task: &Task) -> TaskDto {
        let mut dto = mapper::task_to_dto(task);
        dto.department = Some(mapper::department_to_dto(&task.department));

        dto.user_list = task
            .users
            .iter()
            .map(|user| {
                let mut child = mapper::user_to_dto(user);
                child.department = Some(mapper::department_to_dto(&user.department));
                child
            })
            .collect();

        dto
    }
}
