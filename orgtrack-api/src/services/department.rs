//! Department service.

use orgtrack_shared::error::DaoError;
use orgtrack_shared::models::department::Department;
use sqlx::PgPool;

use crate::dto::DepartmentDto;
use crate::mapper;
use crate::services::ServiceError;

/// CRUD orchestration for departments.
#[derive(Clone)]
pub struct DepartmentService {
    pool: PgPool,
}

impl DepartmentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns all departments with their user and task lists.
    pub async fn get_all(&self) -> Result<Vec<DepartmentDto>, ServiceError> {
        let departments = Department::list_all(&self.pool).await?;
        Ok(departments.iter().map(Self::to_dto).collect())
    }

    /// Returns one department, or `None` if the id is unknown.
    pub async fn get(&self, id: i64) -> Result<Option<DepartmentDto>, ServiceError> {
        let department = Department::find_by_id(&self.pool, id).await?;
        Ok(department.as_ref().map(Self::to_dto))
    }

    /// Creates a department and returns it freshly loaded.
    pub async fn create(&self, dto: &DepartmentDto) -> Result<DepartmentDto, ServiceError> {
        let id = Department::create(&self.pool, mapper::new_department(dto)).await?;

        self.get(id)
            .await?
            .ok_or_else(|| ServiceError::Dao(DaoError::not_found("department", id)))
    }

    /// Renames a department. The id always comes from the path, never the body.
    pub async fn update(&self, id: i64, dto: &DepartmentDto) -> Result<(), ServiceError> {
        Department::update(&self.pool, id, mapper::update_department(dto)).await?;
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        Department::delete(&self.pool, id).await?;
        Ok(())
    }

    /// Shallow map plus nested-collection backfill. Children carry their
    /// own shallow department and nothing below it.
    fn to_dto(department: &Department) -> DepartmentDto {
        let mut dto = mapper::department_to_dto(department);

        dto.user_list = department
            .users
            .iter()
            .map(|user| {
                let mut child = mapper::user_to_dto(user);
                child.department = Some(mapper::department_to_dto(&user.department));
                child
            })
            .collect();

        dto.task_list = department
            .tasks
            .iter()
            .map(|task| {
                let mut child = mapper::task_to_dto(task);
                child.department = Some(mapper::department_to_dto(&task.department));
                child
            })
            .collect();

        dto
    }
}
