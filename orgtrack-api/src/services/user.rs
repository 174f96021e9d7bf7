//! User service.

use orgtrack_shared::error::DaoError;
use orgtrack_shared::models::user::User;
use sqlx::PgPool;

use crate::dto::UserDto;
use crate::mapper;
use crate::services::ServiceError;

/// CRUD orchestration for users.
#[derive(Clone)]
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns all users with their department and assigned tasks.
    pub async fn get_all(&self) -> Result<Vec<UserDto>, ServiceError> {
        let users = User::list_all(&self.pool).await?;
        Ok(users.iter().map(Self::to_dto).collect())
    }

    /// Returns one user, or `None` if the id is unknown.
    pub async fn get(&self, id: i64) -> Result<Option<UserDto>, ServiceError> {
        let user = User::find_by_id(&self.pool, id).await?;
        Ok(user.as_ref().map(Self::to_dto))
    }

    /// Creates a user and returns it freshly loaded. No assignment rows are
    /// written here; those come from task creation.
    pub async fn create(&self, dto: &UserDto) -> Result<UserDto, ServiceError> {
        let id = User::create(&self.pool, mapper::new_user(dto)?).await?;

        self.get(id)
            .await?
            .ok_or_else(|| ServiceError::Dao(DaoError::not_found("user", id)))
    }

    /// Updates names and owning department. Assignments are not touched.
    pub async fn update(&self, id: i64, dto: &UserDto) -> Result<(), ServiceError> {
        User::update(&self.pool, id, mapper::update_user(dto)?).await?;
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        User::delete(&self.pool, id).await?;
        Ok(())
    }

    /// Shallow map plus department and assignment backfill.
    fn to_dto(user: &User) -> UserDto {
        let mut dto = mapper::user_to_dto(user);
        dto.department = Some(mapper::department_to_dto(&user.department));

        dto.task_list = user
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
