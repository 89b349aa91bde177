//! Repository for the `users` table.

use records_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, User, UserProfile};

const COLUMNS: &str = "id, username, email, role, department_id, created_at, updated_at";

pub struct UserRepo;

impl UserRepo {
    /// Insert a new user. `role` defaults to `student`.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, email, role, department_id)
             VALUES ($1, $2, COALESCE($3, 'student'), $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.role)
            .bind(input.department_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user joined with their department name and acronym.
    pub async fn find_profile(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<UserProfile>, sqlx::Error> {
        sqlx::query_as::<_, UserProfile>(
            "SELECT u.id, u.username, u.email, u.role,
                    d.name AS department_name, d.acronym AS department_acronym
             FROM users u
             LEFT JOIN departments d ON d.id = u.department_id
             WHERE u.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Look up a department id by acronym (e.g. `CSE`).
    pub async fn department_id_by_acronym(
        pool: &PgPool,
        acronym: &str,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("SELECT id FROM departments WHERE acronym = $1")
            .bind(acronym)
            .fetch_optional(pool)
            .await
    }
}
