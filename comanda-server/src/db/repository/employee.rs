//! Employee Repository

use super::{BaseRepository, RepoResult, parse_ref};
use crate::db::models::{Employee, ROLE_WAITER};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "employee";

#[derive(Clone)]
pub struct EmployeeRepository {
    base: BaseRepository,
}

impl EmployeeRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all employees with the waiter role, the ones orders are assigned to
    pub async fn find_waiters(&self) -> RepoResult<Vec<Employee>> {
        let employees: Vec<Employee> = self
            .base
            .db()
            .query("SELECT * FROM employee WHERE role = $role ORDER BY name")
            .bind(("role", ROLE_WAITER))
            .await?
            .take(0)?;
        Ok(employees)
    }

    /// Find employee by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Employee>> {
        let thing = parse_ref(id, TABLE)?;
        let employee: Option<Employee> = self.base.db().select(thing).await?;
        Ok(employee)
    }
}
