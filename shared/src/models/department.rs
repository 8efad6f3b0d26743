//! Department Model

use super::Employee;
use crate::error::FieldErrors;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MANAGER_NOT_MANAGER: &str = "The chosen Employee is not Manager.";

/// Department entity (部门)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Department {
    pub id: i64,
    pub name: String,
    /// One-to-one weak reference to an employee with position = manager
    pub manager_id: Option<i64>,
    pub description: String,
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Storage record written for create / update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentRecord {
    pub name: String,
    pub manager_id: Option<i64>,
    pub description: String,
}

impl DepartmentRecord {
    /// Entity-level rules; `manager` is the resolved `manager_id` row
    pub fn clean(&self, manager: Option<&Employee>) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if let Some(manager) = manager
            && !manager.is_manager()
        {
            errors.add("manager", MANAGER_NOT_MANAGER);
        }
        errors.into_result()
    }
}

impl From<&Department> for DepartmentRecord {
    fn from(department: &Department) -> Self {
        Self {
            name: department.name.clone(),
            manager_id: department.manager_id,
            description: department.description.clone(),
        }
    }
}
