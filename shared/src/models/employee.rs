//! Employee Model

use super::Department;
use crate::error::FieldErrors;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Employee position (职位)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum Position {
    #[default]
    Employee,
    Manager,
}

impl Position {
    pub const ALL: [Position; 2] = [Position::Employee, Position::Manager];

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Employee => "employee",
            Position::Manager => "manager",
        }
    }

    /// Parse the wire value; only the exact lowercase names are accepted
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == value)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Employee entity (员工)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub position: Position,
    /// Weak reference, resolved by query
    pub department_id: Option<i64>,
}

impl Employee {
    pub fn is_manager(&self) -> bool {
        self.position == Position::Manager
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.position)
    }
}

/// Employee joined with its department columns (for list/detail views)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct EmployeeWithDepartment {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub position: Position,
    pub department_id: Option<i64>,
    pub department_name: Option<String>,
    pub department_manager_id: Option<i64>,
    pub department_description: Option<String>,
}

impl EmployeeWithDepartment {
    pub fn is_manager(&self) -> bool {
        self.position == Position::Manager
    }

    /// The joined department, if the employee has one
    pub fn department(&self) -> Option<Department> {
        let id = self.department_id?;
        Some(Department {
            id,
            name: self.department_name.clone().unwrap_or_default(),
            manager_id: self.department_manager_id,
            description: self.department_description.clone().unwrap_or_default(),
        })
    }
}

/// Storage record written for create / update
///
/// Always complete: partial updates are merged onto the existing row first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub name: String,
    pub email: String,
    pub position: Position,
    pub department_id: Option<i64>,
}

impl EmployeeRecord {
    /// Entity-level rules, checked before every write
    pub fn clean(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.email.trim().is_empty() {
            errors.add("email", "Email is mandatory.");
        }
        errors.into_result()
    }
}

impl From<&Employee> for EmployeeRecord {
    fn from(employee: &Employee) -> Self {
        Self {
            name: employee.name.clone(),
            email: employee.email.clone(),
            position: employee.position,
            department_id: employee.department_id,
        }
    }
}

/// List filters: case-insensitive substring matches, combined with AND
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeFilter {
    pub name: Option<String>,
    pub email: Option<String>,
}
