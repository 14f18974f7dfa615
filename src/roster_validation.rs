use crate::employee::Employee;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone)]
pub struct EmployeeValidationError {
    message: String,
}

impl EmployeeValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for EmployeeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for EmployeeValidationError {}

pub fn validate_employee(employee: &Employee) -> Result<(), EmployeeValidationError> {
    if employee.id.trim().is_empty() {
        return Err(EmployeeValidationError::new("employee has an empty id"));
    }
    if employee.name.trim().is_empty() {
        return Err(EmployeeValidationError::new(format!(
            "employee {} has an empty name",
            employee.id
        )));
    }
    Ok(())
}

pub fn validate_employee_collection(
    employees: &[Employee],
) -> Result<(), EmployeeValidationError> {
    let mut seen_ids = HashSet::with_capacity(employees.len());
    for employee in employees {
        if !seen_ids.insert(employee.id.as_str()) {
            return Err(EmployeeValidationError::new(format!(
                "duplicate employee id {}",
                employee.id
            )));
        }
        validate_employee(employee)?;
    }
    Ok(())
}
