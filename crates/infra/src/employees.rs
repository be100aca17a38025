use std::collections::HashMap;
use std::sync::RwLock;

use stockroom_core::{DomainError, DomainResult, EmployeeId};
use stockroom_purchasing::{Employee, EmployeeDirectory};

/// In-memory employee directory for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryEmployeeDirectory {
    employees: RwLock<HashMap<EmployeeId, Employee>>,
}

impl InMemoryEmployeeDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an employee under a fresh id.
    pub fn register(&self, name: impl Into<String>) -> DomainResult<Employee> {
        let employee = Employee {
            id: EmployeeId::new(),
            name: name.into(),
        };
        self.employees
            .write()
            .map_err(|_| DomainError::persistence("employee directory lock poisoned"))?
            .insert(employee.id, employee.clone());
        Ok(employee)
    }
}

impl EmployeeDirectory for InMemoryEmployeeDirectory {
    fn resolve(&self, id: EmployeeId) -> DomainResult<Option<Employee>> {
        let employees = self
            .employees
            .read()
            .map_err(|_| DomainError::persistence("employee directory lock poisoned"))?;
        Ok(employees.get(&id).cloned())
    }
}
