use std::sync::Arc;

use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, EmployeeId, Entity};

/// An employee as known to the external directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
}

impl Entity for Employee {
    type Id = EmployeeId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Lookup of employees acting on replenishment orders.
pub trait EmployeeDirectory: Send + Sync {
    fn resolve(&self, id: EmployeeId) -> DomainResult<Option<Employee>>;
}

impl<S> EmployeeDirectory for Arc<S>
where
    S: EmployeeDirectory + ?Sized,
{
    fn resolve(&self, id: EmployeeId) -> DomainResult<Option<Employee>> {
        (**self).resolve(id)
    }
}

/// The signed-in employee, or `Auth` when there is no session.
pub fn require_employee(session: Option<EmployeeId>) -> DomainResult<EmployeeId> {
    session.ok_or_else(|| DomainError::auth("no active employee session"))
}
