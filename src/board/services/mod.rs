//! Application services for board orchestration.

mod assignment;
mod audit;
mod mutation;

pub use assignment::{AssignmentError, AssignmentSelector};
pub use audit::{AuditError, AuditRecorder};
pub use mutation::{
    CreateTaskRequest, TaskMutationError, TaskMutationResult, TaskMutationService,
    UpdateTaskRequest,
};
