//! Application services for task tracking.

mod task_service;

pub use task_service::{TaskInput, TaskService, TaskServiceError, TaskServiceResult};
