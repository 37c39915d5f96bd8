//! Background execution for the simulated asynchronous operations.

pub mod scheduler;
pub mod tracing_layer;

pub use scheduler::{TaskId, TaskInfo, TaskKind, TaskScheduler};
pub use tracing_layer::{WorkflowEventLayer, WorkflowLogEvent};
