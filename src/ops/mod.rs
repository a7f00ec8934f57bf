pub mod command;
pub mod task_ops;
pub mod visibility;
