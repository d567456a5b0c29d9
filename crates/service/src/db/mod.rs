pub mod backup_service;
pub mod client_service;
pub mod payment_service;
pub mod report_service;
pub mod task_service;
