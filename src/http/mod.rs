pub mod response;
pub mod responsebody;
pub mod streamfactory;

// Re-exports for convenience
pub use response::HttpResponse;
pub use responsebody::ResponseBody;
