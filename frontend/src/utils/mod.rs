pub mod analytics;
pub mod filters;
pub mod fitness;
pub mod ordering;
pub mod storage;
pub mod upload;
