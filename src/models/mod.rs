pub mod address;
pub mod application;
pub mod interview;
pub mod job_offer;
