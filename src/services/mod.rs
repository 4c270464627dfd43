pub mod application_service;
pub mod interview_service;
pub mod job_offer_service;
