pub mod application_dto;
pub mod interview_dto;
pub mod job_offer_dto;
