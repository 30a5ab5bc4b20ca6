pub mod submission;

pub use submission::ImageSubmission;
