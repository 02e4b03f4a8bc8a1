pub mod certificate;
pub mod student;
