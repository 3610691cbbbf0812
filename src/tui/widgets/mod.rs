pub mod books;
pub mod dashboard;
pub mod participant_detail;
pub mod participants;
