pub mod announcement;
pub mod assignment;
pub mod attendance;
pub mod event;
pub mod lesson;
pub mod reference;
pub mod student_result;
pub mod submission;
