pub mod dashboard;
pub mod form;
pub mod login;
pub mod summary;
pub mod table;
