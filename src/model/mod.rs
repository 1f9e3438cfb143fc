pub mod form;
pub mod task;
pub mod trello;
