pub mod search;
pub mod todos;
pub mod validation;
