
/// Edit-form coercion and update payload serialization
pub mod update_tests;
