pub mod age;
pub mod unicode;
