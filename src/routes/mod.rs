pub mod docs;
pub mod generate;
pub mod health;
