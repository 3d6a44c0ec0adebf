pub mod health;
pub mod load;
