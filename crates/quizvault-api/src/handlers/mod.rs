pub mod assets;
pub mod banks;
pub mod health;
