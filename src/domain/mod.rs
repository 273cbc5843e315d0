pub mod branch;
pub mod description;
pub mod keys;
pub mod ticket;
pub mod update;
