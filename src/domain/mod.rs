pub mod extract;
pub mod intent;
pub mod ticket;
pub mod tool;
