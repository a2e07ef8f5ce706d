pub mod csv;
pub mod sterling;
