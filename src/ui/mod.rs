pub mod ask;
pub mod panels;
pub mod tables;
