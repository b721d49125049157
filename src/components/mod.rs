pub mod buffer;
pub mod status_bar;
pub mod tabline;
