pub mod lifecycle;
pub mod telegram;
