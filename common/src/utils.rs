pub mod ip;
pub mod millis;
