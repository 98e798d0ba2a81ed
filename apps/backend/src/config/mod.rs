pub mod db;
pub mod uploads;
