pub mod db;
pub mod whatsapp;
