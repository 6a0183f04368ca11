pub mod collections;
pub mod forms;
pub mod health;
pub mod items;
pub mod sites;
pub mod video;
