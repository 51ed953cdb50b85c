pub mod cleaner;
pub mod config;
pub mod error;
pub mod net;
pub mod player_index;
pub mod shooting_scraper;
pub mod shooting_table;
pub mod types;
pub mod utils;
