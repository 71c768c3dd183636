// Game modules: player character and the playable level

pub mod characters;
pub mod level;
