pub mod assets;
pub mod chunk;
pub mod normalize_options;
pub mod timers;
