#![forbid(unsafe_code)]

pub mod generator;
pub mod model;
pub mod settings;
pub mod time;

pub use generator::QuestionGenerator;
pub use settings::{GameSettings, GameSettingsDraft};
pub use time::Clock;
