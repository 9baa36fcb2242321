pub mod constants;
pub mod document;
pub mod modal;
pub mod model;
pub mod parallax;
pub mod pointer;
pub mod protocol;
pub mod scroll;
pub mod theme;
pub mod viewer;

pub use constants::*;
pub use model::*;
pub use theme::Theme;

// Bundled site data
pub static PROJECTS_JSON: &str = include_str!("../../data/projects.json");
pub static PROFILE_JSON: &str = include_str!("../../data/profile.json");
