mod home;
mod search;
mod state;

pub use home::{HomeFeed, HomeState, merge_sections};
pub use search::{Search, SearchState};
pub use state::StateCell;
