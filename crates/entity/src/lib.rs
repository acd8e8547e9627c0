//! Entity definitions for the volleyball statistics database
//!
//! This crate contains Sea-ORM entity definitions for the tables the dashboard reads.
//! The schema is owned by the scouting import tooling; column names are a fixed
//! external contract and are mapped onto English field names here.

pub mod actions;
pub use actions::Entity as Actions;
pub mod matches;
pub use matches::Entity as Matches;
pub mod phases;
pub use phases::Entity as Phases;
pub mod players;
pub use players::Entity as Players;
pub mod seasons;
pub use seasons::Entity as Seasons;
pub mod teams;
pub use teams::Entity as Teams;
