pub mod detail;
pub mod dispatcher;
pub mod loading;
pub mod location;
pub mod providers;
pub mod sequence;

pub use detail::{DetailOutcome, DetailViewController};
pub use dispatcher::{RequestDispatcher, Settled};
pub use location::LocationResolver;
