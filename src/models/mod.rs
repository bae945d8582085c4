pub use options::Options;
pub use station::Station;

mod options;
mod station;
