mod aggregate;
mod random;

pub use aggregate::{aggregate_all, build_lookup, quotes_for_key};
pub use random::{StdRandom, pick_random, shuffle};
