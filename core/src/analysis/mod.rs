pub use tally::*;

mod tally;
