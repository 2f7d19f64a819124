mod auction;
mod bid;
mod property;

pub use {
    auction::*,
    bid::*,
    property::*,
};
