//! Terminal presentation for the depsync binary.

pub mod blocks {
    pub mod error;
    pub mod header;
    pub mod summary;
}
pub mod context;
pub mod error;
pub mod json;
pub mod output;
pub mod primitives {
    pub mod icon;
    pub mod text;
}
pub mod sink;
pub mod terminal;
pub mod theme;
pub mod views {
    pub mod sync;
    pub mod watch;
}
