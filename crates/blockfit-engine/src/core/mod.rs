pub use self::{board::*, catalog::*, cell::*, shape::*};

pub(crate) mod board;
pub(crate) mod catalog;
pub(crate) mod cell;
pub(crate) mod shape;
