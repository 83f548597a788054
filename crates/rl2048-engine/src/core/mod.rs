pub use self::{action::*, board::*, line::*};

pub(crate) mod action;
pub(crate) mod board;
pub(crate) mod line;
