pub mod error;
pub mod event;
pub mod seq_value;
pub mod state;
pub mod time;

pub use error::{Error, Result};
pub use event::*;
pub use seq_value::*;
pub use state::*;
pub use time::*;
