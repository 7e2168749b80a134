pub mod activity;
pub mod classify;
pub mod connections;
pub mod error;
pub mod forks;
pub mod lanes;
pub mod layout;
pub mod positions;

pub use activity::*;
pub use classify::*;
pub use connections::*;
pub use error::*;
pub use forks::*;
pub use lanes::*;
pub use layout::*;
pub use positions::*;
