pub mod gate;

pub use gate::{authenticate, authenticate_at, AuthFailure};
