mod session_rng;

pub mod rolling;

pub use session_rng::SessionRng;
