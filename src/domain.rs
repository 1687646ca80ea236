pub mod customer;
pub mod encoder;
pub mod prediction;

pub use self::customer::*;
pub use self::encoder::*;
pub use self::prediction::*;
