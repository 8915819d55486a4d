pub mod clock;
pub mod range;
pub mod telemetry;

pub use clock::*;
pub use range::*;
pub use telemetry::*;
