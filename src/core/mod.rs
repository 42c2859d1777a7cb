pub mod bessel;
#[cfg(feature = "scirs2")]
pub mod scirs;
pub mod special;
pub mod timebase;
pub mod util;
