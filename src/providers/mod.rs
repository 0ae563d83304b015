pub mod cnb;
pub mod util;
