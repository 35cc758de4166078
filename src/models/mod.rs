pub mod biomarker;
pub mod enums;
pub mod result;

pub use biomarker::*;
pub use enums::*;
pub use result::*;
