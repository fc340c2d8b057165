pub mod decode;
pub mod grade;
pub mod normalize;

pub use decode::{decode, DecodeArgs};
pub use grade::{grade, GradeArgs};
pub use normalize::{normalize, NormalizeArgs};
