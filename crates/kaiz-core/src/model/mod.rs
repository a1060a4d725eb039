pub mod choice;
pub mod field;
pub mod visit;

pub use choice::{CustomerCategory, YesNo};
pub use field::{FieldKind, FieldValue, VisitField, VisitFields};
pub use visit::Visit;
