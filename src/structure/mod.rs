// Mon Oct 19 2026 - Alex

pub mod alignment;
pub mod array;
pub mod comparison;
pub mod encoding;
pub mod enums;
pub mod member;
pub mod size;
pub mod traversal;

pub use array::ArrayInfo;
pub use comparison::{type_cmp, type_compat, type_printf_compat};
pub use encoding::{Encoding, IntFormat, PtrauthInfo};
pub use enums::Enumerator;
pub use member::{Member, MemberInfo};
