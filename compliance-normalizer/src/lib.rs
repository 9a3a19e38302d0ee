//! Compliance Report Normalizer
//!
//! Discounts pre-approved exceptions from a compliance report so that only
//! unexpected findings remain:
//! - `documented_missing_parameters` / `documented_missing_resources` -
//!   items are dropped when excused by exact or pattern matchers
//! - `non_compliant` - exempted parameters are dropped, and resources left
//!   with no parameters go with them
//!
//! Normalization always works on a copy; the input report is never touched.

pub mod error;
pub mod exceptions;
pub mod matcher;
pub mod normalize;
pub mod section;

pub use error::ExceptionError;
pub use exceptions::{ExceptionSpec, ExceptionSpecBuilder};
pub use matcher::{is_excused, Matcher};
pub use normalize::{normalize, normalize_all, normalize_section};
pub use section::{filter_list, filter_non_compliant};
