//! Header grammar, tokenizer and codec plumbing.

pub mod constants;
pub mod date;
pub mod formatter;
pub mod grammar;
pub mod headers;
pub mod list;
pub mod parameters;
pub mod quality;
pub mod reader;

pub use formatter::*;
pub use headers::*;
pub use list::{read_list, read_qualified_list, read_sorted_list, HttpHeaderListAdapter};
pub use parameters::{read_parameters, read_quality_factor_parameter};
pub use quality::{
    enhance_with_quality_parameter, quality_comparator, quality_value_to_string,
    read_quality_factor, sort_by_quality, Qualified, DEFAULT_QUALITY,
};
pub use reader::{EventKind, HeaderEvent, HeaderReader, HttpHeaderReader};
