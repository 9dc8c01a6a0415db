pub mod core;
pub mod utils;

pub use crate::core::json::{
    pretty_string, print_pretty, read_tree, read_valid_value, read_value, use_codec, use_codec_and,
    use_pretty_printer, with_codec, with_codec_and, with_pretty_printer, write_pretty, JsonCodec,
    PrettyPrinter,
};
pub use crate::core::resource::{
    use_resource_stream, use_resource_stream_and, with_resource_stream, with_resource_stream_and,
    DirLoader, ResourceLoader, RESOURCE_DIR_ENV,
};
pub use crate::utils::error::{Result, TestkitError};
pub use crate::utils::logger::init_test_logger;
pub use crate::utils::sample::random_variant;
pub use crate::utils::validation::{
    ensure_valid, is_valid, require_valid, use_validator, use_validator_and, validate,
    with_validator, with_validator_and, Constrained, ConstraintReport, MessageInterpolator,
    Validator, Violation, INTERPOLATOR_ENV,
};
