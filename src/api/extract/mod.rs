//! Request extractors that reject bad input before a handler runs.

pub mod param_id;
pub mod validated_json;

pub use param_id::ParamId;
pub use validated_json::ValidatedJson;
