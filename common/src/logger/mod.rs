mod init;
mod spans;
mod trace_id;

pub use init::init_logger;
pub use spans::{request_span, warn_if_slow};
pub use trace_id::TraceId;
