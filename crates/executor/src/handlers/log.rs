//! Log command handler.

use docket_engine::LogSink;

use crate::convert::convert_result;
use crate::{Output, Result};

/// Handle EmitLog command.
pub fn emit(sink: &dyn LogSink, body: String) -> Result<Output> {
    convert_result(sink.emit(&body))?;
    Ok(Output::Unit)
}
