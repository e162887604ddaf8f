//! Next page resolution

use super::types::PageResponse;
use crate::dispatch::{dispatch, DispatchOptions, Dispatcher, PageFuture};
use std::sync::Arc;
use tracing::debug;

/// Resolve the page following `response`.
///
/// Returns `None` when the response is the last page. The returned future
/// reuses the dispatcher and options unchanged.
pub fn next_page<T>(
    response: &PageResponse<T>,
    dispatcher: &Arc<dyn Dispatcher>,
    options: &DispatchOptions,
) -> Option<PageFuture> {
    let request = response.next_page.as_ref()?.request()?;
    debug!(next = %request.target, "resolved next page");
    Some(dispatch(Arc::clone(dispatcher), request, options.clone()))
}
