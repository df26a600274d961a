use futures::stream::BoxStream;

use crate::structures::Error;

/// A response whose body is consumed chunk by chunk.
pub struct HttpResponse {
  /// Declared length of the body, if the server sent one
  pub content_length: Option<u64>,
  pub body: BoxStream<'static, Result<Vec<u8>, Error>>,
}
