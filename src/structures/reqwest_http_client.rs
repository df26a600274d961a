/// `HttpClient` on top of a shared reqwest client.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
  pub(crate) client: reqwest::Client,
}
