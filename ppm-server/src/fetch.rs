/// Downloads the training text behind `url`.
///
/// Non-2xx statuses are reported as errors.
pub async fn fetch_text(url: &str) -> reqwest::Result<String> {
	reqwest::get(url).await?.error_for_status()?.text().await
}
