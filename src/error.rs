use wasm_bindgen::JsValue;

pub type LoadResult<T> = Result<T, LoadError>;

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
	#[error("no browser window available")]
	Window,

	#[error("fetch of {url} failed: {reason}")]
	Fetch { url: String, reason: String },

	#[error("fetch of {url} returned HTTP {status}")]
	Status { url: String, status: u16 },

	#[error("catalog is not valid JSON: {0}")]
	Parse(#[from] serde_json::Error),

	#[error("image {url} could not be loaded")]
	Image { url: String },
}

impl LoadError {
	pub fn fetch(url: &str, err: JsValue) -> Self {
		Self::Fetch {
			url: url.to_owned(),
			reason: err
				.as_string()
				.unwrap_or_else(|| format!("{err:?}")),
		}
	}
}
