//! Runtime configuration read from the host page.
//!
//! The page embeds a `<script id="app-config" type="application/json">` block;
//! every field is optional and falls back to the defaults below.

use log::{Level, info, warn};
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

/// Id of the script element carrying the JSON config.
pub const CONFIG_ELEMENT_ID: &str = "app-config";

const DEFAULT_API_BASE_URL: &str = "https://crowdgraph.onrender.com";
const DEFAULT_THEME: &str = "purple-dark";

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
	pub api_base_url: String,
	pub community_id: Option<String>,
	/// Absent when nobody is logged in.
	pub user_id: Option<String>,
	pub username: Option<String>,
	pub theme: String,
	pub max_retries: u32,
	pub log_level: String,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			api_base_url: DEFAULT_API_BASE_URL.to_string(),
			community_id: None,
			user_id: None,
			username: None,
			theme: DEFAULT_THEME.to_string(),
			max_retries: 1,
			log_level: "debug".to_string(),
		}
	}
}

impl AppConfig {
	pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
		let mut config: AppConfig = serde_json::from_str(text)?;
		config.community_id = non_blank(config.community_id);
		config.user_id = non_blank(config.user_id);
		config.username = non_blank(config.username);
		Ok(config)
	}

	/// Read the config from the page, or defaults if it is missing or malformed.
	pub fn load() -> Self {
		let Some(text) = read_script_text(CONFIG_ELEMENT_ID) else {
			warn!("crowdgraph: no #{} element, using default config", CONFIG_ELEMENT_ID);
			return Self::default();
		};
		match Self::from_json(&text) {
			Ok(config) => {
				info!(
					"crowdgraph: config loaded (api {}, community {:?})",
					config.api_base_url, config.community_id
				);
				config
			}
			Err(e) => {
				warn!("crowdgraph: failed to parse config: {}", e);
				Self::default()
			}
		}
	}

	/// Log level named by `logLevel`; unknown names fall back to info.
	pub fn level(&self) -> Level {
		parse_level(&self.log_level).unwrap_or(Level::Info)
	}

	pub fn is_logged_in(&self) -> bool {
		self.user_id.is_some()
	}
}

pub fn parse_level(name: &str) -> Option<Level> {
	match name.trim().to_ascii_lowercase().as_str() {
		"error" => Some(Level::Error),
		"warn" | "warning" => Some(Level::Warn),
		"info" => Some(Level::Info),
		"debug" => Some(Level::Debug),
		"trace" => Some(Level::Trace),
		_ => None,
	}
}

fn non_blank(value: Option<String>) -> Option<String> {
	value.filter(|v| !v.trim().is_empty())
}

fn read_script_text(id: &str) -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(id)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_object_yields_defaults() {
		let config = AppConfig::from_json("{}").unwrap();
		assert_eq!(config, AppConfig::default());
		assert_eq!(config.theme, "purple-dark");
		assert_eq!(config.max_retries, 1);
		assert!(!config.is_logged_in());
	}

	#[test]
	fn camel_case_fields_are_read() {
		let config = AppConfig::from_json(
			r#"{"apiBaseUrl":"http://localhost:3000","communityId":"c1","userId":"u1","maxRetries":0,"theme":"blue-light"}"#,
		)
		.unwrap();
		assert_eq!(config.api_base_url, "http://localhost:3000");
		assert_eq!(config.community_id.as_deref(), Some("c1"));
		assert!(config.is_logged_in());
		assert_eq!(config.max_retries, 0);
		assert_eq!(config.theme, "blue-light");
	}

	#[test]
	fn blank_user_id_means_logged_out() {
		let config = AppConfig::from_json(r#"{"userId":"  "}"#).unwrap();
		assert_eq!(config.user_id, None);
	}

	#[test]
	fn malformed_json_is_an_error() {
		assert!(AppConfig::from_json("{not json").is_err());
	}

	#[test]
	fn log_level_falls_back_to_info() {
		let mut config = AppConfig::default();
		assert_eq!(config.level(), Level::Debug);
		config.log_level = "WARN".into();
		assert_eq!(config.level(), Level::Warn);
		config.log_level = "loud".into();
		assert_eq!(config.level(), Level::Info);
	}
}
