//! Color palettes shared by every view.
//!
//! A [`Theme`] is a named [`Palette`] of semantic roles. Components read the
//! active theme from context via [`use_theme`] and never build colors from
//! string concatenation.

use leptos::prelude::*;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Parse `#RRGGBB`, `#RRGGBBAA`, `rgb(r, g, b)` or `rgba(r, g, b, a)`.
	pub fn parse(input: &str) -> Option<Self> {
		let s = input.trim();
		if let Some(hex) = s.strip_prefix('#') {
			let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
			return match hex.len() {
				6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
				8 => Some(Self::rgba(
					byte(0)?,
					byte(2)?,
					byte(4)?,
					byte(6)? as f64 / 255.0,
				)),
				_ => None,
			};
		}

		let inner = s
			.strip_prefix("rgba(")
			.or_else(|| s.strip_prefix("rgb("))?
			.strip_suffix(')')?;
		let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
		let channel = |p: &str| p.parse::<u8>().ok();
		match parts.as_slice() {
			[r, g, b] => Some(Self::rgb(channel(r)?, channel(g)?, channel(b)?)),
			[r, g, b, a] => {
				let a = a.parse::<f64>().ok()?.clamp(0.0, 1.0);
				Some(Self::rgba(channel(r)?, channel(g)?, channel(b)?, a))
			}
			_ => None,
		}
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
			a: self.a,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Semantic color roles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
	pub primary: Color,
	pub primary_light: Color,
	pub background: Color,
	pub surface: Color,
	pub card_bg: Color,
	pub text: Color,
	pub text_secondary: Color,
	pub border: Color,
	pub success: Color,
	pub warning: Color,
	pub error: Color,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeMode {
	Light,
	Dark,
}

/// A named palette.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
	pub name: &'static str,
	pub mode: ThemeMode,
	pub palette: Palette,
}

pub const DEFAULT_THEME: &str = "purple-dark";

/// Every theme name accepted by [`Theme::by_name`].
pub const THEME_NAMES: [&str; 8] = [
	"purple-light",
	"purple-dark",
	"blue-light",
	"blue-dark",
	"gray-light",
	"gray-dark",
	"pink-light",
	"pink-dark",
];

impl Theme {
	/// Look a theme up by name. Unknown names get the default theme.
	pub fn by_name(name: &str) -> Self {
		Self::lookup(name).unwrap_or_else(Self::purple_dark)
	}

	pub fn lookup(name: &str) -> Option<Self> {
		let theme = match name {
			"purple-light" => Self::purple_light(),
			"purple-dark" => Self::purple_dark(),
			"blue-light" => Self::blue_light(),
			"blue-dark" => Self::blue_dark(),
			"gray-light" => Self::gray_light(),
			"gray-dark" => Self::gray_dark(),
			"pink-light" => Self::pink_light(),
			"pink-dark" => Self::pink_dark(),
			_ => return None,
		};
		Some(theme)
	}

	pub fn is_dark(&self) -> bool {
		self.mode == ThemeMode::Dark
	}

	/// Inline `style` value exposing the palette as CSS custom properties.
	pub fn css_variables(&self) -> String {
		let p = &self.palette;
		[
			("primary", p.primary),
			("primary-light", p.primary_light),
			("background", p.background),
			("surface", p.surface),
			("card-bg", p.card_bg),
			("text", p.text),
			("text-secondary", p.text_secondary),
			("border", p.border),
			("success", p.success),
			("warning", p.warning),
			("error", p.error),
		]
		.iter()
		.map(|(role, color)| format!("--cg-{}: {};", role, color.to_css()))
		.collect::<Vec<_>>()
		.join(" ")
	}

	/// Soft violet on near-white.
	pub fn purple_light() -> Self {
		Self {
			name: "purple-light",
			mode: ThemeMode::Light,
			palette: Palette {
				primary: Color::rgb(0x8B, 0x5C, 0xF6),
				primary_light: Color::rgb(0xA7, 0x8B, 0xFA),
				background: Color::rgb(0xFA, 0xFA, 0xFA),
				surface: Color::rgb(0xFF, 0xFF, 0xFF),
				card_bg: Color::rgb(0xFF, 0xFF, 0xFF),
				text: Color::rgb(0x18, 0x18, 0x1B),
				text_secondary: Color::rgb(0x71, 0x71, 0x7A),
				border: Color::rgb(0xE4, 0xE4, 0xE7),
				success: Color::rgb(0x22, 0xC5, 0x5E),
				warning: Color::rgb(0xF9, 0x73, 0x16),
				error: Color::rgb(0xEF, 0x44, 0x44),
			},
		}
	}

	/// Violet on zinc black (default).
	pub fn purple_dark() -> Self {
		Self {
			name: "purple-dark",
			mode: ThemeMode::Dark,
			palette: Palette {
				primary: Color::rgb(0xA7, 0x8B, 0xFA),
				primary_light: Color::rgb(0xC4, 0xB5, 0xFD),
				background: Color::rgb(0x09, 0x09, 0x0B),
				surface: Color::rgb(0x18, 0x18, 0x1B),
				card_bg: Color::rgb(0x18, 0x18, 0x1B),
				text: Color::rgb(0xFA, 0xFA, 0xFA),
				text_secondary: Color::rgb(0xA1, 0xA1, 0xAA),
				border: Color::rgb(0x27, 0x27, 0x2A),
				success: Color::rgb(0x4A, 0xDE, 0x80),
				warning: Color::rgb(0xFB, 0x92, 0x3C),
				error: Color::rgb(0xF8, 0x71, 0x71),
			},
		}
	}

	pub fn blue_light() -> Self {
		Self {
			name: "blue-light",
			mode: ThemeMode::Light,
			palette: Palette {
				primary: Color::rgb(0x1D, 0x9B, 0xF0),
				primary_light: Color::rgb(0x4A, 0xB3, 0xF4),
				background: Color::rgb(0xFF, 0xFF, 0xFF),
				surface: Color::rgb(0xF7, 0xF9, 0xF9),
				card_bg: Color::rgb(0xFF, 0xFF, 0xFF),
				text: Color::rgb(0x0F, 0x14, 0x19),
				text_secondary: Color::rgb(0x53, 0x64, 0x71),
				border: Color::rgb(0xEF, 0xF3, 0xF4),
				success: Color::rgb(0x00, 0xBA, 0x7C),
				warning: Color::rgb(0xFF, 0xAD, 0x1F),
				error: Color::rgb(0xF4, 0x21, 0x2E),
			},
		}
	}

	pub fn blue_dark() -> Self {
		Self {
			name: "blue-dark",
			mode: ThemeMode::Dark,
			palette: Palette {
				primary: Color::rgb(0x1D, 0x9B, 0xF0),
				primary_light: Color::rgb(0x4A, 0xB3, 0xF4),
				background: Color::rgb(0x00, 0x00, 0x00),
				surface: Color::rgb(0x16, 0x18, 0x1C),
				card_bg: Color::rgb(0x16, 0x18, 0x1C),
				text: Color::rgb(0xE7, 0xE9, 0xEA),
				text_secondary: Color::rgb(0x71, 0x76, 0x7B),
				border: Color::rgb(0x2F, 0x33, 0x36),
				success: Color::rgb(0x00, 0xBA, 0x7C),
				warning: Color::rgb(0xFF, 0xAD, 0x1F),
				error: Color::rgb(0xF4, 0x21, 0x2E),
			},
		}
	}

	pub fn gray_light() -> Self {
		Self {
			name: "gray-light",
			mode: ThemeMode::Light,
			palette: Palette {
				primary: Color::rgb(0x2D, 0x37, 0x48),
				primary_light: Color::rgb(0x4A, 0x55, 0x68),
				background: Color::rgb(0xF7, 0xFA, 0xFC),
				surface: Color::rgb(0xFF, 0xFF, 0xFF),
				card_bg: Color::rgb(0xFF, 0xFF, 0xFF),
				text: Color::rgb(0x1A, 0x20, 0x2C),
				text_secondary: Color::rgb(0x71, 0x80, 0x96),
				border: Color::rgb(0xE2, 0xE8, 0xF0),
				success: Color::rgb(0x38, 0xA1, 0x69),
				warning: Color::rgb(0xD6, 0x9E, 0x2E),
				error: Color::rgb(0xE5, 0x3E, 0x3E),
			},
		}
	}

	pub fn gray_dark() -> Self {
		Self {
			name: "gray-dark",
			mode: ThemeMode::Dark,
			palette: Palette {
				primary: Color::rgb(0xE2, 0xE8, 0xF0),
				primary_light: Color::rgb(0xF7, 0xFA, 0xFC),
				background: Color::rgb(0x19, 0x19, 0x19),
				surface: Color::rgb(0x2D, 0x2D, 0x2D),
				card_bg: Color::rgb(0x2D, 0x2D, 0x2D),
				text: Color::rgb(0xF7, 0xFA, 0xFC),
				text_secondary: Color::rgb(0xA0, 0xAE, 0xC0),
				border: Color::rgb(0x3D, 0x3D, 0x3D),
				success: Color::rgb(0x48, 0xBB, 0x78),
				warning: Color::rgb(0xEC, 0xC9, 0x4B),
				error: Color::rgb(0xFC, 0x81, 0x81),
			},
		}
	}

	pub fn pink_light() -> Self {
		Self {
			name: "pink-light",
			mode: ThemeMode::Light,
			palette: Palette {
				primary: Color::rgb(0xE1, 0x30, 0x6C),
				primary_light: Color::rgb(0xF7, 0x77, 0x37),
				background: Color::rgb(0xFA, 0xFA, 0xFA),
				surface: Color::rgb(0xFF, 0xFF, 0xFF),
				card_bg: Color::rgb(0xFF, 0xFF, 0xFF),
				text: Color::rgb(0x26, 0x26, 0x26),
				text_secondary: Color::rgb(0x8E, 0x8E, 0x8E),
				border: Color::rgb(0xDB, 0xDB, 0xDB),
				success: Color::rgb(0x00, 0xD9, 0x5F),
				warning: Color::rgb(0xFF, 0xAA, 0x00),
				error: Color::rgb(0xED, 0x49, 0x56),
			},
		}
	}

	pub fn pink_dark() -> Self {
		Self {
			name: "pink-dark",
			mode: ThemeMode::Dark,
			palette: Palette {
				primary: Color::rgb(0xFD, 0x59, 0x49),
				primary_light: Color::rgb(0xF7, 0x77, 0x37),
				background: Color::rgb(0x00, 0x00, 0x00),
				surface: Color::rgb(0x12, 0x12, 0x12),
				card_bg: Color::rgb(0x12, 0x12, 0x12),
				text: Color::rgb(0xFA, 0xFA, 0xFA),
				text_secondary: Color::rgb(0xA8, 0xA8, 0xA8),
				border: Color::rgb(0x26, 0x26, 0x26),
				success: Color::rgb(0x00, 0xD9, 0x5F),
				warning: Color::rgb(0xFF, 0xAA, 0x00),
				error: Color::rgb(0xED, 0x49, 0x56),
			},
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::purple_dark()
	}
}

/// Put the active theme into context for the subtree.
pub fn provide_theme(name: &str) -> RwSignal<Theme> {
	let theme = RwSignal::new(Theme::by_name(name));
	provide_context(theme);
	theme
}

/// The active theme, or the default when no provider is mounted.
pub fn use_theme() -> RwSignal<Theme> {
	use_context::<RwSignal<Theme>>().unwrap_or_else(|| RwSignal::new(Theme::default()))
}
