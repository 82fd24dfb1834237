use crate::{
    ArrowKind, ArrowParams, ArrowShader, Error, PaintMode, Pixel, Rasterizer, Viewport,
    vec4_to_pixel,
};
use log::warn;
use serde::Serialize;
use std::path::Path;
use vek::{Vec2, Vec4};

const ARROW_KEYS: [&str; 7] = [
    "kind",
    "linewidth",
    "antialias",
    "body",
    "head",
    "mode",
    "color",
];
/// Background value which renders onto a transparent buffer.
const NO_BACKGROUND: &str = "none";

const RENDER_KEYS: [&str; 6] = ["width", "height", "background", "tile_size", "quad", "scale"];

/// Shape, style and output settings, usually read from a TOML file with an
/// `[arrow]` and an optional `[render]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub kind: ArrowKind,
    pub linewidth: f32,
    pub antialias: f32,
    /// Shaft length, defaults to 15 line widths.
    pub body: Option<f32>,
    /// Head length, defaults to the kind's head ratio of the body.
    pub head: Option<f32>,
    pub mode: PaintMode,
    pub color: Vec4<f32>,

    pub width: usize,
    pub height: usize,
    /// `None` renders onto a transparent buffer, written as `"none"` in TOML.
    pub background: Option<Vec4<f32>>,
    pub tile_size: usize,
    pub quad: [f32; 2],
    pub scale: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            kind: ArrowKind::Curved,
            linewidth: 20.0,
            antialias: 1.0,
            body: None,
            head: None,
            mode: PaintMode::Filled,
            color: Vec4::new(0.0, 0.0, 0.0, 1.0),

            width: 800,
            height: 800,
            background: Some(Vec4::one()),
            tile_size: 64,
            quad: [1.0, 0.5],
            scale: 1.0,
        }
    }
}

impl Settings {
    /// Reads settings from a TOML file on top of the defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path)?;
        let mut settings = Settings::default();
        settings.read(&content)?;
        Ok(settings)
    }

    /// Parse settings from a TOML string. Keys which are not present keep
    /// their current value. On error `self` is left untouched.
    pub fn read(&mut self, toml_content: &str) -> Result<(), Error> {
        let parsed: toml::Value = toml::from_str(toml_content)?;
        let mut next = self.clone();

        let section = parsed
            .get("arrow")
            .ok_or(Error::MissingSection("arrow"))?;
        warn_unknown_keys("arrow", section, &ARROW_KEYS);

        if let Some(kind) = section.get("kind") {
            next.kind = as_str(kind, "kind")?.parse()?;
        }

        if let Some(linewidth) = section.get("linewidth") {
            next.linewidth = as_f32(linewidth, "linewidth")?;
        }

        if let Some(antialias) = section.get("antialias") {
            next.antialias = as_f32(antialias, "antialias")?;
        }

        if let Some(body) = section.get("body") {
            next.body = Some(as_f32(body, "body")?);
        }

        if let Some(head) = section.get("head") {
            next.head = Some(as_f32(head, "head")?);
        }

        if let Some(mode) = section.get("mode") {
            next.mode = as_str(mode, "mode")?.parse()?;
        }

        if let Some(color) = section.get("color") {
            next.color = parse_hex_color(as_str(color, "color")?)?;
        }

        let Some(section) = parsed.get("render") else {
            *self = next;
            return Ok(());
        };
        warn_unknown_keys("render", section, &RENDER_KEYS);

        if let Some(width) = section.get("width") {
            next.width = as_size(width, "width")?;
        }

        if let Some(height) = section.get("height") {
            next.height = as_size(height, "height")?;
        }

        if let Some(background) = section.get("background") {
            next.background = parse_background(as_str(background, "background")?)?;
        }

        if let Some(tile_size) = section.get("tile_size") {
            next.tile_size = as_size(tile_size, "tile_size")?;
        }

        if let Some(quad) = section.get("quad") {
            let arr = quad.as_array().ok_or(Error::InvalidValue {
                key: "quad",
                expected: "an array",
            })?;
            if arr.len() != 2 {
                return Err(Error::InvalidValue {
                    key: "quad",
                    expected: "an array of 2 numbers",
                });
            }
            next.quad = [as_f32(&arr[0], "quad[0]")?, as_f32(&arr[1], "quad[1]")?];
        }

        if let Some(scale) = section.get("scale") {
            next.scale = as_f32(scale, "scale")?;
        }

        *self = next;
        Ok(())
    }

    /// Arrow parameters for the configured kind.
    pub fn params(&self) -> Result<ArrowParams, Error> {
        self.params_for(self.kind)
    }

    /// Arrow parameters for `kind`, filling in the body and head defaults.
    pub fn params_for(&self, kind: ArrowKind) -> Result<ArrowParams, Error> {
        let mut params = ArrowParams::for_kind(kind, self.linewidth, self.antialias);
        if let Some(body) = self.body {
            params.body = body;
            params.head = kind.head_ratio() * body;
        }
        if let Some(head) = self.head {
            params.head = head;
        }
        params.validate()?;
        Ok(params)
    }

    pub fn shader_for(&self, kind: ArrowKind) -> Result<ArrowShader, Error> {
        Ok(ArrowShader::new(kind, self.params_for(kind)?)
            .mode(self.mode)
            .color(self.color))
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
            .quad(Vec2::new(self.quad[0], self.quad[1]))
            .scale(self.scale)
    }

    pub fn rasterizer(&self) -> Rasterizer {
        let mut rasterizer = Rasterizer::new(self.viewport()).tile_size(self.tile_size);
        if let Some(background) = self.background {
            rasterizer = rasterizer.background(vec4_to_pixel(&background));
        }
        rasterizer
    }

    /// The settings as a TOML document which [`Settings::read`] accepts.
    pub fn to_toml(&self) -> Result<String, Error> {
        #[derive(Serialize)]
        struct ArrowSection {
            kind: ArrowKind,
            linewidth: f32,
            antialias: f32,
            #[serde(skip_serializing_if = "Option::is_none")]
            body: Option<f32>,
            #[serde(skip_serializing_if = "Option::is_none")]
            head: Option<f32>,
            mode: PaintMode,
            color: String,
        }

        #[derive(Serialize)]
        struct RenderSection {
            width: usize,
            height: usize,
            background: String,
            tile_size: usize,
            quad: [f32; 2],
            scale: f32,
        }

        #[derive(Serialize)]
        struct Document {
            arrow: ArrowSection,
            render: RenderSection,
        }

        let document = Document {
            arrow: ArrowSection {
                kind: self.kind,
                linewidth: self.linewidth,
                antialias: self.antialias,
                body: self.body,
                head: self.head,
                mode: self.mode,
                color: format_hex_color(&vec4_to_pixel(&self.color)),
            },
            render: RenderSection {
                width: self.width,
                height: self.height,
                background: self.background.map_or_else(
                    || NO_BACKGROUND.to_string(),
                    |c| format_hex_color(&vec4_to_pixel(&c)),
                ),
                tile_size: self.tile_size,
                quad: self.quad,
                scale: self.scale,
            },
        };

        Ok(toml::to_string(&document)?)
    }
}

fn warn_unknown_keys(name: &str, section: &toml::Value, known: &[&str]) {
    if let Some(table) = section.as_table() {
        for key in table.keys() {
            if !known.contains(&key.as_str()) {
                warn!("Ignoring unknown key '{}' in [{}]", key, name);
            }
        }
    }
}

fn as_str<'a>(value: &'a toml::Value, key: &'static str) -> Result<&'a str, Error> {
    value.as_str().ok_or(Error::InvalidValue {
        key,
        expected: "a string",
    })
}

fn as_f32(value: &toml::Value, key: &'static str) -> Result<f32, Error> {
    value
        .as_float()
        .or_else(|| value.as_integer().map(|i| i as f64))
        .map(|f| f as f32)
        .ok_or(Error::InvalidValue {
            key,
            expected: "a number",
        })
}

fn as_size(value: &toml::Value, key: &'static str) -> Result<usize, Error> {
    value
        .as_integer()
        .filter(|i| *i > 0)
        .map(|i| i as usize)
        .ok_or(Error::InvalidValue {
            key,
            expected: "a positive integer",
        })
}

fn parse_background(value: &str) -> Result<Option<Vec4<f32>>, Error> {
    if value.trim().eq_ignore_ascii_case(NO_BACKGROUND) {
        Ok(None)
    } else {
        parse_hex_color(value).map(Some)
    }
}

/// Parse a hex color string like "#RRGGBB", "#RRGGBBAA" or "RRGGBB" into RGBA floats (0.0-1.0)
pub fn parse_hex_color(hex: &str) -> Result<Vec4<f32>, Error> {
    let digits = hex.trim().trim_start_matches('#');

    if (digits.len() != 6 && digits.len() != 8) || !digits.is_ascii() {
        return Err(Error::InvalidColor(hex.to_string()));
    }

    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .map(|c| c as f32 / 255.0)
            .map_err(|_| Error::InvalidColor(hex.to_string()))
    };

    let a = if digits.len() == 8 { channel(6)? } else { 1.0 };
    Ok(Vec4::new(channel(0)?, channel(2)?, channel(4)?, a))
}

/// Format a pixel as "#RRGGBBAA".
pub fn format_hex_color(pixel: &Pixel) -> String {
    format!(
        "#{:02X}{:02X}{:02X}{:02X}",
        pixel[0], pixel[1], pixel[2], pixel[3]
    )
}
