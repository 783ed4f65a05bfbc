//! Command line interface for penstroke
//!
//! Handles parsing command line arguments, validating them, and merging
//! them with the user's settings file into one resolved [`Settings`].

use crate::core::config_file::ConfigFile;
use crate::font_source::{Font, LineFontMetrics};
use crate::layout::{Alignment, LastRowPolicy};
use crate::rendering::{BottomLayer, BottomLayerPreset, LayeredAnimation, StrokeStyle};
use clap::{Parser, ValueEnum};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_FONT_SIZE: f64 = 20.0;
const DEFAULT_COLOR: &str = "#000000";
const DEFAULT_DURATION: f64 = 5.0;
const DEFAULT_FPS: f64 = 30.0;
/// Default paragraph width, in multiples of the font size
const DEFAULT_WIDTH_IN_EMS: f64 = 25.0;

/// Layer drawn underneath the text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum BottomLayerArg {
    #[default]
    None,
    SimpleOutline,
    BigShadow,
    Extruded,
}

impl BottomLayerArg {
    pub fn preset(self) -> Option<BottomLayerPreset> {
        match self {
            BottomLayerArg::None => None,
            BottomLayerArg::SimpleOutline => Some(BottomLayerPreset::SimpleOutline),
            BottomLayerArg::BigShadow => Some(BottomLayerPreset::BigShadow),
            BottomLayerArg::Extruded => Some(BottomLayerPreset::Extruded),
        }
    }
}

/// penstroke CLI arguments
///
/// Examples:
///   penstroke --text "HELLO WORLD"                   # 150 frames into ./frames
///   penstroke --text-file poem.txt --alignment center
///   penstroke --text "HI" --progress 0.5 -o preview  # One half-drawn frame
///   penstroke --text "HI" --bottom-layer big-shadow --bottom-delay 0.5
///   penstroke --new-config                           # Write ~/.config/penstroke/settings.json
#[derive(Parser, Debug, Clone, Default)]
#[clap(
    name = "penstroke",
    version,
    about = "Lay out text in a stroke font and render it being handwritten",
    long_about = "penstroke lays out a paragraph in a single-stroke font and writes SVG frames that reveal the text stroke by stroke, as if it were being written by hand. Frames can be assembled into a video with any external encoder."
)]
pub struct CliArgs {
    /// Text to write
    ///
    /// Line breaks in the text start new rows.
    #[clap(
        long = "text",
        short = 't',
        conflicts_with = "text_file",
        help = "Text to write"
    )]
    pub text: Option<String>,

    /// File containing the text to write
    #[clap(long = "text-file", help = "Read the text from a file")]
    pub text_file: Option<PathBuf>,

    /// Stroke font file (JSON)
    ///
    /// If not specified, the built-in line font is used.
    #[clap(
        long = "font",
        short = 'f',
        help = "Stroke font file (JSON)",
        long_help = "Path to a JSON stroke font with a \"metrics\" object and a \"glyphs\" map from single characters to SVG path data and advances. If not specified, the built-in line font is used."
    )]
    pub font: Option<PathBuf>,

    /// Font size (cap height) in pixels
    #[clap(long = "font-size", short = 's', help = "Font size in pixels [default: 20]")]
    pub font_size: Option<f64>,

    /// Stroke width of the text
    ///
    /// Defaults to the font's own stroke width, which for the built-in line
    /// font is a tenth of the font size.
    #[clap(
        long = "line-width",
        help = "Stroke width [default: the font's stroke width]"
    )]
    pub line_width: Option<f64>,

    /// Maximum row width in pixels
    #[clap(long = "width", short = 'w', help = "Maximum row width [default: 25 × font size]")]
    pub width: Option<f64>,

    #[clap(long = "alignment", short = 'a', value_enum, help = "Row alignment [default: left]")]
    pub alignment: Option<Alignment>,

    /// Whether the last row of each paragraph is justified too
    #[clap(
        long = "justify-last-row",
        value_enum,
        help = "Last row of a justified paragraph [default: left]"
    )]
    pub justify_last_row: Option<LastRowPolicy>,

    /// Stroke color
    #[clap(long = "color", short = 'c', help = "Stroke color (CSS) [default: #000000]")]
    pub color: Option<String>,

    /// Background fill of every frame
    ///
    /// Frames are transparent unless a background is given, so they can be
    /// composited over video.
    #[clap(long = "background", short = 'b', help = "Background color (CSS) [default: transparent]")]
    pub background: Option<String>,

    /// Seconds the text takes to write
    #[clap(long = "duration", short = 'd', help = "Seconds to write the text [default: 5]")]
    pub duration: Option<f64>,

    #[clap(long = "fps", help = "Frames per second [default: 30]")]
    pub fps: Option<f64>,

    /// Exact number of frames, instead of duration × fps
    #[clap(long = "frames", help = "Number of frames (overrides duration × fps)")]
    pub frames: Option<usize>,

    /// Render one frame this far through the animation
    #[clap(
        long = "progress",
        short = 'p',
        help = "Render a single preview frame at this progress (0 to 1)"
    )]
    pub progress: Option<f64>,

    #[clap(
        long = "bottom-layer",
        value_enum,
        default_value_t = BottomLayerArg::None,
        help = "Layer drawn underneath the text"
    )]
    pub bottom_layer: BottomLayerArg,

    /// Seconds the bottom layer starts after the text; negative starts it before
    #[clap(
        long = "bottom-delay",
        default_value_t = 0.0,
        allow_negative_numbers = true,
        help = "Bottom layer delay in seconds"
    )]
    pub bottom_delay: f64,

    /// Directory the frames are written to
    #[clap(long = "output", short = 'o', default_value = "frames", help = "Output directory")]
    pub output: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[clap(short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Also write logs to ~/.config/penstroke/logs/
    #[clap(long = "log-file", help = "Also write logs to the config directory")]
    pub log_file: bool,

    /// Initialize user configuration directory with an example settings file
    #[clap(
        long = "new-config",
        help = "Initialize user config directory with settings",
        long_help = "Initialize the ~/.config/penstroke directory with an example settings.json. Values in the settings file are used whenever the matching command line option is not given."
    )]
    pub new_config: bool,
}

/// Everything a run needs, after CLI arguments, settings file and defaults are merged
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub font: Option<PathBuf>,
    pub font_size: f64,
    /// Explicit stroke width; `None` uses the font's own
    pub line_width: Option<f64>,
    pub max_width: f64,
    pub alignment: Alignment,
    pub last_row: LastRowPolicy,
    pub color: String,
    pub background: Option<String>,
    pub duration: f64,
    pub fps: f64,
    pub frames: Option<usize>,
    pub progress: Option<f64>,
    pub bottom: Option<BottomLayerPreset>,
    pub bottom_delay: f64,
    pub output: PathBuf,
}

impl Settings {
    /// Stroke width the built-in line font is built with
    pub fn line_font_stroke_width(&self) -> f64 {
        self.line_width
            .unwrap_or_else(|| LineFontMetrics::recommended_stroke_width(self.font_size))
    }

    /// Stroke width used to draw `font`
    pub fn stroke_width_for(&self, font: &Font) -> f64 {
        self.line_width.unwrap_or_else(|| font.stroke_width())
    }

    /// Styles and timing for drawing `font`, bottom layer included
    pub fn animation(&self, font: &Font) -> LayeredAnimation {
        let width = self.stroke_width_for(font);
        let animation =
            LayeredAnimation::new(StrokeStyle::solid(self.color.clone(), width), self.duration);
        match self.bottom {
            Some(preset) => animation.with_bottom(BottomLayer {
                style: preset.style(width),
                delay: self.bottom_delay,
            }),
            None => animation,
        }
    }
}

fn check_positive(name: &str, value: Option<f64>) -> Result<(), String> {
    match value {
        Some(value) if !value.is_finite() || value <= 0.0 => Err(format!(
            "{name} must be a positive number, got {value}"
        )),
        _ => Ok(()),
    }
}

impl CliArgs {
    /// Validate the CLI arguments after parsing
    ///
    /// The layout core assumes finite, positive sizes, so bad numbers are
    /// rejected here with a message instead.
    pub fn validate(&self) -> Result<(), String> {
        if self.new_config {
            return Ok(());
        }

        if self.text.is_none() && self.text_file.is_none() {
            return Err(
                "No text given.\nUse --text \"...\" or --text-file <PATH>.".to_string(),
            );
        }

        if let Some(path) = &self.text_file {
            if !path.is_file() {
                return Err(format!(
                    "Text file does not exist: {}\nMake sure the path is correct and the file exists.",
                    path.display()
                ));
            }
        }

        if let Some(path) = &self.font {
            if !path.is_file() {
                return Err(format!("Font file does not exist: {}", path.display()));
            }
        }

        check_positive("--font-size", self.font_size)?;
        check_positive("--line-width", self.line_width)?;
        check_positive("--width", self.width)?;
        check_positive("--duration", self.duration)?;
        check_positive("--fps", self.fps)?;

        if let Some(progress) = self.progress {
            if !(0.0..=1.0).contains(&progress) {
                return Err(format!("--progress must be between 0 and 1, got {progress}"));
            }
        }

        if !self.bottom_delay.is_finite() {
            return Err("--bottom-delay must be a finite number".to_string());
        }

        Ok(())
    }

    /// The text to lay out, from `--text` or `--text-file`
    pub fn read_text(&self) -> anyhow::Result<String> {
        match (&self.text, &self.text_file) {
            (Some(text), _) => Ok(text.clone()),
            (None, Some(path)) => fs::read_to_string(path).map_err(|e| {
                anyhow::anyhow!("Failed to read text file {}: {}", path.display(), e)
            }),
            (None, None) => Err(anyhow::anyhow!("No text given")),
        }
    }

    /// Merge with the settings file and built-in defaults
    ///
    /// Priority order:
    /// 1. CLI argument
    /// 2. Config file setting (~/.config/penstroke/settings.json)
    /// 3. Built-in default
    pub fn resolve(&self, config: Option<&ConfigFile>) -> Settings {
        let config = config.cloned().unwrap_or_default();

        let font_size = self
            .font_size
            .or(config.font_size)
            .unwrap_or(DEFAULT_FONT_SIZE);
        let color = self
            .color
            .clone()
            .or(config.color)
            .unwrap_or_else(|| DEFAULT_COLOR.to_string());

        let settings = Settings {
            font: self.font.clone(),
            font_size,
            line_width: self.line_width.or(config.line_width),
            max_width: self.width.unwrap_or(font_size * DEFAULT_WIDTH_IN_EMS),
            alignment: self.alignment.or(config.alignment).unwrap_or_default(),
            last_row: self
                .justify_last_row
                .or(config.justify_last_row)
                .unwrap_or_default(),
            color,
            background: self.background.clone().or(config.background),
            duration: self.duration.or(config.duration).unwrap_or(DEFAULT_DURATION),
            fps: self.fps.or(config.fps).unwrap_or(DEFAULT_FPS),
            frames: self.frames,
            progress: self.progress,
            bottom: self.bottom_layer.preset(),
            bottom_delay: self.bottom_delay,
            output: self.output.clone(),
        };
        debug!("Resolved settings: {:?}", settings);
        settings
    }
}
