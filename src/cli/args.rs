//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::enums::{CharacterSet, Mode};
use crate::ascii::CharSet;
use crate::config::Config;
use crate::renderer::RenderMode;

/// Render images and movies as colored text in the terminal
#[derive(Parser, Debug)]
#[command(name = "hiptext")]
#[command(version, about = "Turn images and movies into colored terminal text", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Image (png, jpg, gif) or movie (mov, mp4, flv, avi, mkv) to render
    pub file: Option<PathBuf>,

    /// Output style
    #[arg(long, short)]
    pub mode: Option<Mode>,

    /// Your terminal's background color (name or #rrggbb)
    #[arg(long)]
    pub bg: Option<String>,

    /// Built-in character ramp for monochrome mode
    #[arg(long)]
    pub charset: Option<CharacterSet>,

    /// Custom character ramp, sparse to dense
    #[arg(long)]
    pub chars: Option<String>,

    /// Glyph printed in color mode cells
    #[arg(long)]
    pub space: Option<char>,

    /// Histogram-equalize the image
    #[arg(long)]
    pub equalize: bool,

    /// Paint cells matching the background instead of leaving them blank
    #[arg(long)]
    pub bgprint: bool,

    /// Output width in columns (0 = terminal width)
    #[arg(long, short)]
    pub width: Option<usize>,

    /// Output height in rows (0 = keep aspect ratio)
    #[arg(long)]
    pub height: Option<usize>,

    /// Wait for Return between movie frames
    #[arg(long)]
    pub stepthrough: bool,

    /// Show a color spectrum chart instead of a file
    #[arg(long)]
    pub spectrum: bool,

    /// Config file path
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}

impl Args {
    /// Overlay command-line flags on values loaded from the config file.
    pub fn apply_to(&self, config: &mut Config) {
        let render = &mut config.render;
        if let Some(mode) = self.mode {
            render.mode = Some(RenderMode::from(mode).name().to_string());
        }
        if let Some(bg) = &self.bg {
            render.background = Some(bg.clone());
        }
        if let Some(charset) = self.charset {
            render.charset = Some(CharSet::from(charset).name().to_string());
            // an explicit --charset beats a ramp from the file
            if self.chars.is_none() {
                render.chars = None;
            }
        }
        if let Some(chars) = &self.chars {
            render.chars = Some(chars.clone());
        }
        if let Some(space) = self.space {
            render.space = Some(space);
        }
        render.equalize |= self.equalize;
        render.bgprint |= self.bgprint;

        let output = &mut config.output;
        if self.width.is_some() {
            output.width = self.width;
        }
        if self.height.is_some() {
            output.height = self.height;
        }
        output.stepthrough |= self.stepthrough;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["hiptext"]);
        assert!(args.file.is_none());
        assert!(args.mode.is_none());
        assert!(args.bg.is_none());
        assert!(args.charset.is_none());
        assert!(args.chars.is_none());
        assert!(args.space.is_none());
        assert!(!args.equalize);
        assert!(!args.bgprint);
        assert!(args.width.is_none());
        assert!(args.height.is_none());
        assert!(!args.stepthrough);
        assert!(!args.spectrum);
        assert!(args.config.is_none());
        assert!(args.command.is_none());
    }

    #[test]
    fn test_args_file_positional() {
        let args = Args::parse_from(["hiptext", "cat.png"]);
        assert_eq!(args.file, Some(PathBuf::from("cat.png")));
    }

    #[test]
    fn test_args_mode_values() {
        let args = Args::parse_from(["hiptext", "--mode", "monochrome"]);
        assert_eq!(args.mode, Some(Mode::Monochrome));

        let args = Args::parse_from(["hiptext", "-m", "dual-pixel-searching"]);
        assert_eq!(args.mode, Some(Mode::DualPixelSearching));

        let args = Args::parse_from(["hiptext", "--mode", "xterm256unicode"]);
        assert_eq!(args.mode, Some(Mode::DualPixelSimple));

        let args = Args::parse_from(["hiptext", "--mode", "nocolor"]);
        assert_eq!(args.mode, Some(Mode::Monochrome));
    }

    #[test]
    fn test_args_rejects_unknown_mode() {
        assert!(Args::try_parse_from(["hiptext", "--mode", "sixel"]).is_err());
    }

    #[test]
    fn test_args_size_options() {
        let args = Args::parse_from(["hiptext", "-w", "40", "--height", "10"]);
        assert_eq!(args.width, Some(40));
        assert_eq!(args.height, Some(10));
    }

    #[test]
    fn test_args_config_option() {
        let args = Args::parse_from(["hiptext", "--config", "/tmp/config.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/config.toml")));

        let args = Args::parse_from(["hiptext", "-c", "/tmp/test.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/test.toml")));
    }

    #[test]
    fn test_args_config_show_subcommand() {
        let args = Args::parse_from(["hiptext", "config", "show"]);
        match args.command {
            Some(Command::Config {
                action: ConfigAction::Show,
            }) => (),
            _ => panic!("Expected Config Show subcommand"),
        }
    }

    #[test]
    fn test_args_config_init_subcommand() {
        let args = Args::parse_from(["hiptext", "config", "init"]);
        match args.command {
            Some(Command::Config {
                action: ConfigAction::Init,
            }) => (),
            _ => panic!("Expected Config Init subcommand"),
        }
    }

    #[test]
    fn test_apply_overrides_config() {
        let mut config = Config::default();
        config.render.mode = Some("monochrome".into());
        config.render.chars = Some(" #".into());
        config.output.width = Some(120);
        config.output.height = Some(30);

        let args = Args::parse_from([
            "hiptext",
            "--mode",
            "color",
            "--bg",
            "white",
            "--charset",
            "minimal",
            "--equalize",
            "--width",
            "60",
            "movie.mp4",
        ]);
        args.apply_to(&mut config);

        assert_eq!(config.render.mode.as_deref(), Some("color"));
        assert_eq!(config.render.background.as_deref(), Some("white"));
        assert_eq!(config.render.charset.as_deref(), Some("minimal"));
        assert!(config.render.chars.is_none());
        assert!(config.render.equalize);
        assert_eq!(config.output.width, Some(60));
        assert_eq!(config.output.height, Some(30));
        assert!(!config.output.stepthrough);
    }

    #[test]
    fn test_apply_keeps_config_without_flags() {
        let mut config = Config::default();
        config.render.bgprint = true;
        config.output.stepthrough = true;
        let before = config.clone();

        Args::parse_from(["hiptext", "a.png"]).apply_to(&mut config);
        assert_eq!(config, before);
    }
}
