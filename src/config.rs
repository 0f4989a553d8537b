//! Contains everything related to configuration.
//!
//! All default values for configurable aspects of the editor are defined in this
//! module, including *settings* and *language profiles*.
//!
//! At a minimum, [`Configuration::default()`] is sufficient for initializing an
//! editing session. However, the normal process is to apply multiple tiers of
//! configuration, all optional, resulting in a final blended configuration.
//!
//! External configuration files are expected to be formatted according to the
//! [TOML specification](https://toml.io).
//!
//! The default method of loading an external configuration file via
//! [`Configuration::load()`] will try to locate files in the following locations in
//! order of precedence:
//!
//! * `$HOME/.makorc`
//! * `$HOME/.mako/makorc`
//! * `$HOME/.config/mako/makorc`
//!
//! An example of an external configuration:
//!
//! ```toml
//! [settings]
//! highlight-line = true
//! format-on-save = true
//! formatter-timeout = 3000
//!
//! [default]
//! tab-size = 4
//! column-width = 100
//!
//! [languages.rust]
//! extensions = ["rs"]
//! auto-indent = true
//! formatter = { command = "rustfmt", args = ["--emit", "stdout"] }
//! ```

use crate::error::{Error, Result};
use crate::opt::Options;
use crate::sys::{self, AsString};
use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

/// A configuration representing all aspects of the editing experience.
#[derive(Clone, Debug)]
pub struct Configuration {
    /// A collection of settings that apply regardless of language.
    pub settings: Settings,

    /// The profile used for files whose extension matches no language.
    pub default_profile: LanguageProfile,

    /// Language profiles in order of declaration.
    pub languages: IndexMap<String, LanguageProfile>,
}

pub type ConfigurationRef = Rc<Configuration>;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Settings {
    pub highlight_line: bool,
    pub format_on_save: bool,
    pub formatter_timeout: Duration,
}

/// Per-language editing behavior, resolved from a file name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LanguageProfile {
    pub name: String,
    pub extensions: Vec<String>,

    /// Number of columns per indentation level, never `0`.
    pub tab_size: usize,

    /// Number of visible columns before horizontal scrolling, never `0`.
    pub column_width: usize,

    pub auto_indent: bool,
    pub word_wrap: bool,
    pub line_numbers: bool,
    pub indent_guides: bool,
    pub formatter: Option<Formatter>,
}

/// An external program that reads a document on standard input and writes the
/// formatted document on standard output.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Formatter {
    pub command: String,

    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ExternalConfiguration {
    settings: Option<ExternalSettings>,
    default: Option<ExternalProfile>,
    languages: Option<IndexMap<String, ExternalProfile>>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ExternalSettings {
    #[serde(rename = "highlight-line")]
    highlight_line: Option<bool>,

    #[serde(rename = "format-on-save")]
    format_on_save: Option<bool>,

    #[serde(rename = "formatter-timeout")]
    formatter_timeout: Option<u64>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ExternalProfile {
    extensions: Option<Vec<String>>,

    #[serde(rename = "tab-size")]
    tab_size: Option<usize>,

    #[serde(rename = "column-width")]
    column_width: Option<usize>,

    #[serde(rename = "auto-indent")]
    auto_indent: Option<bool>,

    #[serde(rename = "word-wrap")]
    word_wrap: Option<bool>,

    #[serde(rename = "line-numbers")]
    line_numbers: Option<bool>,

    #[serde(rename = "indent-guides")]
    indent_guides: Option<bool>,

    formatter: Option<Formatter>,
}

impl Settings {
    const FORMATTER_TIMEOUT_MS: u64 = 5_000;

    /// Applies the external settings `ext` on top of `self`.
    fn apply(&mut self, ext: Option<ExternalSettings>) {
        if let Some(ext) = ext {
            self.highlight_line = ext.highlight_line.unwrap_or(self.highlight_line);
            self.format_on_save = ext.format_on_save.unwrap_or(self.format_on_save);
            if let Some(millis) = ext.formatter_timeout {
                self.formatter_timeout = Duration::from_millis(millis);
            }
        }
    }

    /// Applies the relevant settings from `opts` on top of `self`.
    pub fn apply_opts(&mut self, opts: &Options) {
        self.format_on_save = opts.format_on_save.unwrap_or(self.format_on_save);
        if let Some(millis) = opts.timeout {
            self.formatter_timeout = Duration::from_millis(millis);
        }
    }
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            highlight_line: true,
            format_on_save: true,
            formatter_timeout: Duration::from_millis(Self::FORMATTER_TIMEOUT_MS),
        }
    }
}

impl LanguageProfile {
    pub const DEFAULT_NAME: &str = "text";
    const TAB_SIZE: usize = 4;
    const COLUMN_WIDTH: usize = 80;

    /// Returns a profile named `name` whose values are inherited from `self` and
    /// then overridden by `ext`.
    fn derive(&self, name: &str, ext: ExternalProfile) -> Result<LanguageProfile> {
        let mut profile = LanguageProfile {
            name: name.to_string(),
            extensions: Vec::new(),
            ..self.clone()
        };
        profile.apply(ext)?;
        Ok(profile)
    }

    /// Applies the external profile `ext` on top of `self`.
    fn apply(&mut self, ext: ExternalProfile) -> Result<()> {
        fn nonzero(name: &str, value: Option<usize>, default: usize) -> Result<usize> {
            match value {
                Some(0) => Err(Error::invalid_value(name, "0")),
                Some(n) => Ok(n),
                None => Ok(default),
            }
        }

        self.extensions = ext.extensions.unwrap_or(self.extensions.clone());
        self.tab_size = nonzero("tab-size", ext.tab_size, self.tab_size)?;
        self.column_width = nonzero("column-width", ext.column_width, self.column_width)?;
        self.auto_indent = ext.auto_indent.unwrap_or(self.auto_indent);
        self.word_wrap = ext.word_wrap.unwrap_or(self.word_wrap);
        self.line_numbers = ext.line_numbers.unwrap_or(self.line_numbers);
        self.indent_guides = ext.indent_guides.unwrap_or(self.indent_guides);
        if ext.formatter.is_some() {
            self.formatter = ext.formatter;
        }
        Ok(())
    }

    /// Returns `true` if columns beyond [`column_width`](Self::column_width) are
    /// reached by scrolling rather than wrapping.
    pub fn scrolls(&self) -> bool {
        !self.word_wrap
    }
}

impl Default for LanguageProfile {
    fn default() -> LanguageProfile {
        LanguageProfile {
            name: Self::DEFAULT_NAME.to_string(),
            extensions: Vec::new(),
            tab_size: Self::TAB_SIZE,
            column_width: Self::COLUMN_WIDTH,
            auto_indent: true,
            word_wrap: false,
            line_numbers: true,
            indent_guides: false,
            formatter: None,
        }
    }
}

impl Configuration {
    /// A collection of resource files to try loading in order of precedence.
    const TRY_FILES: [&str; 3] = [".makorc", ".mako/makorc", ".config/mako/makorc"];

    /// Returns a configuration that is formed by attempting to load a resource file
    /// from well-known locations.
    pub fn load() -> Result<Configuration> {
        let mut config = Configuration::default();
        let root_path = sys::home_dir();
        for try_path in Self::TRY_FILES {
            let path = root_path.join(try_path);
            if path.exists() {
                log::debug!("loading configuration from {}", path.as_string());
                let ext = Self::read_file(&path)?;
                config.apply(ext)?;
                break;
            }
        }
        Ok(config)
    }

    /// Returns a configuration loaded from the resource file at `path`.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Configuration> {
        let mut config = Configuration::default();
        let ext = Self::read_file(path.as_ref())?;
        config.apply(ext)?;
        Ok(config)
    }

    /// Returns a configuration parsed from `content`, where `origin` names the source
    /// in error messages.
    pub fn parse(origin: &str, content: &str) -> Result<Configuration> {
        let mut config = Configuration::default();
        let ext = toml::from_str::<ExternalConfiguration>(content)
            .map_err(|e| Error::configuration(origin, &e))?;
        config.apply(ext)?;
        Ok(config)
    }

    /// Turns the configuration into a [`ConfigurationRef`].
    pub fn to_ref(self) -> ConfigurationRef {
        Rc::new(self)
    }

    /// Applies the relevant settings from `opts` on top of `self`.
    pub fn apply_opts(&mut self, opts: &Options) {
        self.settings.apply_opts(opts);
        if let Some(tab_size) = opts.tab_size {
            let tab_size = tab_size.max(1);
            self.default_profile.tab_size = tab_size;
            for profile in self.languages.values_mut() {
                profile.tab_size = tab_size;
            }
        }
    }

    /// Returns the profile whose extensions include the extension of `file_name`,
    /// or the default profile if none match.
    ///
    /// Extensions are compared without case, and the first matching profile in
    /// order of declaration wins.
    pub fn profile(&self, file_name: &str) -> &LanguageProfile {
        let ext = Path::new(file_name)
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase());
        ext.and_then(|ext| {
            self.languages
                .values()
                .find(|profile| profile.extensions.iter().any(|e| e.to_lowercase() == ext))
        })
        .unwrap_or(&self.default_profile)
    }

    /// Applies the external configuration `ext` on top of `self`.
    ///
    /// Language profiles inherit from the default profile after it has been updated.
    fn apply(&mut self, ext: ExternalConfiguration) -> Result<()> {
        self.settings.apply(ext.settings);
        if let Some(default) = ext.default {
            self.default_profile.apply(default)?;
        }
        if let Some(languages) = ext.languages {
            for (name, profile) in languages {
                let profile = self.default_profile.derive(&name, profile)?;
                self.languages.insert(name, profile);
            }
        }
        Ok(())
    }

    fn read_file(path: &Path) -> Result<ExternalConfiguration> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(&path.as_string(), e))?;
        toml::from_str::<ExternalConfiguration>(&content)
            .map_err(|e| Error::configuration(&path.as_string(), &e))
    }
}

impl Default for Configuration {
    fn default() -> Configuration {
        Configuration {
            settings: Settings::default(),
            default_profile: LanguageProfile::default(),
            languages: IndexMap::new(),
        }
    }
}
