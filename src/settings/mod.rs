//! Check, get, and set desktop settings through `xdg-settings`.
//!
//! See <https://portland.freedesktop.org/doc/xdg-settings.html>.
//!
//! ```rust,no_run
//! # use xdgbase::settings::{Setting, DEFAULT_URL_SCHEME_HANDLER_PROPERTY, DEFAULT_WEB_BROWSER_PROPERTY};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let browser = Setting::new(DEFAULT_WEB_BROWSER_PROPERTY);
//! let is_firefox = browser.check("firefox.desktop")?;
//!
//! let http = Setting::new(DEFAULT_URL_SCHEME_HANDLER_PROPERTY).with_sub_property("http");
//! let handler = http.get()?;
//! http.set(&handler)?;
//! # Ok(())
//! # }
//! ```

use std::ffi::{OsStr, OsString};
use std::process::Command;

use thiserror::Error;
use tracing::debug;

use crate::os::command_ext::{CommandError, CommandExt};

/// Default program used by [`SettingsTool`].
pub const SETTINGS_PROGRAM: &str = "xdg-settings";

/// Default URL scheme handler property, takes the scheme as sub-property.
pub const DEFAULT_URL_SCHEME_HANDLER_PROPERTY: &str = "default-url-scheme-handler";

/// Default web browser property.
pub const DEFAULT_WEB_BROWSER_PROPERTY: &str = "default-web-browser";

/// Errors returned by [`SettingsTool`] and [`Setting`].
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Running the settings program failed, including a non-zero exit.
    #[error(transparent)]
    Command(#[from] CommandError),

    /// `check` printed something other than `yes` or `no`.
    #[error("checking {setting} = {value:?}: expected \"yes\" or \"no\", got {output:?}")]
    UnexpectedOutput {
        setting: Setting,
        value: String,
        output: String,
    },
}

/// A settings property, optionally narrowed by a sub-property.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Setting {
    pub property: String,
    pub sub_property: Option<String>,
}

impl std::fmt::Display for Setting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.sub_property {
            Some(sub_property) => write!(f, "{} {}", self.property, sub_property),
            None => f.write_str(&self.property),
        }
    }
}

impl Setting {
    /// Create a [`Setting`] for `property` without a sub-property.
    pub fn new(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            sub_property: None,
        }
    }

    /// Narrow `self` to `sub_property`, e.g. the scheme of
    /// [`DEFAULT_URL_SCHEME_HANDLER_PROPERTY`].
    pub fn with_sub_property(mut self, sub_property: impl Into<String>) -> Self {
        self.sub_property = Some(sub_property.into());
        self
    }

    /// Check whether `self` is set to `value`, using the default [`SettingsTool`].
    pub fn check(&self, value: &str) -> Result<bool, SettingsError> {
        SettingsTool::default().check(self, value)
    }

    /// Get the value of `self`, using the default [`SettingsTool`].
    pub fn get(&self) -> Result<String, SettingsError> {
        SettingsTool::default().get(self)
    }

    /// Set `self` to `value`, using the default [`SettingsTool`].
    pub fn set(&self, value: &str) -> Result<(), SettingsError> {
        SettingsTool::default().set(self, value)
    }
}

/// Settings program invocation.
///
/// Runs `{program} {args..} {check|get|set} <property> [<sub-property>] [<value>]`.
/// [`Default`] runs plain [`SETTINGS_PROGRAM`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsTool {
    program: OsString,
    args: Vec<OsString>,
}

impl Default for SettingsTool {
    fn default() -> Self {
        Self::new(SETTINGS_PROGRAM)
    }
}

impl SettingsTool {
    /// Use `program` instead of [`SETTINGS_PROGRAM`].
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
        }
    }

    /// Pass `arg` to the program ahead of the verb.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    fn command(&self, verb: &str, setting: &Setting, value: Option<&str>) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args).args(operands(verb, setting, value));
        command
    }

    fn run(
        &self,
        verb: &str,
        setting: &Setting,
        value: Option<&str>,
    ) -> Result<String, SettingsError> {
        debug!(program = ?self.program, verb, %setting, ?value, "running settings program");
        Ok(self.command(verb, setting, value).trimmed_stdout()?)
    }

    /// Check whether `setting` is set to `value`.
    ///
    /// # Returns
    /// [`SettingsError::UnexpectedOutput`] if the program answers anything but `yes` or `no`.
    pub fn check(&self, setting: &Setting, value: &str) -> Result<bool, SettingsError> {
        let output = self.run("check", setting, Some(value))?;
        parse_check(&output).ok_or_else(|| SettingsError::UnexpectedOutput {
            setting: setting.clone(),
            value: value.to_owned(),
            output,
        })
    }

    /// Get the value of `setting`, with surrounding whitespace removed.
    pub fn get(&self, setting: &Setting) -> Result<String, SettingsError> {
        self.run("get", setting, None)
    }

    /// Set `setting` to `value`.
    pub fn set(&self, setting: &Setting, value: &str) -> Result<(), SettingsError> {
        self.run("set", setting, Some(value)).map(drop)
    }
}

fn operands<'a>(verb: &'a str, setting: &'a Setting, value: Option<&'a str>) -> Vec<&'a str> {
    let mut operands = vec![verb, setting.property.as_str()];
    operands.extend(setting.sub_property.as_deref());
    operands.extend(value);
    operands
}

fn parse_check(output: &str) -> Option<bool> {
    match output {
        "yes" => Some(true),
        "no" => Some(false),
        _ => None,
    }
}
