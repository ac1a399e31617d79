use core::cell::RefCell;

use bon::bon;
use tracing::warn;

use crate::macro_expander::MacroMap;
use crate::types::{ErrorLocationProvider, ParseError, ParseErrorKind};
use crate::units::MeasurementOwned;

/// How LaTeX-incompatible input is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrictMode {
    /// Accept the input silently.
    Ignore,
    /// Accept the input and emit a `tracing` warning.
    Warn,
    /// Reject the input with [`ParseErrorKind::StrictModeError`].
    Error,
}

/// The `strict` option, either a mode or the boolean shorthand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrictSetting {
    Mode(StrictMode),
    /// `true` means [`StrictMode::Error`], `false` means [`StrictMode::Ignore`].
    Bool(bool),
}

impl Default for StrictSetting {
    fn default() -> Self {
        Self::Mode(StrictMode::Ignore)
    }
}

impl StrictSetting {
    const fn mode(self) -> StrictMode {
        match self {
            Self::Mode(m) => m,
            Self::Bool(true) => StrictMode::Error,
            Self::Bool(false) => StrictMode::Ignore,
        }
    }
}

/// Options controlling parsing and rendering.
///
/// Build one with [`Settings::builder`]; every field has a default.
///
/// ```rust
/// use katex_siunitx::Settings;
/// use katex_siunitx::units::MeasurementOwned;
///
/// let settings = Settings::builder()
///     .display_mode(true)
///     .quantity_space(MeasurementOwned {
///         number: 0.25,
///         unit: "em".to_owned(),
///     })
///     .build();
/// assert!(settings.throw_on_error);
/// ```
#[derive(Debug, Clone)]
pub struct Settings {
    /// Render as a block (`display="block"`) instead of inline.
    pub display_mode: bool,
    /// Return errors instead of rendering them in `error_color`.
    pub throw_on_error: bool,
    /// Color used for rendered errors and unsupported commands.
    pub error_color: String,
    /// Global user macros. `\gdef` writes into this map.
    pub macros: RefCell<MacroMap>,
    /// How nonstrict input (such as a trailing `%` comment) is reported.
    pub strict: StrictSetting,
    /// Upper bound on macro expansions per render.
    pub max_expand: usize,
    /// Parse at the global group so `\def` persists across renders.
    pub global_group: bool,
    /// Width of the space `\SI` places between the number and its unit.
    pub quantity_space: MeasurementOwned,
}

#[bon]
impl Settings {
    #[must_use]
    #[builder]
    pub fn new(
        display_mode: Option<bool>,
        throw_on_error: Option<bool>,
        error_color: Option<String>,
        macros: Option<MacroMap>,
        strict: Option<StrictSetting>,
        max_expand: Option<usize>,
        global_group: Option<bool>,
        quantity_space: Option<MeasurementOwned>,
    ) -> Self {
        Self {
            display_mode: display_mode.unwrap_or(false),
            throw_on_error: throw_on_error.unwrap_or(true),
            error_color: error_color.unwrap_or_else(|| "#cc0000".to_owned()),
            macros: RefCell::from(macros.unwrap_or_default()),
            strict: strict.unwrap_or_default(),
            max_expand: max_expand.unwrap_or(1000),
            global_group: global_group.unwrap_or(false),
            quantity_space: quantity_space.unwrap_or_else(|| MeasurementOwned {
                number: 3.0,
                unit: "mu".to_owned(),
            }),
        }
    }

    /// Reports LaTeX-incompatible input according to the `strict` setting.
    pub fn report_nonstrict(
        &self,
        error_code: &str,
        error_msg: &str,
        token: Option<&dyn ErrorLocationProvider>,
    ) -> Result<(), ParseError> {
        match self.strict.mode() {
            StrictMode::Ignore => Ok(()),
            StrictMode::Error => {
                let kind = ParseErrorKind::StrictModeError {
                    message: error_msg.to_owned(),
                    code: error_code.to_owned(),
                };
                if let Some(t) = token {
                    Err(ParseError::with_token(kind, t))
                } else {
                    Err(ParseError::new(kind))
                }
            }
            StrictMode::Warn => {
                warn!(
                    code = error_code,
                    "LaTeX-incompatible input and strict mode is set to 'warn': {error_msg}"
                );
                Ok(())
            }
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(!settings.display_mode);
        assert!(settings.throw_on_error);
        assert_eq!(settings.error_color, "#cc0000");
        assert_eq!(settings.max_expand, 1000);
        assert_eq!(settings.quantity_space.number, 3.0);
        assert_eq!(settings.quantity_space.unit, "mu");
    }

    #[test]
    fn test_report_nonstrict_modes() {
        let lenient = Settings::builder()
            .strict(StrictSetting::Mode(StrictMode::Warn))
            .build();
        assert!(lenient.report_nonstrict("code", "message", None).is_ok());

        let strict = Settings::builder().strict(StrictSetting::Bool(true)).build();
        let err = strict
            .report_nonstrict("unknownSymbol", "Unrecognized Unicode character", None)
            .unwrap_err();
        assert!(matches!(
            err.kind.as_ref(),
            ParseErrorKind::StrictModeError { code, .. } if code == "unknownSymbol"
        ));
    }
}
