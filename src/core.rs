//! Main entry points and error rendering

use core::fmt::Write as _;

use tracing::{debug, instrument};

use crate::{
    KatexContext, build_mathml,
    options::Options,
    parser::{Parser, parse_node::AnyParseNode},
    tree::VirtualNode as _,
    types::{ParseError, Settings},
    utils::escape,
};

/// Renders a failed expression as a span in the error color, or returns the
/// error when `throw_on_error` is set.
fn render_error(
    error: ParseError,
    expression: &str,
    settings: &Settings,
) -> Result<String, ParseError> {
    if settings.throw_on_error {
        return Err(error);
    }
    debug!(%error, "rendering error in place of expression");

    let mut markup = String::new();
    write!(
        markup,
        "<span class=\"katex-error\" title=\"{}\" style=\"color:{}\">{}</span>",
        escape(&error.to_string()),
        escape(&settings.error_color),
        escape(expression)
    )?;
    Ok(markup)
}

/// Parses an expression and returns the parse tree.
///
/// A `\color` switch does not outlive the call, even with
/// [`Settings::global_group`].
pub fn parse(
    ctx: &KatexContext,
    expression: &str,
    settings: &Settings,
) -> Result<Vec<AnyParseNode>, ParseError> {
    let mut parser = Parser::new(expression, settings, ctx);
    let tree = parser.parse();
    parser.gullet.macros_mut().set("\\current@color", None, true);
    tree
}

fn render_markup(
    ctx: &KatexContext,
    expression: &str,
    settings: &Settings,
) -> Result<String, ParseError> {
    let tree = parse(ctx, expression, settings)?;
    let math = build_mathml::build_mathml(
        ctx,
        &tree,
        expression,
        &Options::default(),
        settings.display_mode,
    )?;
    math.to_markup()
}

/// Parses and builds an expression, returning MathML markup.
///
/// With `throw_on_error` unset, a failing expression renders as a
/// `katex-error` span carrying the message in its title.
///
/// ```rust
/// use katex_siunitx::{KatexContext, Settings, render_to_string};
///
/// let ctx = KatexContext::default();
/// let markup = render_to_string(&ctx, r"\si{\kilo\metre}", &Settings::default()).unwrap();
/// assert!(markup.contains(r#"<mi mathvariant="normal">km</mi>"#));
/// ```
#[instrument(level = "debug", skip(ctx, settings))]
pub fn render_to_string(
    ctx: &KatexContext,
    expression: &str,
    settings: &Settings,
) -> Result<String, ParseError> {
    render_markup(ctx, expression, settings)
        .or_else(|error| render_error(error, expression, settings))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_wraps_in_math() {
        let ctx = KatexContext::default();
        let markup = render_to_string(&ctx, "x", &Settings::default()).unwrap();
        assert!(markup.starts_with("<math xmlns=\"http://www.w3.org/1998/Math/MathML\">"));
        assert!(markup.contains("<annotation encoding=\"application/x-tex\">x</annotation>"));
    }

    #[test]
    fn test_error_span() {
        let ctx = KatexContext::default();
        let settings = Settings::builder().throw_on_error(false).build();
        let markup = render_to_string(&ctx, r"\si{\kilo\milli\metre}", &settings).unwrap();
        assert!(markup.starts_with("<span class=\"katex-error\" title=\""));
        assert!(markup.contains("style=\"color:#cc0000\""));
        assert!(markup.ends_with(r">\si{\kilo\milli\metre}</span>"));

        assert!(render_to_string(&ctx, r"\si{\kilo\milli\metre}", &Settings::default()).is_err());
    }

    #[test]
    fn test_color_does_not_persist() {
        let ctx = KatexContext::default();
        let settings = Settings::builder().global_group(true).build();
        parse(&ctx, r"\color{red}x", &settings).unwrap();
        assert!(!settings.macros.borrow().contains_key("\\current@color"));
    }
}
