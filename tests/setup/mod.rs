#![allow(dead_code)]

use std::{
    panic::{UnwindSafe, catch_unwind},
    sync::OnceLock,
};

#[cfg(feature = "backtrace")]
use std::backtrace::Backtrace;

#[cfg(feature = "backtrace")]
use btparse::deserialize;

use katex_siunitx::{
    KatexContext, ParseError, Settings, parse,
    parser::parse_node::{AnyParseNode, ParseNode},
    render_to_string,
    types::ParseErrorKind,
};

static DEFAULT_CONTEXT: OnceLock<KatexContext> = OnceLock::new();
pub fn default_ctx() -> &'static KatexContext {
    DEFAULT_CONTEXT.get_or_init(KatexContext::default)
}

/// Installs a `tracing` subscriber once so `RUST_LOG=katex_siunitx=debug`
/// shows parser and table logs during a test run.
pub fn init_tracing() {
    static INIT: OnceLock<()> = OnceLock::new();
    INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub struct TestExpr<'a> {
    pub expr: String,
    pub ctx: &'a KatexContext,
    pub file: &'static str,
    pub line: u32,
    pub code: &'static str,
}

/// Set all `loc` to None for easier comparison
pub fn strip_positions(nodes: &mut [ParseNode]) {
    for node in nodes.iter_mut() {
        strip_positions_single(node);
    }
}

fn strip_positions_single(node: &mut ParseNode) {
    match node {
        AnyParseNode::Atom(n) => n.loc = None,
        AnyParseNode::Color(n) => {
            n.loc = None;
            strip_positions(&mut n.body);
        }
        AnyParseNode::ColorToken(n) => n.loc = None,
        AnyParseNode::Font(n) => {
            n.loc = None;
            strip_positions_single(&mut n.body);
        }
        AnyParseNode::Internal(n) => n.loc = None,
        AnyParseNode::Kern(n) => n.loc = None,
        AnyParseNode::MathOrd(n) => n.loc = None,
        AnyParseNode::OrdGroup(n) => {
            n.loc = None;
            strip_positions(&mut n.body);
        }
        AnyParseNode::SiQuantity(n) => {
            n.loc = None;
            strip_positions(&mut n.number);
            n.units.loc = None;
            strip_positions(&mut n.units.expression.body);
        }
        AnyParseNode::SiUnits(n) => {
            n.loc = None;
            strip_positions(&mut n.expression.body);
        }
        AnyParseNode::Size(n) => n.loc = None,
        AnyParseNode::Spacing(n) => n.loc = None,
        AnyParseNode::SupSub(n) => {
            n.loc = None;
            for part in [&mut n.base, &mut n.sup, &mut n.sub].into_iter().flatten() {
                strip_positions_single(part);
            }
        }
        AnyParseNode::Text(n) => {
            n.loc = None;
            strip_positions(&mut n.body);
        }
        AnyParseNode::TextOrd(n) => n.loc = None,
        AnyParseNode::UnitRun(n) => n.loc = None,
    }
}

impl TestExpr<'_> {
    pub fn to_parse(self, settings: &Settings) -> Result<(), ParseError> {
        parse(self.ctx, &self.expr, settings).map(|_| ())
    }

    pub fn not_to_parse(self, settings: &Settings) -> Result<(), ParseError> {
        match parse(self.ctx, &self.expr, settings) {
            Ok(_) => Err(ParseError::new(ParseErrorKind::ExpectedParseFailure {
                expression: self.expr.clone(),
            })),
            Err(_) => Ok(()),
        }
    }

    pub fn to_parse_like(self, other: &str, settings: &Settings) -> Result<(), ParseError> {
        let mut tree1 = parse(self.ctx, &self.expr, settings)?;
        let mut tree2 = parse(self.ctx, other, settings)?;

        strip_positions(&mut tree1);
        strip_positions(&mut tree2);

        assert_eq!(
            tree1, tree2,
            "Parse trees do not match between '{}' and '{}' ({}:{}: {})",
            self.expr, other, self.file, self.line, self.code
        );
        Ok(())
    }

    /// Compares the rendered markup, ignoring the TeX annotation.
    pub fn to_build_like(self, other: &str, settings: &Settings) -> Result<(), ParseError> {
        let left = strip_annotation(&render_to_string(self.ctx, &self.expr, settings)?);
        let right = strip_annotation(&render_to_string(self.ctx, other, settings)?);
        if left == right {
            Ok(())
        } else {
            Err(ParseError::new(ParseErrorKind::MarkupMismatch {
                left_expr: self.expr.clone(),
                right_expr: other.to_owned(),
                left_markup: left,
                right_markup: right,
            }))
        }
    }

    pub fn to_markup(self, settings: &Settings) -> Result<String, ParseError> {
        render_to_string(self.ctx, &self.expr, settings).map(|markup| strip_annotation(&markup))
    }
}

/// Drops the `<annotation>` element, which repeats the source TeX.
pub fn strip_annotation(markup: &str) -> String {
    match (markup.find("<annotation"), markup.find("</annotation>")) {
        (Some(start), Some(end)) => {
            let mut out = markup[..start].to_owned();
            out.push_str(&markup[end + "</annotation>".len()..]);
            out
        }
        _ => markup.to_owned(),
    }
}

pub fn expect_impl(
    expr: &str,
    file: &'static str,
    line: u32,
    code: &'static str,
) -> TestExpr<'static> {
    TestExpr {
        expr: expr.to_string(),
        ctx: default_ctx(),
        file,
        line,
        code,
    }
}

#[macro_export]
macro_rules! expect {
    ($e:expr) => {
        $crate::setup::expect_impl($e, file!(), line!(), stringify!($e))
    };
}

#[cfg(feature = "backtrace")]
fn format_backtrace(bt_serialized: &Backtrace) -> String {
    let mut traces = Vec::new();
    let Ok(backtrace) = deserialize(bt_serialized) else {
        return "<unparsable backtrace>".to_string();
    };
    for frame in backtrace.frames {
        let function = frame.function;
        if function.starts_with("katex_siunitx::types::parse_error::ParseError")
            || function.starts_with("core::ops::function::FnOnce")
        {
            continue;
        }
        if function.starts_with("std::panicking") {
            break;
        }
        let loc = match (frame.file, frame.line) {
            (Some(file), Some(line)) => format!("{}:{}", file, line),
            (Some(file), None) => file,
            _ => "<unknown>".to_string(),
        };
        traces.push(format!("at {} ({})", function, loc));
    }
    traces.join("\n")
}

#[cfg(feature = "backtrace")]
fn error_trace(e: &ParseError) -> String {
    format_backtrace(&e.backtrace)
}

#[cfg(not(feature = "backtrace"))]
fn error_trace(_e: &ParseError) -> String {
    "<enable the `backtrace` feature>".to_string()
}

pub fn it<F>(desc: &str, test_fn: F)
where
    F: FnOnce() -> Result<(), ParseError> + UnwindSafe,
{
    init_tracing();
    let result = catch_unwind(test_fn);

    match result {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            panic!(
                "Test '{}' failed with Result::Err: {}\nBacktrace:\n{}",
                desc,
                e,
                error_trace(&e)
            );
        }
        Err(panic_payload) => {
            let msg = if let Some(s) = panic_payload.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic_payload.downcast_ref::<String>() {
                s.clone()
            } else {
                "<non-string panic payload>".to_string()
            };
            panic!(
                "Test '{}' panicked: {}\n(no ParseError backtrace, since this was a raw panic)",
                desc, msg
            );
        }
    }
}

/// Settings helpers
pub fn strict_settings() -> Settings {
    Settings::builder()
        .throw_on_error(true)
        .strict(katex_siunitx::StrictSetting::Bool(true))
        .build()
}

pub fn nonstrict_settings() -> Settings {
    Settings::builder()
        .throw_on_error(false)
        .strict(katex_siunitx::StrictSetting::Bool(false))
        .build()
}

pub fn get_parsed(expr: &str, settings: &Settings) -> Result<Vec<ParseNode>, ParseError> {
    parse(default_ctx(), expr, settings)
}

pub fn get_parsed_strict(expr: &str) -> Result<Vec<ParseNode>, ParseError> {
    let settings = strict_settings();
    parse(default_ctx(), expr, &settings)
}

pub fn render_to_string_strict(expr: &str) -> Result<String, ParseError> {
    let settings = strict_settings();
    render_to_string(default_ctx(), expr, &settings)
}

#[macro_export]
macro_rules! assert_let {
    ($pat:pat = $expr:expr, $($arg:tt)+) => {
        let $pat = $expr else {
            panic!($($arg)+);
        };
    };
    ($pat:pat = $expr:expr) => {
        let $pat = $expr else {
            panic!(
                "assert_let failed: pattern `{}` did not match {} at {}:{} \n{:#?}",
                stringify!($pat), stringify!($expr),
                file!(), line!(),
                $expr
            );
        };
    };
}
