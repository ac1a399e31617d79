mod setup;

use katex_siunitx::{
    Settings,
    parser::parse_node::{AnyParseNode, ParseNode},
    siunitx::{RunPiece, UnitTables},
    types::ParseErrorKind,
};
use setup::{default_ctx, get_parsed, it, nonstrict_settings, strict_settings};

fn units_of(tree: &[ParseNode]) -> &katex_siunitx::parser::parse_node::ParseNodeSiUnits {
    assert_let!(Some(AnyParseNode::SiUnits(units)) = tree.first());
    units
}

#[test]
fn abbreviations_match_explicit_commands() {
    it("every abbreviation builds like its expansion", || {
        let settings = Settings::default();
        for entry in default_ctx().units.abbreviations() {
            expect!(&format!(r"\si{{\{}}}", entry.token))
                .to_parse_like(&format!(r"\si{{{}}}", entry.expansion), &settings)?;
            expect!(&format!(r"\si{{\{}}}", entry.token))
                .to_build_like(&format!(r"\si{{{}}}", entry.expansion), &settings)?;
        }
        Ok(())
    });
}

#[test]
fn km_renders_like_kilo_metre() {
    it(r"\km renders identically to \kilo\metre", || {
        expect!(r"\si{\km}").to_build_like(r"\si{\kilo\metre}", &Settings::default())
    });
}

#[test]
fn double_prefix_fails() {
    it("a second prefix before a unit is an error", || {
        expect!(r"\si{\kilo\milli\metre}").not_to_parse(&Settings::default())?;

        let err = get_parsed(r"\si{\kilo\milli\metre}", &Settings::default()).unwrap_err();
        assert_let!(ParseErrorKind::DoubleSiPrefix { first, second } = err.kind.as_ref());
        assert_eq!(first, r"\kilo");
        assert_eq!(second, r"\milli");
        Ok(())
    });
}

#[test]
fn double_prefix_through_abbreviation_fails() {
    it("an abbreviation after a prefix is a double prefix", || {
        let err = get_parsed(r"\si{\milli\km}", &Settings::default()).unwrap_err();
        assert_let!(ParseErrorKind::DoubleSiPrefix { first, second } = err.kind.as_ref());
        assert_eq!(first, r"\milli");
        assert_eq!(second, r"\kilo");
        Ok(())
    });
}

#[test]
fn dangling_prefix_fails() {
    it("a lone prefix is an error", || {
        for expr in [r"\si{\kilo}", r"\SI{1}{\metre\mega}"] {
            let err = get_parsed(expr, &Settings::default()).unwrap_err();
            assert!(
                matches!(err.kind.as_ref(), ParseErrorKind::DanglingSiPrefix { .. }),
                "{expr}: {err}"
            );
        }
        Ok(())
    });
}

#[test]
fn literal_passthrough() {
    it("literal-only unit strings pass through and set the flag", || {
        let tree = get_parsed(r"\si{abc}", &Settings::default())?;
        let units = units_of(&tree);
        assert!(units.expression.had_literal);
        assert!(units.expression.runs.is_empty());
        let texts: Vec<_> = units.expression.body.iter().filter_map(ParseNode::text).collect();
        assert_eq!(texts, ["a", "b", "c"]);

        let tree = get_parsed(r"\si{\kilo\metre}", &Settings::default())?;
        assert!(!units_of(&tree).expression.had_literal);
        Ok(())
    });
}

#[test]
fn quantity_spacing() {
    it(r"\SI{5}{\kilo\hertz} is a number, one space and one run", || {
        let markup = expect!(r"\SI{5}{\kilo\hertz}").to_markup(&Settings::default())?;
        assert!(
            markup.contains(
                "<mrow><mn>5</mn><mtext>\u{2009}</mtext><mi mathvariant=\"normal\">kHz</mi></mrow>"
            ),
            "{markup}"
        );
        assert_eq!(markup.matches("<mtext>").count(), 1);
        Ok(())
    });
}

#[test]
fn quantity_space_is_configurable() {
    it("the quantity space comes from the settings", || {
        let settings = Settings::builder()
            .quantity_space(katex_siunitx::units::MeasurementOwned {
                number: 0.5,
                unit: "em".to_owned(),
            })
            .build();
        let markup = expect!(r"\SI{5}{\metre}").to_markup(&settings)?;
        assert!(markup.contains("<mspace width=\"0.5em\"/>"), "{markup}");
        Ok(())
    });
}

#[test]
fn shipped_groups_have_no_defects() {
    it("the shipped abbreviation groups are clean", || {
        let tables = UnitTables::new();
        assert!(tables.defects().is_empty(), "{:?}", tables.defects());
        assert!(tables.abbreviations().count() > 50);
        Ok(())
    });
}

#[test]
fn abbreviation_units_are_tabled() {
    it("every unit reachable through an abbreviation is in the table", || {
        let tables = UnitTables::new();
        for entry in tables.abbreviations() {
            assert_eq!(tables.lookup_unit(entry.unit.name), Some(entry.unit));
        }
        Ok(())
    });
}

#[test]
fn glyph_units() {
    it("glyph units render as their own pieces", || {
        let tree = get_parsed(r"\si{\micro\ohm}", &Settings::default())?;
        let units = units_of(&tree);
        assert_eq!(units.expression.runs.len(), 1);
        assert_eq!(units.expression.runs[0].pieces.len(), 2);
        assert!(
            units.expression.runs[0]
                .pieces
                .iter()
                .all(|piece| matches!(piece, RunPiece::Glyph(_)))
        );
        Ok(())
    });
}

#[test]
fn aliases() {
    it("aliases expand to their target commands", || {
        let settings = Settings::default();
        expect!(r"\si{\kilo\meter}").to_build_like(r"\si{\kilo\metre}", &settings)?;
        expect!(r"\si{\kg}").to_build_like(r"\si{\kilogram}", &settings)?;
        expect!(r"\si{\metre\squared}").to_build_like(r"\si{\metre^{2}}", &settings)?;
        expect!(r"\si{\centi\metre\cubed}").to_build_like(r"\si{\centi\metre^{3}}", &settings)
    });
}

#[test]
fn per_is_a_negative_power() {
    it(r"\per raises the next unit to the power of minus one", || {
        let settings = Settings::default();
        expect!(r"\si{\metre\per\second}")
            .to_parse_like(r"\si{\metre\second^{-1}}", &settings)?;
        expect!(r"\si{\kilo\gram\metre\per\second\squared}")
            .to_build_like(r"\si{\kilo\gram\metre\second^{-2}}", &settings)?;
        expect!(r"\SI{9.81}{\metre\per\second\squared}")
            .to_build_like(r"\SI{9.81}{\metre\second^{-2}}", &settings)?;
        expect!(r"\si{\per\kHz}").to_build_like(r"\si{\kilo\hertz^{-1}}", &settings)?;

        let tree = get_parsed(r"\si{\metre\per\second}", &settings)?;
        assert!(!units_of(&tree).expression.had_literal);
        Ok(())
    });
}

#[test]
fn misplaced_per_fails() {
    it(r"\per needs exactly one unit after it", || {
        let settings = Settings::default();
        let err = get_parsed(r"\si{\metre\per}", &settings).unwrap_err();
        assert_let!(ParseErrorKind::DanglingSiPer = err.kind.as_ref());
        let err = get_parsed(r"\si{\per\per\metre}", &settings).unwrap_err();
        assert_let!(ParseErrorKind::DoubleSiPer = err.kind.as_ref());

        let err = get_parsed(r"\per", &settings).unwrap_err();
        assert_let!(ParseErrorKind::UnitCommandOutsideUnitField { name } = err.kind.as_ref());
        assert_eq!(name, r"\per");
        Ok(())
    });
}

#[test]
fn literals_inside_a_prefix_come_first() {
    it("a literal between a prefix and its unit precedes the run", || {
        let settings = Settings::default();
        expect!(r"\si{\kilo x\metre}").to_build_like(r"\si{x\kilo\metre}", &settings)?;
        expect!(r"\si{\kilo^2\metre}").to_build_like(r"\si{^2\kilo\metre}", &settings)?;

        let tree = get_parsed(r"\si{\kilo x\metre}", &settings)?;
        let units = units_of(&tree);
        assert!(units.expression.had_literal);
        assert_let!([AnyParseNode::MathOrd(x), AnyParseNode::UnitRun(run)] = &units.expression.body[..]);
        assert_eq!(x.text, "x");
        assert_eq!(run.run.text(), "km");
        Ok(())
    });
}

#[test]
fn unit_vocabulary_is_scoped() {
    it("unit commands only exist inside a unit field", || {
        let settings = Settings::default();
        expect!(r"\kilo").not_to_parse(&settings)?;
        expect!(r"\si{\kilo\metre}\metre").not_to_parse(&settings)?;
        expect!(r"\si{\kilo\metre}x").to_parse(&settings)?;

        let err = get_parsed(r"\kHz", &settings).unwrap_err();
        assert_let!(ParseErrorKind::UnitCommandOutsideUnitField { name } = err.kind.as_ref());
        assert_eq!(name, r"\kHz");
        Ok(())
    });
}

#[test]
fn units_in_text_and_scripts() {
    it("fields parse inside text and script arguments", || {
        let settings = strict_settings();
        expect!(r"\text{speed \si{\metre\per\second}}").to_parse(&settings)?;
        expect!(r"x_{\si{\kilo\gram}}").to_parse(&settings)?;
        expect!(r"\SI{3.0}{\kHz}^2").to_parse(&settings)
    });
}

#[test]
fn user_macros_reach_unit_fields() {
    it("user macros expand inside unit fields", || {
        let settings = Settings::default();
        expect!(r"\def\speed{\metre\per\second}\si{\kilo\speed}")
            .to_build_like(r"\si{\kilo\metre\per\second}", &settings)
    });
}

#[test]
fn errors_render_in_place() {
    it("with throw_on_error unset errors become a span", || {
        let markup = katex_siunitx::render_to_string(
            default_ctx(),
            r"\si{\kilo}",
            &nonstrict_settings(),
        )?;
        assert!(markup.starts_with("<span class=\"katex-error\""));
        assert!(markup.contains("is not followed by a unit"));
        Ok(())
    });
}

