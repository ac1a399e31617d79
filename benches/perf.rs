use std::sync::Arc;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use katex_siunitx::macros::MacroDefinition;
use katex_siunitx::siunitx::UnitTables;
use katex_siunitx::{KatexContext, Settings, render_to_string};

struct PreparedCase {
    name: &'static str,
    tex: &'static str,
    settings: Arc<Settings>,
}

const CASES: [(&str, &str); 6] = [
    ("SiSingle", r"\si{\kilo\metre}"),
    ("SiCompound", r"\si{\kilo\gram\metre\per\second\squared}"),
    ("SiAbbreviations", r"\si{\kHz} \si{\mV} \si{\umol} \si{\GPa}"),
    ("SiGlyphs", r"\si{\micro\ohm} \si{\degreeCelsius} \si{\angstrom}"),
    ("SiQuantity", r"v = \SI{3.0e8}{\metre\per\second}"),
    ("UserMacro", r"\SI{9.81}{\accel}"),
];

fn build_settings(name: &str) -> Settings {
    let settings = Settings::default();
    if name == "UserMacro" {
        settings.macros.borrow_mut().insert(
            "\\accel".to_owned(),
            MacroDefinition::String("\\metre\\per\\second\\squared".to_owned()),
        );
    }
    settings
}

fn bench_tables(c: &mut Criterion) {
    c.bench_function("unit_tables_new", |b| {
        b.iter(|| black_box(UnitTables::new()));
    });
}

fn bench_rendering(c: &mut Criterion) {
    let ctx = Arc::new(KatexContext::default());
    let cases: Vec<PreparedCase> = CASES
        .iter()
        .map(|&(name, tex)| PreparedCase {
            name,
            tex,
            settings: Arc::new(build_settings(name)),
        })
        .collect();

    let mut group = c.benchmark_group("siunitx_render");
    for PreparedCase {
        name,
        tex,
        settings,
    } in cases
    {
        let ctx = Arc::clone(&ctx);

        // Ensure rendering succeeds once before measuring performance.
        render_to_string(ctx.as_ref(), tex, settings.as_ref())
            .expect("rendering failed while priming benchmark caches");

        group.bench_function(name, move |b| {
            b.iter(|| {
                let rendered = render_to_string(ctx.as_ref(), tex, settings.as_ref())
                    .expect("rendering failed during benchmark");
                black_box(rendered.len());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tables, bench_rendering);
criterion_main!(benches);
