//! Typewriter benchmark: per-step cost of typing and backspacing.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pacer::Typewriter;

const WELCOME: &str = "Heya! I'm the one-and-only, all-comedy kiosk bot.\n\
    So, do you have any ideas for a skit? Maybe ask your lovely audience? :-)";

fn typewriter_type_full_text(c: &mut Criterion) {
    c.bench_function("typewriter_type_welcome", |b| {
        b.iter(|| {
            let mut typewriter = Typewriter::new();
            typewriter.set_text(black_box(WELCOME));
            while typewriter.step().is_some() {}
            black_box(typewriter.display().len())
        });
    });
}

fn typewriter_replace_text(c: &mut Criterion) {
    c.bench_function("typewriter_backspace_and_retype", |b| {
        let mut typewriter = Typewriter::new();
        typewriter.set_text(WELCOME);
        typewriter.skip();

        b.iter(|| {
            typewriter.set_text(black_box("Generating…"));
            while typewriter.step().is_some() {}
            typewriter.set_text(WELCOME);
            typewriter.skip();
        });
    });
}

criterion_group!(benches, typewriter_type_full_text, typewriter_replace_text);
criterion_main!(benches);
