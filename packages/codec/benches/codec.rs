use criterion::{criterion_group, criterion_main, Criterion};
use jobfile_codec::Document;
use std::hint::black_box;

const JOB: &str = include_str!("../tests/fixtures/job.txt");

fn parse_job(c: &mut Criterion) {
    c.bench_function("parse_job", |b| b.iter(|| Document::parse(black_box(JOB))));
}

fn render_job(c: &mut Criterion) {
    let Ok(doc) = Document::parse(JOB) else {
        return;
    };
    c.bench_function("render_job", |b| b.iter(|| black_box(&doc).render(true)));
}

fn merge_jobs(c: &mut Criterion) {
    let Ok(doc) = Document::parse(JOB) else {
        return;
    };
    c.bench_function("merge_job_with_itself", |b| {
        b.iter(|| Document::merge(black_box(&doc), black_box(&doc)))
    });
}

criterion_group!(benches, parse_job, render_job, merge_jobs);
criterion_main!(benches);
