// ABOUTME: Criterion benchmarks for per-frame form analysis
// ABOUTME: Measures geometry helpers, feedback delivery, each analyzer and the session coordinator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for per-frame form analysis.
//!
//! A camera delivers 30 frames per second, so one analyzer call has a budget
//! of a few milliseconds at most. These benches track how far below it we are.

#![allow(
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    clippy::cast_precision_loss,
    missing_docs
)]

use std::f64::consts::TAU;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pierre_form_coach::intelligence::{build_analyzer, FeedbackManager, FormConfig};
use pierre_form_coach::pose::geometry::{angle, line_straightness, signed_line_offset};
use pierre_form_coach::pose::{Landmark, LandmarkId, Point2};
use pierre_form_coach::{AnalysisCoordinator, ExerciseKind, FeedbackPriority, LandmarkSet};

/// Frames in one synthetic clip (ten seconds at 30 fps)
const CLIP_FRAMES: usize = 300;

const FRAME_DT: f64 = 1.0 / 30.0;

/// A full-body pose that bends and straightens once every `period` frames
fn moving_pose(frame: usize, period: usize) -> LandmarkSet {
    let phase = (frame % period) as f64 / period as f64;
    let bend = 0.5 - 0.5 * (phase * TAU).cos();
    let spread = 0.05 + 0.1 * bend;

    let mut pose = LandmarkId::ALL.iter().fold(LandmarkSet::new(), |set, id| {
        set.with(*id, Landmark::new(0.5, 0.5, 0.0, 0.95))
    });
    let joints = [
        (LandmarkId::LeftShoulder, 0.45, 0.25 + 0.1 * bend),
        (LandmarkId::RightShoulder, 0.55, 0.25 + 0.1 * bend),
        (LandmarkId::LeftElbow, 0.45 - spread, 0.4),
        (LandmarkId::RightElbow, 0.55 + spread, 0.4),
        (LandmarkId::LeftWrist, 0.45 - 2.0 * spread, 0.4 - 0.15 * bend),
        (LandmarkId::RightWrist, 0.55 + 2.0 * spread, 0.4 - 0.15 * bend),
        (LandmarkId::LeftHip, 0.47, 0.55 + 0.1 * bend),
        (LandmarkId::RightHip, 0.53, 0.55 + 0.1 * bend),
        (LandmarkId::LeftKnee, 0.47 - 0.1 * bend, 0.72),
        (LandmarkId::RightKnee, 0.53 + 0.1 * bend, 0.72),
        (LandmarkId::LeftAnkle, 0.47 - spread, 0.9),
        (LandmarkId::RightAnkle, 0.53 + spread, 0.9),
    ];
    for (id, x, y) in joints {
        pose.insert(id, Landmark::new(x, y, 0.0, 0.95));
    }
    pose
}

fn clip() -> Vec<LandmarkSet> {
    (0..CLIP_FRAMES).map(|frame| moving_pose(frame, 45)).collect()
}

fn bench_geometry(c: &mut Criterion) {
    let shoulder = Point2::new(0.3, 0.5);
    let hip = Point2::new(0.55, 0.53);
    let ankle = Point2::new(0.8, 0.5);

    let mut group = c.benchmark_group("geometry");
    group.bench_function("angle", |b| {
        b.iter(|| angle(black_box(shoulder), black_box(hip), black_box(ankle)));
    });
    group.bench_function("signed_line_offset", |b| {
        b.iter(|| signed_line_offset(black_box(hip), black_box(shoulder), black_box(ankle)));
    });
    group.bench_function("line_straightness", |b| {
        b.iter(|| {
            line_straightness(
                black_box(shoulder),
                black_box(hip),
                black_box(ankle),
                black_box(2.0),
            )
        });
    });
    group.finish();
}

fn bench_feedback_manager(c: &mut Criterion) {
    const MESSAGES: [&str; 4] = [
        "Keep your hips up, avoid sagging",
        "Lower your chest closer to the ground",
        "Keep your elbows closer to your body",
        "Keep your head in line with your spine",
    ];

    let mut group = c.benchmark_group("feedback_manager");
    group.throughput(Throughput::Elements(CLIP_FRAMES as u64));
    group.bench_function("record_and_deliver", |b| {
        b.iter(|| {
            let mut manager = FeedbackManager::new(30);
            let mut delivered = 0;
            for frame in 0..CLIP_FRAMES {
                manager.record(MESSAGES[frame % MESSAGES.len()], FeedbackPriority::Medium);
                manager.advance_frame();
                delivered += manager.get(3, 15).len();
            }
            black_box(delivered)
        });
    });
    group.finish();
}

fn bench_analyzers(c: &mut Criterion) {
    let config = FormConfig::default();
    let frames = clip();

    let mut group = c.benchmark_group("analyzer_clip");
    group.throughput(Throughput::Elements(frames.len() as u64));
    for kind in ExerciseKind::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(kind), &frames, |b, frames| {
            b.iter(|| {
                let mut analyzer = build_analyzer(kind, &config);
                for frame in frames {
                    black_box(analyzer.analyze(frame, FRAME_DT));
                }
                analyzer.rep_count()
            });
        });
    }
    group.finish();
}

fn bench_coordinator_session(c: &mut Criterion) {
    let frames = clip();

    let mut group = c.benchmark_group("coordinator");
    group.throughput(Throughput::Elements((frames.len() * 2) as u64));
    group.bench_function("two_exercise_session", |b| {
        b.iter(|| {
            let mut coordinator = AnalysisCoordinator::with_defaults();
            coordinator.select(ExerciseKind::Squat, false);
            for frame in &frames {
                black_box(coordinator.process_frame(frame, FRAME_DT));
            }
            coordinator.select(ExerciseKind::JumpingJack, false);
            for frame in &frames {
                black_box(coordinator.process_frame(frame, FRAME_DT));
            }
            coordinator.end_session()
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_geometry,
    bench_feedback_manager,
    bench_analyzers,
    bench_coordinator_session,
);
criterion_main!(benches);
