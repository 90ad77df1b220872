use criterion::{black_box, criterion_group, criterion_main, Criterion};
use frame_duel_core::combat::{classify_contact, MoveHeight};
use frame_duel_core::movement::MovementState;
use frame_duel_core::script::{DummyBehavior, InputScript};
use frame_duel_core::{Bout, FightConfig};

fn close_config() -> FightConfig {
    let mut config = FightConfig::default();
    config.character.start_distance = 1.0;
    config.character.max_health = u32::MAX;
    config
}

fn bench_bout(c: &mut Criterion) {
    let config = close_config();
    let script = InputScript::new();

    c.bench_function("bout_600_ticks_punching", |b| {
        b.iter(|| {
            let mut bout = Bout::new(&config)
                .unwrap()
                .with_behaviors(DummyBehavior::PunchWhenIdle, DummyBehavior::PunchWhenIdle);
            bout.run_script(black_box(&script), 600).unwrap();
            bout.history_hash()
        })
    });

    c.bench_function("bout_600_ticks_jumping", |b| {
        b.iter(|| {
            let mut bout = Bout::new(&config)
                .unwrap()
                .with_behaviors(DummyBehavior::JumpWhenStationary, DummyBehavior::Idle);
            bout.run_script(black_box(&script), 600).unwrap();
            bout.history_hash()
        })
    });
}

fn bench_single_tick(c: &mut Criterion) {
    let mut bout = Bout::new(&close_config())
        .unwrap()
        .with_behaviors(DummyBehavior::PunchWhenIdle, DummyBehavior::JumpWhenStationary);

    c.bench_function("bout_tick", |b| b.iter(|| bout.tick().unwrap()));

    c.bench_function("state_hash", |b| b.iter(|| black_box(&bout).state_hash()));
}

fn bench_classification(c: &mut Criterion) {
    c.bench_function("classify_contact", |b| {
        b.iter(|| {
            classify_contact(
                black_box(MoveHeight::Mid),
                black_box(MovementState::CrouchingBlock),
            )
        })
    });
}

criterion_group!(benches, bench_bout, bench_single_tick, bench_classification);
criterion_main!(benches);
