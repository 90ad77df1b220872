use anyhow::Context;
use bevy::prelude::*;

use frame_duel_core::logging::{self, LoggingPlugin};
use frame_duel_core::plugin::{FightSettings, FightTelemetry, FighterInput};
use frame_duel_core::script::InputScript;
use frame_duel_core::{Bout, FightConfig, FightPlugin, InputEvent, Side};

const DEMO_TICKS: u64 = 90;

/// Left walks in and jabs; Right crouch-blocks, then stands up and jabs back.
fn demo_script() -> InputScript {
    let mut script = InputScript::new();
    script
        .push(0, Side::Left, InputEvent::Motion { x: 1.0, y: 0.0 })
        .push(0, Side::Right, InputEvent::Motion { x: 1.0, y: -1.0 })
        .push(8, Side::Left, InputEvent::Motion { x: 0.0, y: 0.0 })
        .push(8, Side::Left, InputEvent::LightPunch)
        .push(30, Side::Right, InputEvent::Motion { x: 0.0, y: 0.0 })
        .push(31, Side::Right, InputEvent::LightPunch)
        .push(60, Side::Left, InputEvent::Motion { x: -0.5, y: 1.0 });
    script
}

/// Usage: frame-duel [config.ron|config.json] [script.ron]
fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => FightConfig::load(&path).with_context(|| format!("loading {path}"))?,
        None => FightConfig::default(),
    };
    let script = match args.next() {
        Some(path) => {
            let source = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            InputScript::from_ron_str(&source).with_context(|| format!("parsing {path}"))?
        }
        None => demo_script(),
    };

    logging::init_tracing(&config.tracing);
    tracing::info!(tick_rate = config.tick_rate, inputs = script.len(), "frame duel demo");

    // Plain bout
    let mut bout = Bout::new(&config)?;
    for tick in bout.run_script(&script, DEMO_TICKS)? {
        for report in &tick.contacts {
            tracing::info!(tick = tick.tick, attacker = ?report.attacker, height = ?report.contact.height, "contact");
        }
        tracing::debug!(tick = tick.tick, left = ?tick.left, right = ?tick.right, "tick");
    }
    tracing::info!(
        outcome = ?bout.outcome(),
        left = bout.character(Side::Left).health(),
        right = bout.character(Side::Right).health(),
        hash = %format!("{:016x}", bout.history_hash()),
        "bout finished"
    );

    // Same script through the bevy plugin
    let mut app = App::new();
    app.add_plugins((LoggingPlugin, FightPlugin::new(&config)?));
    let settings = app.world().resource::<FightSettings>().clone();
    app.world_mut().spawn(settings.fighter(Side::Left));
    app.world_mut().spawn(settings.fighter(Side::Right));

    for tick in 0..bout.tick_count() {
        for input in script.at(tick) {
            app.world_mut().send_event(FighterInput {
                side: input.side,
                event: input.event,
            });
        }
        app.world_mut().run_schedule(FixedUpdate);
    }

    let telemetry = app.world().resource::<FightTelemetry>();
    for snap in &telemetry.snapshots {
        tracing::debug!("{}", snap.to_json());
    }
    if telemetry.snapshots.as_slice() == bout.snapshots().as_slice() {
        tracing::info!(ticks = telemetry.tick, contacts = telemetry.contacts, "plugin run matches bout");
    } else {
        tracing::warn!(telemetry = %telemetry.to_json(), "plugin run diverged from bout");
    }

    Ok(())
}
