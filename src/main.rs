//! Sprite Hunt entry point
//!
//! Headless demo: places a session, drives the idle timers on a 100 ms host
//! tick and resolves a scripted set of clicks, printing the event stream.
//!
//! Usage: `sprite-hunt [seed] [asset_dir] [settings.json]`
//! With an asset directory the real sheet series are decoded; without one
//! the pool sizes default to the standard slot tables.

use anyhow::Result;
use glam::Vec2;

use sprite_hunt::scene::{EntityId, SceneEvent, Session, ViewRect};
use sprite_hunt::settings::SessionSettings;
use sprite_hunt::{layout, sheet};

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xD065);
    let asset_dir = args.next();
    let settings = match args.next() {
        Some(path) => SessionSettings::load(path)?,
        None => SessionSettings::with_seed(seed),
    };

    log::info!("Sprite Hunt starting (seed {})", settings.seed);

    let (target_pool_len, distractor_pool_len) = match asset_dir {
        Some(dir) => {
            let to_find = sheet::load_to_find(&dir)?;
            let neutral = sheet::load_neutral(&dir)?;
            log::info!(
                "decoded {} target sprites ({}x{}) and {} neutral sprites",
                to_find.len(),
                to_find.sprite_width,
                to_find.sprite_height,
                neutral.len()
            );
            (to_find.len(), neutral.len())
        }
        None => (layout::TARGET_SLOTS.len(), layout::DISTRACTOR_SLOTS.len()),
    };

    let mut session = Session::new(&settings, target_pool_len, distractor_pool_len);
    let stats = session.placement_stats();
    if stats.relaxed_count > 0 {
        log::warn!("{} placements relaxed past the separation check", stats.relaxed_count);
    }

    // A fixed render box stands in for the presentation layer.
    let view = ViewRect::new(Vec2::ZERO, Vec2::new(640.0, 480.0));

    let mut now = 0u64;
    while !session.is_complete() && now < 120_000 {
        now += 100;
        session.advance(now);

        // Every two seconds a click lands: mostly on the next unfound
        // target's animated position, sometimes probing an empty corner.
        if now % 2000 != 0 {
            continue;
        }
        let next_unfound = session.scene.targets.iter().find(|t| !t.found).map(|t| t.id);
        let scene_point = match next_unfound {
            Some(id) if (now / 2000) % 3 != 0 => session
                .scene
                .current_position(EntityId::Target(id))
                .unwrap_or(Vec2::new(50.0, 50.0)),
            _ => Vec2::new(5.0, 5.0),
        };
        let device = view.origin + scene_point / 100.0 * view.size;
        for event in session.click_device(device, &view, now) {
            match event {
                SceneEvent::TargetFound { id, ordinal } => {
                    println!(
                        "[{:>6} ms] found target {} ({}/{})",
                        now,
                        id,
                        ordinal,
                        session.scene.total_count()
                    );
                    session.scene.trigger_jump(now);
                }
                SceneEvent::Miss { id } => {
                    println!("[{:>6} ms] miss on distractor {}", now, id);
                }
            }
        }

        let bubbles: Vec<String> = session
            .scene
            .bubbles
            .iter()
            .map(|(id, glyph)| format!("{id:?}{}", glyph.symbol()))
            .collect();
        if !bubbles.is_empty() {
            log::debug!("bubbles: {}", bubbles.join(" "));
        }
    }

    if session.is_complete() {
        println!(
            "complete: all {} targets found by {} ms",
            session.scene.total_count(),
            now
        );
    } else {
        println!(
            "timed out with {}/{} found",
            session.scene.found_count(),
            session.scene.total_count()
        );
    }
    Ok(())
}
