//! Paint Area — headless editing session.
//!
//! Creates a small area, loads it, sweeps a held pointer across a row of
//! tiles with `OBSTACLE` selected, drains the display queues the way a
//! renderer would, and saves the result.
//!
//! Run with: `cargo run -p tilefield --example paint_area`
//! (`RUST_LOG=info` for less output)

use std::error::Error;

use tilefield::prelude::*;

const AREA: &str = "plains";

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    let root = tempfile::tempdir()?;
    std::fs::create_dir_all(root.path().join("model"))?;
    std::fs::write(root.path().join(format!("model/{AREA}.g3db")), b"g3db")?;
    std::fs::create_dir_all(root.path().join("texture-atlas"))?;
    std::fs::write(root.path().join("texture-atlas/tile-permissions.atlas"), b"atlas")?;

    let config = AreaConfig {
        area_dir: root.path().join("area"),
        ..AreaConfig::default()
    };

    let mut world = World::new();
    world.insert_resource(AssetServer::new(FsAssetSource::new(root.path())));
    world.insert_resource(EventBus::<EditorEvent>::new());
    world.insert_resource(Pointer::default());

    let mut schedule = Schedule::new();
    schedule.add_system(PermissionsEditor::new(&config));
    schedule.add_system(drain_display_updates);

    let mut areas = AreaManager::new(config);
    areas.create(AREA, 5, 3)?;
    areas.load(&mut world, AREA)?;

    world
        .resource_mut::<EventBus<EditorEvent>>()
        .publish(EditorEvent::PermissionSelectionChanged(TilePermission::Obstacle));
    schedule.run(&mut world);

    // Hold the primary button and sweep along the middle row, lingering on
    // each tile for two frames.
    world.resource_mut::<Pointer>().buttons.press(PointerButton::Primary);
    for x in 0..5 {
        for _ in 0..2 {
            world.resource_mut::<Pointer>().hover(Some(UVec2::new(x, 1)));
            schedule.run(&mut world);
        }
    }
    world.resource_mut::<Pointer>().buttons.release(PointerButton::Primary);
    schedule.run(&mut world);

    let path = areas.save(&world)?;
    log::info!("{}", std::fs::read_to_string(&path)?);

    areas.unload_current(&mut world);
    schedule.run(&mut world);
    log::info!("entities left after unload: {}", world.entity_count());
    Ok(())
}

/// Stand-in renderer: consume every pending update once per frame.
fn drain_display_updates(world: &mut World) {
    world.query::<(&mut Displayable,)>(|entity, (display,)| {
        while let Some(request) = display.poll_update_request() {
            match request {
                DisplayableUpdateRequest::Full => {
                    log::info!("{entity:?}: rebuild {:?}", display.renderable());
                }
                DisplayableUpdateRequest::TilesPartial(tiles) => {
                    for (index, tile) in &tiles {
                        log::info!("{entity:?}: redraw tile {index} as {}", tile.permission());
                    }
                }
            }
        }
    });
}
