//! End-to-end editor and play flows through the public engine API.

use std::path::PathBuf;

use zones::doc::Zone;
use zones::engine::{Action, EngineCore};
use zones::hit::hit_test;
use zones::input::{Button, InputEvent, Key, Mode};
use zones::normalize::{NormalizedRect, ScreenPoint, Size};
use zones::persist;

fn temp_path(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("zones-scenario-{tag}-{}.json", std::process::id()))
}

fn click(core: &mut EngineCore, x: i32, y: i32) -> Vec<Action> {
    core.handle(InputEvent::PointerDown { at: ScreenPoint::new(x, y), button: Button::Primary })
}

fn press(core: &mut EngineCore, key: Key) -> Vec<Action> {
    core.handle(InputEvent::KeyDown(key))
}

#[test]
fn create_select_delete_at_800x600() {
    let mut core = EngineCore::new(temp_path("create-select-delete"));
    core.set_reference_size(Size::new(800, 600));

    click(&mut core, 100, 100);
    click(&mut core, 300, 200);
    assert_eq!(core.zones().get(0).map(|z| z.rect), Some(NormalizedRect::new(1250, 1667, 2500, 1667)));

    press(&mut core, Key::Num2);
    assert_eq!(core.mode(), Mode::EditorSelect);
    click(&mut core, 150, 150);
    assert_eq!(core.selection(), Some(0));

    press(&mut core, Key::Delete);
    assert!(core.zones().is_empty());
    assert!(core.selection().is_none());
}

#[test]
fn zone_authored_at_one_size_is_hit_at_another() {
    let mut core = EngineCore::new(temp_path("resize"));
    core.set_reference_size(Size::new(800, 600));
    click(&mut core, 100, 100);
    click(&mut core, 300, 200);

    let actions = core.handle(InputEvent::Resized(Size::new(1600, 1200)));
    assert_eq!(actions, vec![Action::Resized(Size::new(1600, 1200))]);
    core.set_reference_size(Size::new(1600, 1200));

    press(&mut core, Key::Num2);
    click(&mut core, 150, 150);
    assert!(core.selection().is_none());
    click(&mut core, 300, 300);
    assert_eq!(core.selection(), Some(0));
}

#[test]
fn overlapping_zones_hit_lowest_index() {
    let mut core = EngineCore::new(temp_path("overlap"));
    core.set_reference_size(Size::new(800, 600));
    click(&mut core, 100, 100);
    click(&mut core, 300, 300);
    click(&mut core, 200, 200);
    click(&mut core, 400, 400);

    let p = ScreenPoint::new(250, 250);
    assert_eq!(hit_test(p, core.zones(), core.reference_size()), Some(0));

    press(&mut core, Key::Num2);
    click(&mut core, 250, 250);
    assert_eq!(core.selection(), Some(0));
}

#[test]
fn penalty_zone_in_play() {
    let mut core = EngineCore::new(temp_path("penalty"));
    core.set_reference_size(Size::new(800, 600));
    click(&mut core, 100, 100);
    click(&mut core, 300, 200);

    press(&mut core, Key::Num2);
    click(&mut core, 150, 150);
    press(&mut core, Key::Space);
    assert_eq!(core.zones().get(0).map(|z| z.score), Some(-1));

    press(&mut core, Key::Num3);
    let actions = click(&mut core, 150, 150);
    assert_eq!(
        actions,
        vec![Action::ZoneConsumed {
            index: 0,
            zone: Zone::with_score(NormalizedRect::new(1250, 1667, 2500, 1667), -1),
            total: -1,
        }]
    );
    assert_eq!(core.score(), -1);
    assert!(core.zones().is_empty());

    assert!(click(&mut core, 150, 150).is_empty());
    assert_eq!(core.score(), -1);
}

#[test]
fn save_and_reload_level() {
    let path = temp_path("reload");
    let mut editor = EngineCore::new(&path);
    editor.set_reference_size(Size::new(800, 600));
    click(&mut editor, 10, 10);
    click(&mut editor, 110, 60);
    click(&mut editor, 500, 300);
    click(&mut editor, 600, 500);
    press(&mut editor, Key::Num2);
    click(&mut editor, 550, 400);
    press(&mut editor, Key::Space);
    assert!(matches!(press(&mut editor, Key::S).as_slice(), [Action::Saved { count: 2, .. }]));

    let mut player = EngineCore::new(&path);
    assert!(player.load_zones().unwrap().is_empty());
    assert_eq!(player.zones(), editor.zones());

    // The player's window is a different size; zones follow the background.
    player.set_reference_size(Size::new(400, 300));
    press(&mut player, Key::Num3);
    click(&mut player, 30, 15);
    click(&mut player, 275, 200);
    assert_eq!(player.score(), 0);
    assert!(player.zones().is_empty());

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn saving_empty_store_round_trips_to_zero_zones() {
    let path = temp_path("empty");
    let mut core = EngineCore::new(&path);
    press(&mut core, Key::Num2);
    assert!(matches!(press(&mut core, Key::S).as_slice(), [Action::Saved { count: 0, .. }]));

    let decoded = persist::load(&path).unwrap();
    assert!(decoded.store.is_empty());
    std::fs::remove_file(&path).unwrap();
}
