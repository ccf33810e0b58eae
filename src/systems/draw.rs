// src/systems/draw.rs

use crate::components::*;
use crate::ecs::system::for_each;
use crate::ecs::{System, SystemContext, World};
use crate::prototypes;
use crate::systems::spawned;

/// 見えるもの全部について `EventDraw` を出すシステム。実際に描くのはプラットフォーム側。
///
/// 向きを持つ絵 (`Drawable.directional`) だけ、`PhysObject` の向きから回転を決める。
pub struct DrawSystem;

impl System for DrawSystem {
    fn name(&self) -> &'static str {
        "draw"
    }

    fn runs_while_paused(&self) -> bool {
        true
    }

    fn run(&mut self, world: &mut World, ctx: &mut SystemContext<'_>) {
        for_each::<(Transform, Drawable, Option<PhysObject>, Option<Animation>), _>(
            world,
            ctx,
            |world, _, _, (transform, drawable, phys, animation)| {
                let orientation = match phys {
                    Some(phys) if drawable.directional => Orientation::from_facing(phys.facing),
                    _ => Orientation::Identity,
                };
                let draw = EventDraw {
                    x: transform.x,
                    y: transform.y,
                    graphic: drawable.graphic,
                    frame: animation.map_or(0, |a| a.frame),
                    orientation,
                    z: drawable.z,
                };
                spawned("DrawSystem", prototypes::event_draw(world, draw)).is_some()
            },
        );
    }
}
