//! Property-based tests for scene composition over arbitrary poses and
//! input sequences.

use hydrabrake_engine::prelude::*;
use hydrabrake_engine::render::{tessellate, TextRenderer};
use proptest::prelude::*;

fn arb_pose() -> impl Strategy<Value = Pose> {
    (0.0f32..=1.0, 0.0f32..=1.0, 0.0f32..360.0, -10.0f32..=0.0).prop_map(
        |(pedal, pad, disc_rotation, car_offset)| Pose {
            pedal,
            pad,
            disc_rotation,
            car_offset,
        },
    )
}

fn arb_input() -> impl Strategy<Value = BrakeInput> {
    prop_oneof![Just(BrakeInput::EngageBrake), Just(BrakeInput::ReleaseBrake)]
}

proptest! {
    #[test]
    fn compose_is_pure(pose in arb_pose()) {
        prop_assert_eq!(compose(&pose), compose(&pose));
    }

    #[test]
    fn every_layer_restores_transform_depth(pose in arb_pose()) {
        let mut canvas = Canvas::new();
        for layer in DRAW_ORDER {
            layer.draw(&mut canvas, &pose);
            prop_assert_eq!(canvas.depth(), 0);
        }
    }

    #[test]
    fn draw_call_count_is_pose_independent(a in arb_pose(), b in arb_pose()) {
        prop_assert_eq!(compose(&a).len(), compose(&b).len());
    }

    #[test]
    fn tessellated_frame_is_finite(pose in arb_pose()) {
        let vertices = tessellate(&compose(&pose), &TextRenderer::new());
        prop_assert!(vertices.len() % 3 == 0);
        for v in &vertices {
            prop_assert!(v.position[0].is_finite() && v.position[1].is_finite());
        }
    }

    #[test]
    fn driven_poses_stay_in_range(
        script in prop::collection::vec((arb_input(), 0u64..40), 1..12)
    ) {
        let mut tick_loop = TickLoop::new(TickConfig::default());
        for (input, ticks) in script {
            tick_loop.handle_input(input);
            for _ in 0..ticks {
                tick_loop.tick();
                let pose = tick_loop.pose();
                prop_assert!((0.0..=1.0).contains(&pose.pedal));
                prop_assert!((0.0..=1.0).contains(&pose.pad));
                prop_assert!((0.0..=360.0).contains(&pose.disc_rotation));
                prop_assert!(pose.car_offset <= 0.0 && pose.car_offset >= -10.0);
            }
        }
    }
}
