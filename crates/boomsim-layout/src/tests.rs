//! Layout offset and tiling tests.

use boomsim_types::{ArmMode, BodyModel, Channel, StepCount};
use proptest::prelude::*;
use test_case::test_case;

use crate::{ChannelLayout, LayoutError, Side, SlotKind};

fn steps(n: usize) -> StepCount {
    StepCount::new(n)
}

#[test_case(ArmMode::SingleArm, BodyModel::Rigid, 2, 1; "single arm input")]
#[test_case(ArmMode::DualArm, BodyModel::Rigid, 6, 0; "dual arm input")]
fn input_total_length(mode: ArmMode, body: BodyModel, per_step: usize, extra: usize) {
    for n in [1, 4, 100] {
        let layout = ChannelLayout::input(steps(n), mode, body).unwrap();
        assert_eq!(layout.total_len(), per_step * n + extra);
        assert_eq!(layout.side(), Side::Input);
    }
}

#[test_case(ArmMode::SingleArm, BodyModel::Rigid, 7)]
#[test_case(ArmMode::SingleArm, BodyModel::Flexible, 11)]
#[test_case(ArmMode::DualArm, BodyModel::Rigid, 8)]
#[test_case(ArmMode::DualArm, BodyModel::Flexible, 12)]
fn output_total_length(mode: ArmMode, body: BodyModel, width: usize) {
    let layout = ChannelLayout::output(steps(50), mode, body).unwrap();
    assert_eq!(layout.total_len(), width * 50);
    assert_eq!(layout.channels().count(), width);
}

#[test]
fn single_arm_input_offsets() {
    let layout = ChannelLayout::input(steps(4), ArmMode::SingleArm, BodyModel::Rigid).unwrap();

    assert_eq!(layout.range(Channel::Control).unwrap(), 0..4);
    assert_eq!(layout.range(Channel::PumpPressure).unwrap(), 4..8);
    assert_eq!(layout.range(Channel::Theta1).unwrap(), 8..9);
    assert_eq!(layout.total_len(), 9);
}

#[test]
fn dual_arm_input_keeps_absolute_angle_offsets() {
    let n = 10;
    let layout = ChannelLayout::input(steps(n), ArmMode::DualArm, BodyModel::Rigid).unwrap();

    assert_eq!(layout.range(Channel::Control1).unwrap(), 0..n);
    assert_eq!(layout.range(Channel::Control2).unwrap(), n..2 * n);
    assert_eq!(layout.range(Channel::PumpPressure).unwrap(), 2 * n..3 * n);
    assert_eq!(layout.slot(Channel::Theta1).unwrap().offset, 4 * n);
    assert_eq!(layout.slot(Channel::Theta2).unwrap().offset, 5 * n);
    assert_eq!(layout.total_len(), 6 * n);

    // Reserved block at slot 3 is padding, not a channel
    let reserved = layout.slots()[3];
    assert_eq!(reserved.kind, SlotKind::Padding);
    assert_eq!(reserved.range(), 3 * n..4 * n);
}

#[test]
fn dual_arm_input_with_one_step_has_no_trailing_padding() {
    let layout = ChannelLayout::input(steps(1), ArmMode::DualArm, BodyModel::Rigid).unwrap();

    assert_eq!(layout.slot(Channel::Theta1).unwrap().offset, 4);
    assert_eq!(layout.slot(Channel::Theta2).unwrap().offset, 5);
    assert_eq!(layout.total_len(), 6);
    assert!(layout.is_tiled());
}

#[test]
fn flexible_single_arm_inserts_strain_and_stress() {
    let n = 3;
    let layout = ChannelLayout::output(steps(n), ArmMode::SingleArm, BodyModel::Flexible).unwrap();

    assert_eq!(layout.range(Channel::Force).unwrap(), 4 * n..5 * n);
    assert_eq!(layout.range(Channel::Energy).unwrap(), 5 * n..6 * n);
    assert_eq!(layout.range(Channel::Strain).unwrap(), 6 * n..7 * n);
    assert_eq!(layout.range(Channel::Stress).unwrap(), 7 * n..8 * n);
    assert_eq!(layout.range(Channel::AngleDeg).unwrap(), 8 * n..9 * n);
    assert_eq!(layout.range(Channel::AngularVelocityDeg).unwrap(), 9 * n..10 * n);
    assert_eq!(layout.range(Channel::Deflection).unwrap(), 10 * n..11 * n);
}

#[test]
fn rigid_single_arm_places_angle_after_energy() {
    let n = 3;
    let layout = ChannelLayout::output(steps(n), ArmMode::SingleArm, BodyModel::Rigid).unwrap();

    assert_eq!(layout.range(Channel::AngleDeg).unwrap(), 6 * n..7 * n);
    assert!(!layout.contains(Channel::Strain));
}

#[test]
fn dual_arm_output_order() {
    let layout = ChannelLayout::output(steps(2), ArmMode::DualArm, BodyModel::Flexible).unwrap();
    let names: Vec<&str> = layout.channels().map(Channel::as_str).collect();

    assert_eq!(
        names,
        vec![
            "s1", "s2", "v1", "v2", "p1", "p2", "p3", "p4", "strainF1", "strainF2", "stress1",
            "stress2"
        ]
    );
}

#[test]
fn channel_outside_mode_is_a_layout_error() {
    let layout = ChannelLayout::output(steps(5), ArmMode::DualArm, BodyModel::Rigid).unwrap();

    let err = layout.slot(Channel::Energy).unwrap_err();
    assert_eq!(
        err,
        LayoutError::UnknownChannel {
            channel: Channel::Energy,
            side: Side::Output,
            mode: ArmMode::DualArm,
            body: BodyModel::Rigid,
        }
    );
    assert!(matches!(
        layout.slot(Channel::StrainF1),
        Err(LayoutError::UnknownChannel { .. })
    ));
}

#[test]
fn lookup_by_name() {
    let layout = ChannelLayout::input(steps(4), ArmMode::SingleArm, BodyModel::Rigid).unwrap();

    assert_eq!(layout.lookup("pP").unwrap().range(), 4..8);
    assert!(matches!(
        layout.lookup("reserved"),
        Err(LayoutError::UnknownName { .. })
    ));
    assert!(matches!(
        layout.lookup("U2"),
        Err(LayoutError::UnknownChannel { .. })
    ));
}

#[test]
fn zero_steps_is_rejected() {
    assert_eq!(
        ChannelLayout::input(steps(0), ArmMode::SingleArm, BodyModel::Rigid),
        Err(LayoutError::ZeroSteps)
    );
    assert_eq!(
        ChannelLayout::output(steps(0), ArmMode::DualArm, BodyModel::Flexible),
        Err(LayoutError::ZeroSteps)
    );
}

#[test]
fn overflowing_step_count_is_rejected() {
    let result = ChannelLayout::output(steps(usize::MAX / 2), ArmMode::DualArm, BodyModel::Rigid);
    assert!(matches!(result, Err(LayoutError::TooManySteps { .. })));
}

fn any_mode() -> impl Strategy<Value = ArmMode> {
    prop_oneof![Just(ArmMode::SingleArm), Just(ArmMode::DualArm)]
}

fn any_body() -> impl Strategy<Value = BodyModel> {
    prop_oneof![Just(BodyModel::Rigid), Just(BodyModel::Flexible)]
}

proptest! {
    #[test]
    fn layouts_tile_the_buffer(n in 1usize..500, mode in any_mode(), body in any_body()) {
        let layouts = ChannelLayout::for_run(steps(n), mode, body).unwrap();

        for layout in [&layouts.input, &layouts.output] {
            prop_assert!(layout.is_tiled());
            let sum: usize = layout.slots().iter().map(|s| s.len).sum();
            prop_assert_eq!(sum, layout.total_len());
            let last = layout.slots().last().unwrap();
            prop_assert_eq!(last.end(), layout.total_len());
        }
    }

    #[test]
    fn layouts_are_deterministic(n in 1usize..500, mode in any_mode(), body in any_body()) {
        let first = ChannelLayout::for_run(steps(n), mode, body).unwrap();
        let second = ChannelLayout::for_run(steps(n), mode, body).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn offsets_increase_monotonically(n in 1usize..200, mode in any_mode(), body in any_body()) {
        let layout = ChannelLayout::output(steps(n), mode, body).unwrap();
        let offsets: Vec<usize> = layout.slots().iter().map(|s| s.offset).collect();
        prop_assert!(offsets.windows(2).all(|w| w[0] < w[1]));
    }
}
