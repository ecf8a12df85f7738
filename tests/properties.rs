//! Property tests for the command protocol

use hub75_illuminator::parser::{parse, VERBS};
use embedded_graphics::mock_display::MockDisplay;
use embedded_graphics::pixelcolor::Rgb565;
use hub75_illuminator::{
    clip_radius, color_from_level, Command, CommandError, CommandKind, GraphicsPanel, Renderer,
};
use proptest::prelude::*;

/// Render `command` on a fresh 32 x 32 display
fn render(command: &Command) {
    let mut display = MockDisplay::<Rgb565>::new();
    display.set_allow_overdraw(true);
    display.set_allow_out_of_bounds_drawing(true);
    let mut renderer = Renderer::<_, 32, 32>::new(GraphicsPanel::new(display));
    renderer.render(command).unwrap();
}

fn color_tag() -> impl Strategy<Value = char> {
    prop::char::range(' ', '~')
}

proptest! {
    #[test]
    fn draw_without_color_is_green(x in -999i32..999, y in -999i32..999, level in -99i32..999) {
        let line = format!("draw {x} {y} {level}\n");
        let cmd = parse(line.as_bytes());
        prop_assert!(cmd.is_valid);
        prop_assert_eq!(cmd.kind, CommandKind::Draw);
        prop_assert_eq!((cmd.x, cmd.y, cmd.level), (x, y, level));
        prop_assert_eq!(cmd.color, 'G');
    }

    #[test]
    fn fewer_numbers_than_required_is_invalid(
        index in 0usize..8,
        numbers in prop::collection::vec(0i32..100, 0..4),
    ) {
        let verb = &VERBS[index];
        prop_assume!(numbers.len() < verb.required());

        let mut line = String::from(verb.name);
        for n in &numbers {
            line.push_str(&format!(" {n}"));
        }
        line.push('\n');

        let cmd = parse(line.as_bytes());
        prop_assert!(!cmd.is_valid);
        prop_assert_eq!(cmd.kind, verb.kind);
        prop_assert_eq!(cmd.error, None);
    }

    #[test]
    fn field_commands_keep_their_color(
        index in 2usize..8,
        radius in -50i32..50,
        level in 0i32..=100,
        tag in prop::sample::select(vec!['R', 'G', 'B']),
    ) {
        let verb = &VERBS[index];
        let line = format!("{} 0 0 {radius} {level} {tag}\n", verb.name);
        let cmd = parse(line.as_bytes());
        prop_assert!(cmd.is_valid);
        prop_assert!(cmd.kind.is_field());
        prop_assert_eq!((cmd.radius, cmd.level, cmd.color), (radius, level, tag));
    }

    #[test]
    fn unterminated_lines_are_framing_errors(body in "[ -~]{0,29}") {
        let cmd = parse(body.as_bytes());
        prop_assert!(!cmd.is_valid);
        prop_assert_eq!(cmd.error, Some(CommandError::NoTerminator));
    }

    #[test]
    fn levels_above_range_clamp(tag in color_tag(), level in 100i32..) {
        prop_assert_eq!(color_from_level(tag, level), color_from_level(tag, 100));
    }

    #[test]
    fn levels_below_range_clamp(tag in color_tag(), level in ..=0i32) {
        prop_assert_eq!(color_from_level(tag, level), color_from_level(tag, 0));
    }

    #[test]
    fn unknown_tags_are_green(tag in any::<char>(), level in any::<i32>()) {
        prop_assume!(!matches!(tag, 'R' | 'G' | 'B'));
        prop_assert_eq!(color_from_level(tag, level), color_from_level('G', level));
    }

    #[test]
    fn clip_radius_never_grows(r in any::<i32>(), a in 0i32..512, b in 0i32..512) {
        let clipped = clip_radius(r, a, b);
        prop_assert!(clipped <= r);
        if r <= a.min(b) {
            prop_assert_eq!(clipped, r);
        } else {
            prop_assert_eq!(clipped, a.min(b));
        }
    }

    #[test]
    fn any_valid_line_renders(body in "[ -~]{0,29}") {
        let cmd = parse(format!("{body}\n").as_bytes());
        if cmd.is_valid {
            render(&cmd);
        }
    }

    #[test]
    fn field_commands_render_any_numbers(
        index in 2usize..8,
        x in any::<i32>(),
        y in any::<i32>(),
        radius in prop_oneof![Just(i32::MIN), Just(i32::MAX), any::<i32>()],
        level in any::<i32>(),
    ) {
        let verb = &VERBS[index];
        let cmd = parse(format!("{} {x} {y} {radius} {level}\n", verb.name).as_bytes());
        prop_assert!(cmd.is_valid);
        prop_assert_eq!(cmd.radius, radius);
        render(&cmd);
    }

    #[test]
    fn arbitrary_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..40)) {
        let cmd = parse(&bytes);
        if cmd.error.is_some() {
            prop_assert!(!cmd.is_valid);
        }
    }
}

#[test]
fn scenario_fill_with_color() {
    let cmd = parse(b"fill 75 B\n");
    assert!(cmd.is_valid);
    assert_eq!(cmd.kind, CommandKind::Fill);
    assert_eq!((cmd.level, cmd.color), (75, 'B'));
}

#[test]
fn scenario_unrecognized_command() {
    let cmd = parse(b"spin 1 2\n");
    assert!(!cmd.is_valid);
    assert_eq!(
        cmd.error.map(|e| e.to_string()).as_deref(),
        Some("Unrecognized command: spin")
    );
}
