use mm_core::action::Direction;
use mm_core::maze::{Coord, MazeGrid, generate};
use mm_core::player::PlayerState;
use mm_core::vision::{self, Side, ViewDepth, ViewSlot, VisibilityCode};
use mm_core::GameRng;
use proptest::prelude::*;

fn t_junction() -> MazeGrid {
    "
    #######
    #.....#
    ###.###
    ###.###
    ###.###
    ###.###
    #######
    "
    .parse()
    .unwrap()
}

#[test]
fn test_corridor_up_to_t_junction() {
    let grid = t_junction();
    let player = PlayerState::new(Coord::new(5, 3), Direction::Up);
    let code = player.view(&grid, ViewDepth::Long);
    // walls beside the stem, the crossing itself is open four rows ahead
    assert_eq!(code.to_string(), "111011011010");
    assert_eq!(code.side(4, Side::Left), None);
    assert_eq!(code.center(4), Some(false));
}

#[test]
fn test_facing_the_junction_wall() {
    let grid = t_junction();
    let player = PlayerState::new(Coord::new(1, 3), Direction::Up);
    let code = player.view(&grid, ViewDepth::Short);
    assert_eq!(code.to_string(), "00111111");
    assert!(!code.is_wall(ViewSlot::ImmediateLeft));
    assert!(code.is_wall(ViewSlot::Forward));
}

#[test]
fn test_view_changes_with_facing() {
    let grid = t_junction();
    let mut player = PlayerState::new(Coord::new(1, 3), Direction::Up);
    player.turn_left();
    // looking west along the top corridor, the stem opens on the left
    let code = player.view(&grid, ViewDepth::Long);
    assert_eq!(code.to_string(), "011011011111");
}

#[test]
fn test_walk_the_stem() {
    let grid = t_junction();
    let mut player = PlayerState::new(Coord::new(5, 3), Direction::Up);
    let mut steps = 0;
    while player.move_forward(&grid) {
        steps += 1;
    }
    assert_eq!(steps, 4);
    assert_eq!(player.pos, Coord::new(1, 3));
}

#[test]
fn test_code_bits_index_a_table() {
    let code: VisibilityCode = "111011011010".parse().unwrap();
    assert_eq!(code.bits(), 0b0101_1011_0111);
    assert_eq!(VisibilityCode::from_bits(code.bits(), ViewDepth::Long), code);
}

proptest! {
    #[test]
    fn prop_occluded_slots_stay_walls(size in 2usize..10, seed in any::<u64>(), cell in any::<prop::sample::Index>(), facing in 0usize..4) {
        let layout = generate(size, &mut GameRng::new(seed)).unwrap();
        let grid = &layout.grid;
        let cells: Vec<Coord> = grid.logical_cells().collect();
        let at = cells[cell.index(cells.len())];
        let facing = Direction::ALL[facing];

        let code = vision::scan(grid, at, facing, ViewDepth::Long);
        let blocked = (1..=4).find(|&d| code.center(d) == Some(true));
        if let Some(row) = blocked {
            for slot in ViewDepth::Long.slots().filter(|s| s.depth() > row) {
                prop_assert!(code.is_wall(slot));
            }
        }

        let short = vision::scan(grid, at, facing, ViewDepth::Short);
        prop_assert!(code.to_string().starts_with(&short.to_string()));
    }

    #[test]
    fn prop_move_is_one_step_or_none(size in 1usize..10, seed in any::<u64>(), facing in 0usize..4) {
        let layout = generate(size, &mut GameRng::new(seed)).unwrap();
        let facing = Direction::ALL[facing];
        let mut player = PlayerState::new(layout.start, facing);
        let ahead = player.forward_cell(&layout.grid);
        let moved = player.move_forward(&layout.grid);

        prop_assert!(layout.grid.is_path(player.pos));
        if moved {
            prop_assert_eq!(Some(player.pos), ahead);
        } else {
            prop_assert_eq!(player.pos, layout.start);
            prop_assert!(ahead.is_none_or(|c| layout.grid.is_wall(c)));
        }
    }
}
