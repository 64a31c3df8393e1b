use super::*;

#[test]
fn rejects_sub_minimum_side() {
    assert!(ModuleMatrix::new(20, vec![false; 400]).is_err());
}

#[test]
fn rejects_non_square_data() {
    assert!(ModuleMatrix::new(21, vec![false; 440]).is_err());
}

#[test]
fn accepts_minimum_symbol() {
    let m = ModuleMatrix::new(21, vec![false; 441]).unwrap();
    assert_eq!(m.side(), 21);
}

#[test]
fn module_reads_are_bounds_safe() {
    let mut cells = vec![false; 441];
    cells[0] = true;
    let m = ModuleMatrix::new(21, cells).unwrap();
    assert!(m.module(0, 0));
    assert!(!m.module(20, 20));
    assert!(!m.module(21, 0));
    assert!(!m.module(0, 999));
}

#[test]
fn finder_regions_sit_at_the_three_corners() {
    let m = ModuleMatrix::new(25, vec![false; 625]).unwrap();
    let [tl, tr, bl] = m.finder_regions();
    assert_eq!((tl.x, tl.y, tl.side), (0, 0, 7));
    assert_eq!((tr.x, tr.y, tr.side), (18, 0, 7));
    assert_eq!((bl.x, bl.y, bl.side), (0, 18, 7));
}

#[test]
fn ec_level_parses_case_insensitively() {
    assert_eq!("l".parse::<EcLevel>().unwrap(), EcLevel::L);
    assert_eq!(" H ".parse::<EcLevel>().unwrap(), EcLevel::H);
    assert!("X".parse::<EcLevel>().is_err());
}
