//! Tests for ORDER BY

mod common;

use common::{NULL, int, setup_test};

const SALES: &str = "(select 1 as k, 10 as v \
                     union all select 2 as k, 5 as v \
                     union all select 1 as k, 7 as v \
                     union all select null as k, 3 as v)";

#[test]
fn test_order_by_ascending_is_stable() {
    let mut ctx = setup_test();

    let rows = ctx.records(&format!("select k, v from {} order by k;", SALES));
    assert_eq!(
        rows,
        vec![
            vec![int(1), int(10)],
            vec![int(1), int(7)],
            vec![int(2), int(5)],
            vec![NULL, int(3)],
        ]
    );
}

#[test]
fn test_order_by_descending() {
    let mut ctx = setup_test();

    let rows = ctx.records(&format!("select k from {} order by k desc;", SALES));
    assert_eq!(rows, vec![vec![NULL], vec![int(2)], vec![int(1)], vec![int(1)]]);
}

#[test]
fn test_order_by_multiple_keys() {
    let mut ctx = setup_test();

    let rows = ctx.records(&format!(
        "select v from {} order by k ascending, v descending;",
        SALES
    ));
    assert_eq!(rows, vec![vec![int(10)], vec![int(7)], vec![int(5)], vec![int(3)]]);
}

#[test]
fn test_order_by_unprojected_column() {
    let mut ctx = setup_test();

    let rows = ctx.records(&format!("select k from {} order by v;", SALES));
    assert_eq!(rows, vec![vec![NULL], vec![int(2)], vec![int(1)], vec![int(1)]]);
}

#[test]
fn test_order_by_alias() {
    let mut ctx = setup_test();

    // The alias shadows the source column of the same name.
    let rows = ctx.records(&format!("select 100 - v as v from {} order by v;", SALES));
    assert_eq!(rows, vec![vec![int(90)], vec![int(93)], vec![int(95)], vec![int(97)]]);
}

#[test]
fn test_order_by_aggregate() {
    let mut ctx = setup_test();

    let rows = ctx.records(&format!(
        "select k, sum(v) as total from {} group by k order by sum(v);",
        SALES
    ));
    assert_eq!(
        rows,
        vec![
            vec![NULL, int(3)],
            vec![int(2), int(5)],
            vec![int(1), int(17)],
        ]
    );

    let rows = ctx.records(&format!(
        "select k from {} group by k order by sum(v) desc;",
        SALES
    ));
    assert_eq!(rows, vec![vec![int(1)], vec![int(2)], vec![NULL]]);
}
