//! Tests for cross joins in FROM

mod common;

use common::{TableBuilder, boolean, int, setup_test};
use relq_sql::{Column, DataType, Error};

const S1: &str = "(select true as x union all select false as x union all select true as x)";
const S2: &str = "(select false as y union all select true as y)";

#[test]
fn test_cross_join_order() {
    let mut ctx = setup_test();

    let stream = ctx.exec(&format!("select $0.x, $1.y from {}, {};", S1, S2));
    assert_eq!(
        stream.header,
        vec![
            Column::new("$0.x", DataType::Bool),
            Column::new("$1.y", DataType::Bool),
        ]
    );
    let (t, f) = (boolean(true), boolean(false));
    assert_eq!(
        stream.records,
        vec![
            vec![t.clone(), f.clone()],
            vec![t.clone(), t.clone()],
            vec![f.clone(), f.clone()],
            vec![f.clone(), t.clone()],
            vec![t.clone(), f.clone()],
            vec![t.clone(), t],
        ]
    );
}

#[test]
fn test_joined_names_are_qualified() {
    let mut ctx = setup_test();

    assert_eq!(
        ctx.exec_error(&format!("select x from {}, {};", S1, S2)),
        Error::UnresolvedVariable("x".into())
    );
}

#[test]
fn test_join_with_empty_side() {
    let mut ctx = setup_test();

    ctx.exec("create table empty (z int);");
    ctx.assert_row_count(&format!("select $0.x from {}, empty;", S1), 0);
}

#[test]
fn test_three_way_join_with_filter() {
    let mut ctx = setup_test();

    TableBuilder::new(&mut ctx, "n")
        .create_simple("v INT")
        .insert_rows(vec![vec![int(1)], vec![int(2)], vec![int(3)]]);

    let rows = ctx.records("select $0.v * 10 + $1.v as pair from n, n where $0.v < $1.v;");
    assert_eq!(rows, vec![vec![int(12)], vec![int(13)], vec![int(23)]]);

    let rows = ctx.records("select sum($2.v) from n, n, n;");
    assert_eq!(rows, vec![vec![int(54)]]);
}
