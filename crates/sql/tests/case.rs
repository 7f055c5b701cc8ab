//! Tests for CASE expressions

mod common;

use common::{NULL, TRI_STATE, TestContext, boolean, int, setup_test};
use relq_sql::{Column, DataType, EngineConfig, Error};

#[test]
fn test_case_branches() {
    let mut ctx = setup_test();

    let stream = ctx.exec(&format!(
        "select case when x then 1 when not x then 0 end as v from {};",
        TRI_STATE
    ));
    assert_eq!(stream.header, vec![Column::new("v", DataType::Int)]);
    // A NULL condition does not take its branch.
    assert_eq!(stream.records, vec![vec![int(1)], vec![int(0)], vec![NULL]]);
}

#[test]
fn test_case_else() {
    let mut ctx = setup_test();

    let stream = ctx.exec("select case when false then 1 else 2 end;");
    assert_eq!(stream.header, vec![Column::new("case", DataType::Int)]);
    assert_eq!(stream.records, vec![vec![int(2)]]);
}

#[test]
fn test_case_without_branches() {
    let mut ctx = setup_test();

    let stream = ctx.exec("select case end;");
    assert_eq!(stream.header, vec![Column::new("case", DataType::Unknown)]);
    assert_eq!(stream.records, vec![vec![NULL]]);
}

#[test]
fn test_first_true_branch_wins() {
    let mut ctx = setup_test();

    ctx.assert_query_value("select case when true then 1 when true then 2 end as v;", "v", int(1));
}

#[test]
fn test_case_condition_must_be_bool() {
    let mut ctx = setup_test();

    assert!(matches!(
        ctx.exec_error("select case when 1 then 2 end;"),
        Error::TypeMismatch { .. }
    ));
}

#[test]
fn test_case_condition_must_be_bool_by_default() {
    let config = EngineConfig::for_testing().with_static_type_check(false);
    let mut ctx = TestContext::with_config(config);

    assert!(matches!(
        ctx.exec_error("select case when 1 then 2 end;"),
        Error::TypeMismatch { .. }
    ));
    assert!(matches!(
        ctx.exec_error("select case when x then 1 else 0 end from (select 1 as x);"),
        Error::TypeMismatch { .. }
    ));

    // Conditions after the first true branch are not evaluated.
    ctx.assert_query_value(
        "select case when true then 1 when 5 then 2 end as c;",
        "c",
        int(1),
    );
}

#[test]
fn test_mismatched_branch_types() {
    let sql = "select case when true then 1 else false end;";

    let mut strict = setup_test();
    assert!(matches!(strict.exec_error(sql), Error::TypeMismatch { .. }));

    // Without the static check the first typed branch decides the header.
    let mut lenient = common::TestContext::with_config(EngineConfig::default());
    let stream = lenient.exec(sql);
    assert_eq!(stream.header, vec![Column::new("case", DataType::Int)]);
    assert_eq!(stream.records, vec![vec![int(1)]]);
}

#[test]
fn test_case_over_aggregates() {
    let mut ctx = setup_test();

    let sql = "select k, case when sum(v) > 10 then true else false end as big \
               from (select 1 as k, 10 as v union all select 2 as k, 5 as v \
                     union all select 1 as k, 7 as v) \
               group by k;";
    assert_eq!(
        ctx.records(sql),
        vec![vec![int(1), boolean(true)], vec![int(2), boolean(false)]]
    );
}
